pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::console::{TerminalDisplay, TerminalNotifier};
pub use adapters::http::RestCountriesGateway;
pub use config::SearchConfig;
pub use core::controller::{CountrySearchController, SearchOutcome};
pub use utils::error::{AppError, GatewayError, Result, SearchError};
