pub mod controller;
pub mod summary;

pub use crate::domain::model::{Country, CountryName, SearchState};
pub use crate::domain::ports::{ConfigProvider, CountryGateway, DisplaySurface, Notifier};
pub use crate::utils::error::Result;
