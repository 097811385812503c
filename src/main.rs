use anyhow::Context;
use clap::Parser;
use country_search::utils::logger;
use country_search::{
    CliConfig, CountrySearchController, RestCountriesGateway, SearchOutcome, TerminalDisplay,
    TerminalNotifier,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

const QUIT_COMMAND: &str = ":q";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if cli.json_logs {
        logger::init_json_logger(config.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level.as_deref());
    }

    tracing::info!("Starting country-search against {}", config.base_url);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let gateway = RestCountriesGateway::from_config(&config)?;
    let controller = CountrySearchController::new(
        gateway,
        Arc::new(TerminalDisplay::stdout()),
        Arc::new(TerminalNotifier::stderr()),
    );

    if cli.names.is_empty() {
        run_interactive(&controller).await?;
    } else {
        for name in &cli.names {
            controller.search(name).await;
        }
    }

    controller.teardown();
    Ok(())
}

/// Each stdin line is one press of the search button. Lookups run in the
/// background so a newer line supersedes a slower earlier one.
async fn run_interactive(
    controller: &CountrySearchController<RestCountriesGateway>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last: Option<JoinHandle<SearchOutcome>> = None;

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim() == QUIT_COMMAND {
            break;
        }
        if let Some(handle) = controller.submit(&line) {
            last = Some(handle);
        }
    }

    if let Some(handle) = last {
        if let Err(e) = handle.await {
            tracing::warn!("Last lookup did not finish: {}", e);
        }
    }
    Ok(())
}
