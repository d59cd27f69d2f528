use clap::Parser;
use estate_core::storage::config::Config;
use estate_core::utils::logging::{log_error, log_warning};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::dispatcher::Dispatcher;
use cli::main_types::Cli;

fn init_tracing(verbose: bool) {
    // `log` records from estate-core are bridged into the subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| Config::file_in(&PathBuf::from(dir)));

    if let Some(config_dir) = &cli.config_dir {
        tracing::debug!("Using config directory: {}", config_dir);
    }

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Error loading config: {}", err));
            std::process::exit(1);
        }
    };

    let dispatcher = Dispatcher::new(config, config_path, cli.verbose, cli.api_url);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        log_error(&format!("{} {}", e.severity().emoji(), e.display_friendly()));
        if let Some(hint) = e.troubleshooting_hint() {
            log_warning(&format!("Hint: {}", hint));
        }
        std::process::exit(1);
    }
}
