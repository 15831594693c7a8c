use clap::Parser;
use condition_export_core::adapters::config::app_config::AppConfig;
use condition_export_core::prettyprint::prettyprint::PrettyFormatter;
use console::Term;
use indicatif::ProgressStyle;
use std::process::ExitCode;
use tracing::{error, info, instrument};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod application_service_factory;
mod args;
mod cli_adapter;

use application_service_factory::ApplicationServiceFactory;
use args::Cli;
use cli_adapter::CliAdapter;

const LOG_FILE: &str = "condition_export.log";

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_tracing(cli.verbose) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }
    setup_panic_hook();

    info!("Starting condition-export CLI");

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(report) => {
            error!("Could not load configuration: {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    let app_service = match ApplicationServiceFactory::create(&config).await {
        Ok(service) => service,
        Err(report) => {
            error!("Could not start: {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    let cli_adapter = CliAdapter::new(app_service, config.admin.password.clone(), Term::stdout());

    match cli_adapter.run(cli.into_command()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn setup_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };

    let indicatif_layer = IndicatifLayer::new().with_progress_style(
        ProgressStyle::with_template("{spinner:.cyan} {span_child_prefix}{span_name} {wide_msg}")?,
    );

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::terminal())
        .with_writer(indicatif_layer.get_stderr_writer());

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::log_file())
        .with_writer(std::fs::File::create(LOG_FILE)?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("condition_export", level)
                .with_target("condition_export_core", level),
        )
        .with(indicatif_layer)
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
