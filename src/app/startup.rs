//! Application startup
//!
//! Wires CLI arguments, credentials, store, engine and adapters together
//! and applies the exit-code policy: individual platform failures are data
//! and still exit 0; only configuration errors are fatal.

use crate::app::cli::args::Args;
use crate::app::cli::display::print_summary;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::extract::{ConfigError, Orchestrator};
use crate::history::{DiffEngine, JsonStore};
use crate::notify::{Notifier, NullNotifier, WebhookNotifier};
use crate::platform::{build_adapters, Credentials};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

pub fn startup() {
    let args = Args::parse();

    let use_color = !args.no_color && (args.color || std::io::IsTerminal::is_terminal(&std::io::stdout()));
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        args.log_file.as_deref().and_then(|p| p.to_str()),
        use_color,
    ) {
        eprintln!("Failed to initialise logging: {}", e);
        std::process::exit(1);
    }

    log::info!("scopewatch starting");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("FATAL: failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    match runtime.block_on(run(&args, use_color)) {
        Ok(()) => {}
        Err(error) => {
            log_error_with_context(&error, "Extraction run configuration");
            std::process::exit(1);
        }
    }
}

async fn run(args: &Args, use_color: bool) -> Result<(), ConfigError> {
    let selection = args.selection();
    if !selection.any_enabled() {
        return Err(ConfigError::NoPlatformsEnabled);
    }

    let credentials = match &args.creds_file {
        Some(path) => Credentials::load(path).map_err(ConfigError::Credentials)?,
        None => Credentials::default(),
    };

    let data_dir = args.resolved_data_dir();
    log::debug!("data directory: {}", data_dir.display());
    let store = Arc::new(JsonStore::new(data_dir));

    let notifier: Arc<dyn Notifier> = match &args.webhook_url {
        Some(url) => match WebhookNotifier::new(url) {
            Ok(notifier) => Arc::new(notifier),
            Err(e) => {
                log::warn!("webhook disabled: {}", e);
                Arc::new(NullNotifier)
            }
        },
        None => Arc::new(NullNotifier),
    };

    let engine = Arc::new(DiffEngine::new(store, notifier));
    let orchestrator = Orchestrator::new(engine, args.skip_vdp)
        .with_fetch_timeout(Duration::from_secs(args.timeout));

    let adapters = build_adapters(&selection, &credentials);
    let summary = orchestrator.run(&adapters).await?;

    print_summary(&summary, use_color);

    Ok(())
}
