use std::process::ExitCode;
use std::sync::Arc;

use othello_client::application::sync_controller::SyncController;
use othello_client::config::AppConfig;
use othello_client::infrastructure::http_authority::HttpAuthority;
use othello_client::interface::console::ConsoleInterface;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    config.log_summary();
    tracing::info!(
        "othello-client v{} talking to {}",
        env!("CARGO_PKG_VERSION"),
        config.remote.base_url
    );

    let authority = Arc::new(HttpAuthority::new(&config.remote));
    let controller = SyncController::spawn(authority, config.polling.interval());

    // A failed first fetch leaves an empty board; `refresh` retries.
    let _ = controller.startup().await;

    match ConsoleInterface::run(controller).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "console input failed");
            ExitCode::FAILURE
        }
    }
}
