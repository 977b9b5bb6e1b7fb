//! Server initialization and startup logic for revisor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use revisor_api::{AppState, InterfaceConfig, InterfaceServer};
use revisor_config::{Config, ConfigLoader, LoggingConfig, ValidationResult};
use revisor_protocols::ChatProvider;
use revisor_provider_azure::{AzureOpenAIProvider, AzureSettings};

/// Initialize tracing with console output, plus daily-rolling files when
/// `logging.dir` is set.
///
/// `RUST_LOG` wins over the configured level.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match &logging.dir {
        Some(dir) => {
            let log_dir = PathBuf::from(ConfigLoader::expand_path(&dir.to_string_lossy()));
            std::fs::create_dir_all(&log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("revisor")
                .filename_suffix("log")
                .max_log_files(30)
                .build(&log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keeps the background writer alive for the life of the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// Log validation warnings; turn errors into a startup failure.
pub(crate) fn report_validation(result: &ValidationResult) -> Result<(), Box<dyn std::error::Error>> {
    for warning in &result.warnings {
        warn!("Configuration: {}", warning);
    }
    if result.is_valid() {
        return Ok(());
    }
    let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
    Err(format!("Invalid configuration: {}", errors.join("; ")).into())
}

/// Build the Azure OpenAI provider from configuration.
pub(crate) fn build_provider(config: &Config) -> Result<Arc<dyn ChatProvider>, Box<dyn std::error::Error>> {
    let azure = &config.azure;
    let settings = AzureSettings {
        api_key: azure.api_key.clone(),
        endpoint: azure.endpoint.clone(),
        api_version: azure.api_version.clone(),
        timeout: Duration::from_secs(azure.timeout_seconds),
        connect_timeout: Duration::from_secs(azure.connect_timeout_seconds),
    };
    let provider = AzureOpenAIProvider::new(settings)?;
    if !provider.is_configured() {
        warn!("Azure OpenAI key or endpoint missing, reviews will fail");
    }
    Ok(Arc::new(provider))
}

/// Run the server in foreground until Ctrl-C or SIGTERM.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting revisor v{}", env!("CARGO_PKG_VERSION"));

    let provider = build_provider(&config)?;
    let state = Arc::new(AppState::from_config(&config, provider));

    info!(
        "Default deployment: {}",
        state.gate.default_deployment().unwrap_or("<not set>")
    );
    info!("Token configured: {}", state.gate.has_token());

    let server = InterfaceServer::new(InterfaceConfig::from(&config.server), state);
    server.run_with_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
