use crate::config::Config;
use crate::error::InitError;
use crate::layer::{BridgeConfig, BridgeLayer};
use crate::logger::Logger;
use crate::sink::EventSink;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

static GLOBAL: OnceLock<Arc<Logger>> = OnceLock::new();

/// Install the process-wide logger built from `config`.
///
/// **Returns**
/// - the installed logger;
/// - [`InitError::AlreadyInitialized`] if [`init`], [`init_with_event_sink`]
///   or [`global`] already created one. The existing logger is untouched.
pub fn init(config: Config) -> Result<Arc<Logger>, InitError> {
    install(Logger::new(config))
}

/// Like [`init`], with a custom [`EventSink`].
pub fn init_with_event_sink(
    config: Config,
    events: Arc<dyn EventSink>,
) -> Result<Arc<Logger>, InitError> {
    install(Logger::with_event_sink(config, events))
}

fn install(logger: Logger) -> Result<Arc<Logger>, InitError> {
    let logger = Arc::new(logger);
    GLOBAL
        .set(Arc::clone(&logger))
        .map_err(|_| InitError::AlreadyInitialized)?;
    tracing::debug!(config = ?logger.config(), "process-wide logger initialized");
    Ok(logger)
}

/// The process-wide logger.
///
/// Created on first use from [`Config::from_env`] unless [`init`] ran
/// earlier. Concurrent first calls construct it exactly once.
pub fn global() -> Arc<Logger> {
    Arc::clone(GLOBAL.get_or_init(|| Arc::new(Logger::new(Config::from_env()))))
}

/// Shut the process-wide logger down, if one exists.
///
/// Later logging calls through it become no-ops; exception reports still go
/// through.
pub fn shutdown() {
    if let Some(logger) = GLOBAL.get() {
        logger.shutdown();
    }
}

/// Route every `tracing` event of the process into `logger`.
///
/// **Parameters**
/// - `logger`: destination of the bridged records.
/// - `config`: caller defaults for events without `user`/`depth` fields.
/// - `enable_stdout`: also print events to the console through the
///   `fmt` layer.
///
/// Installs a [`Registry`] with a [`BridgeLayer`] as the global default
/// subscriber; fails if one is already installed.
pub fn install_tracing_bridge(
    logger: Arc<Logger>,
    config: BridgeConfig,
    enable_stdout: bool,
) -> Result<(), InitError> {
    let layer = BridgeLayer::with_config(logger, config);

    // The two subscriber shapes have different types, so each is installed
    // in its own branch.
    if enable_stdout {
        let subscriber = Registry::default()
            .with(layer)
            .with(tracing_subscriber::fmt::layer());
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}
