//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the DoseBuddy application.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::models::StepId;
use crate::utils::errors::{DoseBuddyError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must live as long as
/// the application. Stdout output is left off when the console front-end owns
/// the terminal.
pub fn init_logging(config: &LoggingConfig, stdout: bool) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "dosebuddy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .boxed()
    };
    let stdout_layer = stdout.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| DoseBuddyError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an incoming chat turn
pub fn log_turn(session: &str, step: StepId, input_chars: usize) {
    debug!(
        session = session,
        step = %step,
        input_chars = input_chars,
        "Turn received"
    );
}

/// Log a committed step transition
pub fn log_transition(session: &str, from: StepId, to: StepId) {
    info!(
        session = session,
        from = %from,
        to = %to,
        "Step transition committed"
    );
}

/// Log backend failures with context
pub fn log_backend_error(endpoint: &str, error: &str, session: Option<&str>) {
    warn!(
        endpoint = endpoint,
        error = error,
        session = session,
        "Backend call failed"
    );
}

/// Log session lifecycle events
pub fn log_session_event(session: &str, event: &str) {
    info!(
        session = session,
        event = event,
        "Session event occurred"
    );
}
