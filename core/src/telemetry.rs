use std::sync::{Mutex, PoisonError};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::TelemetryConfig;
use crate::errors::{ConfigError, GreeterError};

/// Sink for the plain-text lines a handler emits while processing a request.
///
/// Handlers take one of these at construction so tests can capture or
/// silence output without touching the process-wide subscriber.
pub trait RequestLog: Send + Sync {
    fn record(&self, level: Level, line: &str);
}

impl<L: RequestLog + ?Sized> RequestLog for &L {
    fn record(&self, level: Level, line: &str) {
        (**self).record(level, line)
    }
}

impl<L: RequestLog + ?Sized> RequestLog for std::sync::Arc<L> {
    fn record(&self, level: Level, line: &str) {
        (**self).record(level, line)
    }
}

/// Forwards every line to the global `tracing` dispatcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl RequestLog for TracingLog {
    fn record(&self, level: Level, line: &str) {
        match level {
            Level::ERROR => tracing::error!("{line}"),
            Level::WARN => tracing::warn!("{line}"),
            Level::INFO => tracing::info!("{line}"),
            Level::DEBUG => tracing::debug!("{line}"),
            _ => tracing::trace!("{line}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl RequestLog for NullLog {
    fn record(&self, _level: Level, _line: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub line: String,
}

/// Keeps every line in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingLog {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.line).collect()
    }
}

impl RequestLog for RecordingLog {
    fn record(&self, level: Level, line: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                line: line.to_string(),
            });
    }
}

/// Installs the global subscriber writing to stderr. `RUST_LOG` takes
/// precedence over the configured filter.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), GreeterError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| ConfigError::Invalid {
            message: format!("invalid log filter '{}': {}", config.filter, e),
        })?;

    // CloudWatch stamps ingestion time, so timestamps are opt-in.
    let fmt_layer = if config.with_time {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(config.with_target)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(config.with_target)
            .without_time()
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| GreeterError::Generic(anyhow::anyhow!("failed to install subscriber: {e}")))
}
