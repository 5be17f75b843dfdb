//! Logger construction.
//!
//! A [`Logger`] owns its own `tracing` dispatcher. Components emit events inside
//! [`Logger::in_scope`], so which sink receives them is decided by whoever built
//! the component, not by ambient global state.

use core::str::FromStr;
use std::fmt;

use ::tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line (production default).
    #[default]
    Json,
    /// Human-readable lines with `file:line` of the call site.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            other => Err(format!("unknown log format '{other}' (expected json or text)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `walletd_infra=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LoggingConfig {
    /// Unparseable directives fall back to `info`.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Explicitly constructed logging handle. Cheap to clone.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// Logger writing to stdout.
    pub fn new(config: &LoggingConfig) -> Self {
        Self::with_writer(config, std::io::stdout)
    }

    /// Logger writing to an arbitrary sink.
    pub fn with_writer<W>(config: &LoggingConfig, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(config.env_filter())
            .with_writer(writer)
            .with_timer(tracing_subscriber::fmt::time::SystemTime);

        let dispatch = match config.format {
            LogFormat::Json => Dispatch::new(builder.json().with_target(false).finish()),
            LogFormat::Text => Dispatch::new(
                builder
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .finish(),
            ),
        };

        Self { dispatch }
    }

    /// Logger that drops everything. Used by tests.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Run `f` with this logger as the active dispatcher.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        ::tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Also route third-party crates' events (axum, sqlx) to this logger.
    ///
    /// Only binaries should call this. Returns `false` if a default was already set.
    pub fn install_as_process_default(&self) -> bool {
        ::tracing::dispatcher::set_global_default(self.dispatch.clone()).is_ok()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
