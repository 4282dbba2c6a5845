//! Progress logging.
//!
//! Pipeline steps report through the `log_*` helpers, which emit `tracing`
//! events. The binary installs a stderr subscriber with [`init_logging`];
//! library users bring their own.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level for progress messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Emit a progress message at `level`, indented by `indent` steps.
pub fn log(level: LogLevel, message: impl AsRef<str>, indent: u8) {
    let pad = "   ".repeat(indent as usize);
    let message = message.as_ref();
    match level {
        LogLevel::Info => tracing::info!("{}{}", pad, message),
        LogLevel::Success => tracing::info!("{}✓ {}", pad, message),
        LogLevel::Warning => tracing::warn!("{}{}", pad, message),
        LogLevel::Error => tracing::error!("{}{}", pad, message),
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl AsRef<str>) {
    log(LogLevel::Info, msg, 0);
}

pub fn log_success(msg: impl AsRef<str>) {
    log(LogLevel::Success, msg, 0);
}

pub fn log_warning(msg: impl AsRef<str>) {
    log(LogLevel::Warning, msg, 0);
}

pub fn log_error(msg: impl AsRef<str>) {
    log(LogLevel::Error, msg, 0);
}

pub fn log_info_indent(msg: impl AsRef<str>, indent: u8) {
    log(LogLevel::Info, msg, indent);
}

/// Install the stderr subscriber. `RUST_LOG` wins over `default_level`.
///
/// Calling it twice is harmless; the second subscriber is ignored.
pub fn init_logging(default_level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
