//! Process logging bootstrap.
//!
//! # Invariants
//! - Initialization happens once per process; repeating it with the same
//!   settings is a no-op, different settings are rejected.
//! - Initialization never panics.
//! - Passwords, tokens and note bodies are never logged.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "notekeep";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Destination of log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Size-rotated files under an absolute directory.
    Dir(PathBuf),
}

impl LogTarget {
    /// Maps the `LOG_DIR` setting; unset or blank means stderr.
    pub fn from_setting(log_dir: Option<&str>) -> Result<Self, String> {
        let Some(raw) = log_dir.map(str::trim).filter(|dir| !dir.is_empty()) else {
            return Ok(Self::Stderr);
        };
        let dir = PathBuf::from(raw);
        if !dir.is_absolute() {
            return Err(format!("log directory must be absolute, got `{raw}`"));
        }
        Ok(Self::Dir(dir))
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Dir(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Starts the process logger.
///
/// # Errors
/// - `level` is not one of `off|error|warn|info|debug|trace`.
/// - `log_dir` is relative or cannot be created.
/// - Logging is already active with a different level or target.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), String> {
    let level = parse_level(level)?;
    let target = LogTarget::from_setting(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_logger(level, target.clone()))?;
    if active.level != level || active.target != target {
        return Err(format!(
            "logging already initialized as {}@{}; refusing to switch to {}@{}",
            active.level, active.target, level, target
        ));
    }
    Ok(())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(raw.trim())
        .map_err(|_| format!("unsupported log level `{raw}`; expected trace|debug|info|warn|error"))
}

fn start_logger(level: LevelFilter, target: LogTarget) -> Result<ActiveLogger, String> {
    let spec = level.as_str().to_ascii_lowercase();
    let logger =
        Logger::try_with_str(&spec).map_err(|err| format!("invalid log level `{spec}`: {err}"))?;

    let logger = match &target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format),
        LogTarget::Dir(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
    };
    let handle = logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();
    info!(
        "event=logging_init module=core status=ok level={} target={} version={}",
        spec,
        target,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        target,
        _handle: handle,
    })
}

// Called only from the one-time logger start.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            single_line(message, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous(info);
    }));
}

fn single_line(text: &str, max_chars: usize) -> String {
    let mut line: String = text
        .chars()
        .take(max_chars)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if text.chars().nth(max_chars).is_some() {
        line.push_str("...");
    }
    line
}
