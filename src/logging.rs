//! Logging
//!
//! The store only emits `tracing` events. An embedding application calls
//! [`init_logging`] once to install a subscriber; library code never does.

use crate::config::xdg;
use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_ENV: &str = "SYNCSTORE_LOG";
const FORMAT_ENV: &str = "SYNCSTORE_LOG_FORMAT";
const OUTPUT_ENV: &str = "SYNCSTORE_LOG_OUTPUT";
const FILE_ENV: &str = "SYNCSTORE_LOG_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(StoreError::Logging(format!("unknown log format '{other}'"))),
        }
    }
}

/// Where events are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    #[default]
    Stderr,
    File,
}

impl FromStr for LogOutput {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            "file" => Ok(Self::File),
            other => Err(StoreError::Logging(format!("unknown log output '{other}'"))),
        }
    }
}

/// The `[logging]` section of the settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// An `EnvFilter` directive; a bare level such as `info` is the usual case
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Used with `output = "file"`; None means the platform state directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// ANSI colours for text written to a terminal stream
    #[serde(default = "enabled_by_default")]
    pub color: bool,
}

fn enabled_by_default() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file: None,
            color: true,
        }
    }
}

impl LoggingConfig {
    /// `SYNCSTORE_LOG_FORMAT` if set, else the configured format.
    fn effective_format(&self) -> Result<LogFormat> {
        match std::env::var(FORMAT_ENV) {
            Ok(value) if !value.is_empty() => value.parse(),
            _ => Ok(self.format),
        }
    }

    /// `SYNCSTORE_LOG_OUTPUT` if set, else the configured output.
    fn effective_output(&self) -> Result<LogOutput> {
        match std::env::var(OUTPUT_ENV) {
            Ok(value) if !value.is_empty() => value.parse(),
            _ => Ok(self.output),
        }
    }

    /// `SYNCSTORE_LOG` wins over the configured level.
    fn filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level)
            .map_err(|e| StoreError::Logging(format!("invalid level '{}': {e}", self.level)))
    }
}

/// Log file location: `SYNCSTORE_LOG_FILE`, then `configured`, then the
/// platform default.
pub fn resolve_log_file_path(configured: Option<PathBuf>) -> Result<PathBuf> {
    let from_env = std::env::var_os(FILE_ENV)
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty());
    match from_env.or(configured.filter(|p| !p.as_os_str().is_empty())) {
        Some(path) => Ok(path),
        None => xdg::default_log_file_path(),
    }
}

fn open_log_file(configured: Option<PathBuf>) -> Result<BoxMakeWriter> {
    let path = resolve_log_file_path(configured)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Install the global subscriber. `None` means defaults.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<()> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    let installed = if !config.enabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .try_init()
    } else {
        let output = config.effective_output()?;
        let writer = match output {
            LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
            LogOutput::File => open_log_file(config.file.clone())?,
        };
        let registry = Registry::default().with(config.filter()?);
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer);

        match config.effective_format()? {
            LogFormat::Json => registry.with(layer.json()).try_init(),
            LogFormat::Text => registry
                .with(layer.with_ansi(config.color && output != LogOutput::File))
                .try_init(),
        }
    };
    installed.map_err(|e| StoreError::Logging(e.to_string()))
}
