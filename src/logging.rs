//! Registro de eventos basado en `tracing`.
//!
//! Cada componente recibe un [`Logger`] al construirse. El nombre del logger
//! se adjunta como campo `component` a cada evento, de modo que la salida
//! conserva la jerarquía `hojalibre.pipeline.archive` sin un registro global.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt as subscriber_fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{Result, UnlockError};

/// Nombre raíz de todos los loggers del paquete.
pub const ROOT_LOGGER: &str = "hojalibre";

/// Manejador de registro con nombre jerárquico.
#[derive(Clone, Debug)]
pub struct Logger {
    name: String,
}

impl Logger {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Deriva un logger hijo (`padre.hijo`).
    pub fn child(&self, name: &str) -> Self {
        Self {
            name: format!("{}.{}", self.name, name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug(&self, message: impl fmt::Display) {
        tracing::debug!(component = %self.name, "{message}");
    }

    pub fn info(&self, message: impl fmt::Display) {
        tracing::info!(component = %self.name, "{message}");
    }

    pub fn warn(&self, message: impl fmt::Display) {
        tracing::warn!(component = %self.name, "{message}");
    }

    pub fn error(&self, message: impl fmt::Display) {
        tracing::error!(component = %self.name, "{message}");
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::named(ROOT_LOGGER)
    }
}

/// Niveles aceptados por la línea de comandos.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            other => Err(format!(
                "nivel de registro inválido `{other}` (DEBUG, INFO, WARNING, ERROR)"
            )),
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Configura el suscriptor global: salida por stderr y, opcionalmente, un
/// archivo de registro en modo anexado.
pub fn init(level: LogLevel, logfile: Option<&Path>) -> Result<()> {
    let file_layer = match logfile {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| UnlockError::io(parent, e))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| UnlockError::io(path, e))?;
            Some(
                subscriber_fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level.into()))
        .with(subscriber_fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| UnlockError::Logging {
            message: e.to_string(),
        })
}
