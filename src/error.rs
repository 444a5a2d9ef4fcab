//! Errores del proceso de desbloqueo.

use std::io;
use std::path::PathBuf;

use zip::result::ZipError;

/// Fallos posibles al desbloquear un libro de Excel.
#[derive(Debug, thiserror::Error)]
pub enum UnlockError {
    #[error("Archivo no encontrado: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("No se pudo leer el contenedor {}: {source}", path.display())]
    ArchiveRead { path: PathBuf, source: ZipError },

    #[error("No se pudo escribir el contenedor {}: {source}", path.display())]
    ArchiveWrite { path: PathBuf, source: ZipError },

    #[error("Error de E/S en {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("No se pudo configurar el registro: {message}")]
    Logging { message: String },
}

impl UnlockError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive_read(path: impl Into<PathBuf>, source: impl Into<ZipError>) -> Self {
        Self::ArchiveRead {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn archive_write(path: impl Into<PathBuf>, source: impl Into<ZipError>) -> Self {
        Self::ArchiveWrite {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnlockError>;
