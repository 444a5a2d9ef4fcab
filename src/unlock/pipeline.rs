use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, UnlockError};
use crate::logging::Logger;

use super::archive::WorkbookArchive;
use super::protection::ProtectionStripper;

/// Etapas que recorre una ejecución.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Constructed,
    Extracted,
    Stripped,
    Repacked,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Constructed => "preparado",
            Stage::Extracted => "descomprimido",
            Stage::Stripped => "limpiado",
            Stage::Repacked => "empaquetado",
        };
        f.write_str(label)
    }
}

/// Resultado de [`UnlockPipeline::run`].
#[derive(Debug)]
pub enum UnlockOutcome {
    Success {
        removed: usize,
        output_path: PathBuf,
    },
    /// `last_stage` es la última etapa completada antes del fallo.
    Failure {
        last_stage: Stage,
        cause: UnlockError,
    },
}

impl UnlockOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UnlockOutcome::Success { .. })
    }

    pub fn removed(&self) -> Option<usize> {
        match self {
            UnlockOutcome::Success { removed, .. } => Some(*removed),
            UnlockOutcome::Failure { .. } => None,
        }
    }

    pub fn status_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UnlockOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnlockOutcome::Success {
                removed,
                output_path,
            } => write!(
                f,
                "Protección eliminada (en total {removed} entradas) → archivo de salida: {}",
                output_path.display()
            ),
            UnlockOutcome::Failure { last_stage, cause } => {
                write!(f, "Error (tras etapa {last_stage}): {cause}")
            }
        }
    }
}

/// Coordina el desbloqueo completo: descomprimir, limpiar, empaquetar y
/// eliminar el directorio temporal.
pub struct UnlockPipeline {
    archive: WorkbookArchive,
    stripper: ProtectionStripper,
    logger: Logger,
}

impl UnlockPipeline {
    pub fn new(input_path: &Path, output_path: Option<&Path>) -> Result<Self> {
        Self::with_logger(input_path, output_path, Logger::default())
    }

    /// Igual que [`UnlockPipeline::new`] con un logger raíz explícito.
    pub fn with_logger(
        input_path: &Path,
        output_path: Option<&Path>,
        logger: Logger,
    ) -> Result<Self> {
        let logger = logger.child("pipeline");
        let archive = WorkbookArchive::new(input_path, output_path, logger.child("archive"))?;
        let stripper = ProtectionStripper::new(archive.temp_dir(), logger.child("stripper"));
        logger.debug("UnlockPipeline inicializado.");

        Ok(Self {
            archive,
            stripper,
            logger,
        })
    }

    pub fn input_path(&self) -> &Path {
        self.archive.input_path()
    }

    pub fn output_path(&self) -> &Path {
        self.archive.output_path()
    }

    pub fn temp_dir(&self) -> &Path {
        self.archive.temp_dir()
    }

    /// Ejecuta todas las etapas. Nunca propaga errores: el fallo se devuelve
    /// como [`UnlockOutcome::Failure`]. El directorio temporal se elimina
    /// exactamente una vez antes de retornar.
    pub fn run(mut self) -> UnlockOutcome {
        let mut stage = Stage::Constructed;
        let result = self.run_stages(&mut stage);
        self.archive.cleanup();

        let outcome = match result {
            Ok(removed) => UnlockOutcome::Success {
                removed,
                output_path: self.archive.output_path().to_path_buf(),
            },
            Err(cause) => UnlockOutcome::Failure {
                last_stage: stage,
                cause,
            },
        };

        if outcome.is_success() {
            self.logger.info(&outcome);
        } else {
            self.logger.error(&outcome);
        }
        outcome
    }

    fn run_stages(&mut self, stage: &mut Stage) -> Result<usize> {
        self.archive.extract()?;
        *stage = Stage::Extracted;

        let removed = self.stripper.strip()?;
        *stage = Stage::Stripped;

        self.archive.repack()?;
        *stage = Stage::Repacked;

        Ok(removed)
    }
}
