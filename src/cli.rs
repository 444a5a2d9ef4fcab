use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "hojalibre")]
#[command(version)]
#[command(
    about = "Elimina la protección de hojas y libros en archivos Excel (.xlsx / .xlsm).",
    long_about = None
)]
#[command(after_help = "Ejemplos:\n  \
  hojalibre mi_archivo.xlsx\n  \
  hojalibre mi_archivo.xlsx --log DEBUG --logfile logs/output.log")]
pub struct Cli {
    /// Ruta del archivo Excel protegido
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Ruta del archivo desbloqueado (por defecto: <nombre>_unlocked.<ext>)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Nivel de registro: DEBUG, INFO, WARNING o ERROR
    #[arg(long = "log", value_name = "LEVEL", default_value = "INFO")]
    pub log: LogLevel,

    /// Archivo de registro opcional (por ejemplo logs/output.log)
    #[arg(long = "logfile", value_name = "PATH")]
    pub logfile: Option<PathBuf>,
}
