//! Herramientas para eliminar la protección de hojas y libros en archivos Excel.
//!
//! El proceso descomprime el contenedor en un directorio temporal, elimina
//! las etiquetas `<sheetProtection>` y `<workbookProtection>` de los XML
//! relevantes y vuelve a empaquetar el resultado en un archivo nuevo.

pub mod cli;
pub mod error;
pub mod logging;
pub mod unlock;

pub use error::{Result, UnlockError};
pub use logging::Logger;
pub use unlock::{
    ProtectionStripper, Stage, UnlockOutcome, UnlockPipeline, WorkbookArchive,
    generate_output_path,
};
