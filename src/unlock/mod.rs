//! Eliminación de la protección de hojas y libros en contenedores Excel.

mod archive;
mod constants;
mod pipeline;
mod protection;
mod utils;

pub use archive::WorkbookArchive;
pub use constants::{OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS};
pub use pipeline::{Stage, UnlockOutcome, UnlockPipeline};
pub use protection::ProtectionStripper;
pub use utils::{generate_output_path, has_supported_extension};
