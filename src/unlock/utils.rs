//! Utilidades compartidas para derivar rutas.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::constants::{OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS};

/// Genera la ruta de salida por defecto: `{nombre}_unlocked{.ext}` en el mismo directorio.
pub fn generate_output_path(path: &Path) -> PathBuf {
    let mut file_name: OsString = path.file_stem().unwrap_or_default().to_os_string();
    file_name.push(OUTPUT_SUFFIX);
    if let Some(extension) = path.extension() {
        file_name.push(".");
        file_name.push(extension);
    }
    path.with_file_name(file_name)
}

/// Indica si la extensión corresponde a un libro `.xlsx` o `.xlsm`.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}
