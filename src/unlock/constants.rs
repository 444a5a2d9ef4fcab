//! Rutas y patrones compartidos del proceso de desbloqueo.

/// Descriptor del libro dentro del contenedor.
pub const WORKBOOK_XML: [&str; 2] = ["xl", "workbook.xml"];

/// Directorio con un XML por hoja de cálculo.
pub const WORKSHEETS_DIR: [&str; 2] = ["xl", "worksheets"];

pub const XML_EXTENSION: &str = "xml";

/// Sufijo insertado antes de la extensión en la ruta de salida por defecto.
pub const OUTPUT_SUFFIX: &str = "_unlocked";

/// Extensiones de contenedor reconocidas (libro normal y libro con macros).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm"];

pub const SHEET_PROTECTION_PATTERN: &str = r"<sheetProtection[^>]*?/?>";
pub const WORKBOOK_PROTECTION_PATTERN: &str = r"<workbookProtection[^>]*?/?>";
