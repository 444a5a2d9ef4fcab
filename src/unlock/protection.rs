use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Result, UnlockError};
use crate::logging::Logger;

use super::constants::{
    SHEET_PROTECTION_PATTERN, WORKBOOK_PROTECTION_PATTERN, WORKBOOK_XML, WORKSHEETS_DIR,
    XML_EXTENSION,
};

static SHEET_PROTECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SHEET_PROTECTION_PATTERN).expect("patrón de protección de hoja válido")
});

static WORKBOOK_PROTECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(WORKBOOK_PROTECTION_PATTERN).expect("patrón de protección de libro válido")
});

/// Recuento de etiquetas eliminadas por tipo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RemovalTally {
    pub(crate) sheet: usize,
    pub(crate) workbook: usize,
}

impl RemovalTally {
    pub(crate) fn total(self) -> usize {
        self.sheet + self.workbook
    }
}

/// Elimina `<sheetProtection>` y `<workbookProtection>` de los XML extraídos.
///
/// La eliminación es textual: el resto del documento no se vuelve a
/// serializar, de modo que atributos, prefijos y entidades quedan intactos.
pub struct ProtectionStripper {
    base_dir: PathBuf,
    targets: Vec<PathBuf>,
    removed_count: usize,
    logger: Logger,
}

impl ProtectionStripper {
    /// No accede al sistema de archivos.
    pub fn new(base_dir: &Path, logger: Logger) -> Self {
        logger.debug("ProtectionStripper inicializado.");
        Self {
            base_dir: base_dir.to_path_buf(),
            targets: Vec::new(),
            removed_count: 0,
            logger,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Total eliminado en la última llamada a [`ProtectionStripper::strip`].
    pub fn removed_count(&self) -> usize {
        self.removed_count
    }

    /// Archivos revisados en la última llamada a [`ProtectionStripper::strip`].
    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// Reúne el descriptor del libro y los XML de `xl/worksheets` (sin recursión).
    ///
    /// Las hojas aparecen en el orden en que las devuelve el sistema de archivos.
    pub fn collect_targets(&self) -> Result<Vec<PathBuf>> {
        let mut targets = vec![join_all(&self.base_dir, &WORKBOOK_XML)];

        let worksheets = join_all(&self.base_dir, &WORKSHEETS_DIR);
        if worksheets.is_dir() {
            let entries =
                fs::read_dir(&worksheets).map_err(|e| UnlockError::io(&worksheets, e))?;
            for entry in entries {
                let path = entry.map_err(|e| UnlockError::io(&worksheets, e))?.path();
                let is_xml = path.extension().is_some_and(|e| e == XML_EXTENSION);
                if is_xml && path.is_file() {
                    targets.push(path);
                }
            }
        }

        self.logger
            .debug(format_args!("{} archivos XML encontrados.", targets.len()));
        Ok(targets)
    }

    /// Recorre los archivos objetivo y devuelve el total de etiquetas eliminadas.
    ///
    /// Los objetivos inexistentes se omiten. Un archivo solo se reescribe si
    /// contenía al menos una coincidencia.
    pub fn strip(&mut self) -> Result<usize> {
        let targets = self.collect_targets()?;

        let mut tally = RemovalTally::default();
        for target in &targets {
            if !target.exists() {
                continue;
            }
            let removed = self.strip_file(target)?;
            tally.sheet += removed.sheet;
            tally.workbook += removed.workbook;
        }

        self.targets = targets;
        self.removed_count = tally.total();
        self.logger.info(format_args!(
            "Total de {} etiquetas de protección eliminadas ({} de hoja, {} de libro).",
            tally.total(),
            tally.sheet,
            tally.workbook
        ));
        Ok(self.removed_count)
    }

    fn strip_file(&self, path: &Path) -> Result<RemovalTally> {
        let content = fs::read_to_string(path).map_err(|e| UnlockError::io(path, e))?;
        let (cleaned, tally) = remove_protection_tags(&content);

        if tally.total() > 0 {
            fs::write(path, cleaned).map_err(|e| UnlockError::io(path, e))?;
            self.logger.debug(format_args!(
                "{}: {} etiquetas de protección eliminadas.",
                path.display(),
                tally.total()
            ));
        }
        Ok(tally)
    }
}

/// Quita todas las etiquetas de protección de `content`.
pub(crate) fn remove_protection_tags(content: &str) -> (String, RemovalTally) {
    let (without_sheet, sheet) = remove_matches(&SHEET_PROTECTION, content);
    let (cleaned, workbook) = remove_matches(&WORKBOOK_PROTECTION, &without_sheet);
    (cleaned, RemovalTally { sheet, workbook })
}

fn remove_matches(pattern: &Regex, content: &str) -> (String, usize) {
    let mut count = 0;
    let replaced = pattern.replace_all(content, |_: &Captures<'_>| {
        count += 1;
        ""
    });
    (replaced.into_owned(), count)
}

fn join_all(base: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(base.to_path_buf(), |path, part| path.join(part))
}
