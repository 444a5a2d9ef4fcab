use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Result, UnlockError};
use crate::logging::Logger;

use super::utils::generate_output_path;

/// Contenedor de un libro de Excel con su directorio de trabajo privado.
///
/// El directorio temporal se crea en [`WorkbookArchive::new`] y se libera en
/// [`WorkbookArchive::cleanup`] o, como muy tarde, al soltar la instancia.
pub struct WorkbookArchive {
    input_path: PathBuf,
    output_path: PathBuf,
    work_dir: PathBuf,
    temp_dir: Option<TempDir>,
    logger: Logger,
}

impl WorkbookArchive {
    /// Prepara el contenedor. Falla con [`UnlockError::NotFound`] antes de
    /// crear el directorio temporal si `input_path` no es un archivo.
    pub fn new(input_path: &Path, output_path: Option<&Path>, logger: Logger) -> Result<Self> {
        if !input_path.is_file() {
            return Err(UnlockError::NotFound {
                path: input_path.to_path_buf(),
            });
        }

        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| generate_output_path(input_path));

        let temp_dir = tempfile::Builder::new()
            .prefix("hojalibre-")
            .tempdir()
            .map_err(|e| UnlockError::io(std::env::temp_dir(), e))?;
        let work_dir = temp_dir.path().to_path_buf();

        logger.debug(format_args!(
            "Directorio temporal creado: {}",
            work_dir.display()
        ));

        Ok(Self {
            input_path: input_path.to_path_buf(),
            output_path,
            work_dir,
            temp_dir: Some(temp_dir),
            logger,
        })
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Raíz de extracción.
    pub fn temp_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Descomprime todas las entradas del contenedor en el directorio temporal.
    pub fn extract(&self) -> Result<()> {
        self.logger
            .info(format_args!("Descomprimiendo: {}", self.input_path.display()));

        let source_file =
            File::open(&self.input_path).map_err(|e| self.read_error(ZipError::Io(e)))?;
        let mut archive = ZipArchive::new(source_file).map_err(|e| self.read_error(e))?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| self.read_error(e))?;
            let Some(relative) = entry.enclosed_name() else {
                return Err(self.read_error(ZipError::InvalidArchive(
                    "entrada con ruta fuera del directorio de extracción".into(),
                )));
            };
            let target = self.work_dir.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target).map_err(|e| self.read_error(ZipError::Io(e)))?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| self.read_error(ZipError::Io(e)))?;
            }
            let mut out = File::create(&target).map_err(|e| self.read_error(ZipError::Io(e)))?;
            io::copy(&mut entry, &mut out).map_err(|e| self.read_error(ZipError::Io(e)))?;
        }

        self.logger.debug(format_args!(
            "{} entradas descomprimidas en {}",
            archive.len(),
            self.work_dir.display()
        ));
        Ok(())
    }

    /// Empaqueta el contenido actual del directorio temporal en `output_path`.
    ///
    /// Los nombres de entrada son rutas relativas con separador `/`,
    /// independientemente del sistema anfitrión.
    pub fn repack(&self) -> Result<()> {
        self.logger.info(format_args!(
            "Empaquetando de nuevo → {}",
            self.output_path.display()
        ));

        let target_file =
            File::create(&self.output_path).map_err(|e| self.write_error(ZipError::Io(e)))?;
        let mut writer = ZipWriter::new(target_file);
        let options =
            FileOptions::<'_, ()>::default().compression_method(CompressionMethod::Deflated);

        let mut written = 0_usize;
        for entry in WalkDir::new(&self.work_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| self.write_error(ZipError::Io(e.into())))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry_name(&self.work_dir, entry.path());
            writer
                .start_file(name, options)
                .map_err(|e| self.write_error(e))?;
            let mut source =
                File::open(entry.path()).map_err(|e| self.write_error(ZipError::Io(e)))?;
            io::copy(&mut source, &mut writer).map_err(|e| self.write_error(ZipError::Io(e)))?;
            written += 1;
        }

        writer.finish().map_err(|e| self.write_error(e))?;

        self.logger
            .debug(format_args!("Empaquetado completado ({written} archivos)."));
        Ok(())
    }

    /// Elimina el directorio temporal. Nunca falla; los errores se registran
    /// y se ignoran. Llamadas posteriores no tienen efecto.
    pub fn cleanup(&mut self) {
        let Some(temp_dir) = self.temp_dir.take() else {
            return;
        };
        match temp_dir.close() {
            Ok(()) => self.logger.debug("Directorio temporal eliminado."),
            Err(e) => {
                let _ = fs::remove_dir_all(&self.work_dir);
                self.logger.debug(format_args!(
                    "Limpieza parcial del directorio temporal {}: {e}",
                    self.work_dir.display()
                ));
            }
        }
    }

    fn read_error(&self, source: ZipError) -> UnlockError {
        UnlockError::archive_read(&self.input_path, source)
    }

    fn write_error(&self, source: ZipError) -> UnlockError {
        UnlockError::archive_write(&self.output_path, source)
    }
}

/// Nombre de entrada ZIP para `path` relativo a `root`, siempre con `/`.
fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
