//! Pruebas de integración de la línea de comandos.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Ejecuta el binario y devuelve (stdout, stderr, código de salida).
fn run_hojalibre(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_hojalibre"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("no se pudo ejecutar hojalibre");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn write_protected_workbook(path: &Path) {
    let file = File::create(path).expect("crear libro");
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::<'_, ()>::default().compression_method(CompressionMethod::Deflated);

    writer.start_file("xl/workbook.xml", options).unwrap();
    writer
        .write_all(br#"<workbook><workbookProtection lockStructure="1"/><sheets/></workbook>"#)
        .unwrap();
    writer
        .start_file("xl/worksheets/sheet1.xml", options)
        .unwrap();
    writer
        .write_all(br#"<worksheet><sheetData/><sheetProtection sheet="1"/></worksheet>"#)
        .unwrap();
    writer.finish().unwrap();
}

fn read_member(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut contents = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    contents
}

#[test]
fn help_lists_arguments() {
    let (stdout, _stderr, exit_code) = run_hojalibre(&["--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("<INPUT>"));
    assert!(stdout.contains("[OUTPUT]"));
    assert!(stdout.contains("--logfile"));
}

#[test]
fn missing_input_argument_is_usage_error() {
    let (_stdout, stderr, exit_code) = run_hojalibre(&[]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<INPUT>"));
}

#[test]
fn unlocks_file_with_default_output_name() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("horas.xlsx");
    write_protected_workbook(&input);

    let (stdout, _stderr, exit_code) = run_hojalibre(&[input.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("en total 2 entradas"));

    let output = dir.path().join("horas_unlocked.xlsx");
    assert!(!read_member(&output, "xl/workbook.xml").contains("workbookProtection"));
    assert!(!read_member(&output, "xl/worksheets/sheet1.xml").contains("sheetProtection"));
}

#[test]
fn writes_log_file_when_requested() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("macros.xlsm");
    let output = dir.path().join("salida.xlsm");
    let logfile = dir.path().join("logs").join("output.log");
    write_protected_workbook(&input);

    let (_stdout, _stderr, exit_code) = run_hojalibre(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--log",
        "DEBUG",
        "--logfile",
        logfile.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0);
    assert!(output.is_file());
    let log = fs::read_to_string(&logfile).unwrap();
    assert!(log.contains("Descomprimiendo"));
    assert!(log.contains("hojalibre.pipeline.stripper"));
}

#[test]
fn nonexistent_input_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fantasma.xlsx");

    let (_stdout, stderr, exit_code) = run_hojalibre(&[input.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Archivo no encontrado"));
}

#[test]
fn corrupt_input_reports_failure_status() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("roto.xlsx");
    fs::write(&input, "no es un zip").unwrap();

    let (_stdout, stderr, exit_code) = run_hojalibre(&[input.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Error (tras etapa preparado): No se pudo leer el contenedor"));
    assert!(!dir.path().join("roto_unlocked.xlsx").exists());
}
