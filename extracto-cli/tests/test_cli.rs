use std::fs;
use std::process::Command;

fn extracto() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_extracto"));
    cmd.env_remove("RUST_LOG");
    cmd
}

const PROVINCIA: &str = "\
BANCO PROVINCIA - RESUMEN DE CUENTA
01-02-23 TRANSFERENCIA RECIBIDA - PEREZ JUAN 1.500,00 01-02 10.000,00
02-02-23 COMISION MANTENIMIENTO -350,00 02-02 9.650,00
";

#[test]
fn test_convert_writes_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("resumen.txt");
    fs::write(&input, PROVINCIA).unwrap();

    let out = extracto()
        .env("HOME", dir.path())
        .args(["convert", "--dialect", "provincia"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Wrote 2 transactions"));

    let csv = fs::read_to_string(dir.path().join("resumen_provincia_procesado.csv")).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "02/02/2023,COMISION MANTENIMIENTO,,-350.00,9650.00,Débito");
    assert_eq!(lines[2], "01/02/2023,TRANSFERENCIA RECIBIDA,PEREZ JUAN,1500.00,10000.00,Crédito");
}

#[test]
fn test_config_file_drops_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("resumen.txt");
    fs::write(&input, PROVINCIA).unwrap();
    let config = dir.path().join("extracto.toml");
    fs::write(&config, "[export]\ninclude_detail = false\ninclude_movement_kind = false\n").unwrap();
    let output = dir.path().join("out.csv");

    let status = extracto()
        .args(["convert", "-d", "provincia", "--config"])
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().next(), Some("fecha,descripcion,importe,saldo"));
}

#[test]
fn test_no_transactions_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("resumen.txt");
    fs::write(&input, PROVINCIA).unwrap();

    let out = extracto()
        .env("HOME", dir.path())
        .args(["convert", "--dialect", "galicia"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no transactions found for dialect 'galicia'"));
    assert!(!dir.path().join("resumen_galicia_procesado.csv").exists());
}

#[test]
fn test_unknown_dialect_is_rejected() {
    let out = extracto()
        .args(["convert", "--dialect", "santander", "x.txt"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown dialect 'santander'"));
}

#[test]
fn test_init_config_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();

    let first = extracto().env("HOME", dir.path()).arg("init-config").output().unwrap();
    assert!(first.status.success());
    let written = fs::read_to_string(dir.path().join(".extracto/config.toml")).unwrap();
    assert!(written.contains("zero_amount = \"debit\""));
    assert!(written.contains("pdftotext_command = \"pdftotext\""));

    let second = extracto().env("HOME", dir.path()).arg("init-config").output().unwrap();
    assert!(String::from_utf8_lossy(&second.stdout).contains("Config already exists"));
}
