use anyhow::{Context, Result, bail};
use extracto_core::{Diagnostics, Warning};
use extracto_export::{TableExporter, write_csv_file};
use extracto_ingest::{Dialect, StatementDocument, TableExtractor, extract_with_fallback, parse};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::extractors::{CsvTable, PdfExtract, PdfToText, PlainText};

pub struct ConvertArgs {
    pub input: PathBuf,
    pub dialect: Dialect,
    pub tables: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub print_text: bool,
}

#[derive(Debug)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub transactions: usize,
    pub warnings: Vec<Warning>,
}

/// `<dir>/<stem>_<dialect>_procesado.csv`, next to the input.
pub fn default_output_path(input: &Path, dialect: Dialect) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "extracto".to_string());
    input.with_file_name(format!("{stem}_{dialect}_procesado.csv"))
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn extract_document(input: &Path, cfg: &Config, diagnostics: &mut Diagnostics) -> extracto_core::Result<StatementDocument> {
    if is_pdf(input) {
        let fallback = PdfToText {
            command: cfg.extraction.pdftotext_command.clone(),
        };
        extract_with_fallback(input, &PdfExtract, &fallback, diagnostics)
    } else {
        extract_with_fallback(
            input,
            &PlainText { lossy: false },
            &PlainText { lossy: true },
            diagnostics,
        )
    }
}

pub fn convert(args: &ConvertArgs, cfg: &Config) -> Result<ConvertReport> {
    let mut diagnostics = Diagnostics::new();

    let document = match extract_document(&args.input, cfg, &mut diagnostics) {
        Ok(doc) => doc,
        // table files alone are enough for the table-driven dialect
        Err(err) if !args.tables.is_empty() => {
            tracing::warn!(error = %err, "continuing with table files only");
            StatementDocument::default()
        }
        Err(err) => return Err(err).with_context(|| format!("read {}", args.input.display())),
    };

    let mut tables = Vec::with_capacity(args.tables.len());
    for path in &args.tables {
        let rows = CsvTable
            .extract_table_rows(path)
            .with_context(|| format!("read table {}", path.display()))?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "table loaded");
        tables.push(rows);
    }
    let document = document.with_tables(tables);

    if args.print_text {
        for line in document.text().lines() {
            println!("{line}");
        }
    }

    let outcome = match parse(&document, args.dialect, &cfg.parse).require_transactions() {
        Ok(outcome) => outcome,
        Err(err) => bail!("{err}: check that '{}' matches the bank of {}", args.dialect, args.input.display()),
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, args.dialect));
    let table = TableExporter::export(&outcome.transactions, &cfg.export);
    write_csv_file(&table, &output).with_context(|| format!("write {}", output.display()))?;

    let mut warnings = diagnostics.into_warnings();
    warnings.extend(outcome.warnings);
    Ok(ConvertReport {
        output,
        transactions: outcome.transactions.len(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_output_path() {
        let out = default_output_path(Path::new("/tmp/resumen enero.pdf"), Dialect::GaliciaTable);
        assert_eq!(out, PathBuf::from("/tmp/resumen enero_galicia-tabla_procesado.csv"));
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("a.PDF")));
        assert!(!is_pdf(Path::new("a.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_convert_text_statement() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("enero.txt");
        fs::write(
            &input,
            "Fecha       Descripcion                     Importe      Saldo\n\
             01/02/2023  TRANSFERENCIA - JUAN PEREZ     1.500,00   10.000,00\n\
             03/02/2023  COMPRA DEBITO - SUPERMERCADO   -250,50     9.749,50\n",
        )
        .unwrap();

        let args = ConvertArgs {
            input: input.clone(),
            dialect: Dialect::Galicia,
            tables: Vec::new(),
            output: None,
            print_text: false,
        };
        let report = convert(&args, &Config::default()).unwrap();

        assert_eq!(report.transactions, 2);
        assert!(report.warnings.is_empty());
        assert_eq!(report.output, dir.path().join("enero_galicia_procesado.csv"));

        let csv = fs::read_to_string(&report.output).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "fecha,descripcion,detalle,importe,saldo,tipo_movimiento");
        assert_eq!(lines[1], "03/02/2023,COMPRA DEBITO,SUPERMERCADO,-250.50,9749.50,Débito");
        assert_eq!(lines[2], "01/02/2023,TRANSFERENCIA,JUAN PEREZ,1500.00,10000.00,Crédito");
    }

    #[test]
    fn test_convert_without_matches_fails_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vacio.txt");
        fs::write(&input, "nada que ver aqui\n").unwrap();

        let args = ConvertArgs {
            input: input.clone(),
            dialect: Dialect::Provincia,
            tables: Vec::new(),
            output: None,
            print_text: false,
        };
        let err = convert(&args, &Config::default()).unwrap_err();

        assert!(err.to_string().contains("no transactions found for dialect 'provincia'"));
        assert!(!default_output_path(&input, Dialect::Provincia).exists());
    }

    #[test]
    fn test_convert_generic_from_table_file_only() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("pagina1.csv");
        fs::write(
            &table,
            "Fecha,Concepto,Importe,Saldo\n\
             05/03/2023,PAGO SERVICIO ELECTRICIDAD,\"-3.200,00\",\"46.800,00\"\n",
        )
        .unwrap();
        let output = dir.path().join("salida.csv");

        let args = ConvertArgs {
            input: dir.path().join("no-existe.pdf"),
            dialect: Dialect::Generic,
            tables: vec![table],
            output: Some(output.clone()),
            print_text: false,
        };
        let report = convert(&args, &Config {
            extraction: crate::config::ExtractionSection {
                pdftotext_command: "extracto-no-such-binary".to_string(),
            },
            ..Config::default()
        })
        .unwrap();

        assert_eq!(report.transactions, 1);
        assert_eq!(report.output, output);
        let csv = fs::read_to_string(&output).unwrap();
        assert!(csv.contains("05/03/2023,PAGO SERVICIO ELECTRICIDAD,,-3200.00,46800.00,Débito"));
    }
}
