//! CSV serialization of export tables.

use extracto_core::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::table::Table;

/// Write `table` as CSV (header row first) into `out`.
pub fn write_csv<W: Write>(table: &Table, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(table.headers())?;
    for record in table.records() {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `table` to a CSV file at `path`, replacing any existing file.
pub fn write_csv_file(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(table, file)?;
    tracing::info!(path = %path.display(), rows = table.len(), "table written");
    Ok(())
}
