//! Result table serialization: xlsx, CSV, and JSON.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OutputError;
use crate::models::record::{ResultTable, COLUMNS};

/// File format for the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Excel workbook, one sheet.
    Xlsx,
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array of records keyed by column name.
    Json,
}

impl OutputFormat {
    /// Infer the format from a file extension; anything unrecognized is xlsx.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            _ => Self::Xlsx,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Write `table` to `path` in `format`.
pub fn write_table(table: &ResultTable, path: &Path, format: OutputFormat) -> Result<(), OutputError> {
    match format {
        OutputFormat::Xlsx => write_xlsx(table, path)?,
        OutputFormat::Csv => write_csv(table, path)?,
        OutputFormat::Json => write_json(table, path)?,
    }

    debug!(
        "Wrote {} rows as {} to {}",
        table.len(),
        format.extension(),
        path.display()
    );
    Ok(())
}

fn write_xlsx(table: &ResultTable, path: &Path) -> Result<(), OutputError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, record) in table.records().iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in record.cells().iter().enumerate() {
            // Absent values stay empty cells
            if let Some(value) = cell {
                worksheet.write_string(row, col as u16, *value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv(table: &ResultTable, path: &Path) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(COLUMNS)?;
    for record in table.records() {
        wtr.write_record(record.cells().map(|cell| cell.unwrap_or("")))?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_json(table: &ResultTable, path: &Path) -> Result<(), OutputError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}
