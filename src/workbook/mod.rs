//! Workbook writing.
//!
//! Each table becomes one worksheet, rows written verbatim with the header
//! first. The workbook is serialized to memory, staged in a temporary file
//! next to the destination, and renamed into place, so a failed write never
//! leaves a partial file behind.

mod names;
mod options;

pub use names::{sanitize_sheet_name, sheet_names, validate_sheet_name, MAX_SHEET_NAME_LEN};
pub use options::{SheetNaming, WriteOptions, DEFAULT_EMPTY_SHEET, DEFAULT_SHEET_PREFIX};

use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::model::{CellValue, Table, TableSet};

/// Largest row count a worksheet can hold.
pub const MAX_ROWS: usize = 1_048_576;
/// Largest column count a worksheet can hold.
pub const MAX_COLUMNS: usize = 16_384;

/// Summary of a written workbook.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Destination path
    pub path: PathBuf,
    /// Sheet names in order
    pub sheets: Vec<String>,
    /// Bytes written
    pub bytes: usize,
}

/// Writes table sets to `.xlsx` workbooks.
#[derive(Debug, Clone, Default)]
pub struct WorkbookWriter {
    options: WriteOptions,
}

impl WorkbookWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Get the write options.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Write tables to `path`, replacing any existing file.
    pub fn write<P: AsRef<Path>>(&self, tables: &TableSet, path: P) -> Result<WriteSummary> {
        let path = path.as_ref();
        let (buffer, sheets) = self.build(tables)?;
        replace_file(path, &buffer)?;

        log::info!(
            "Wrote {} sheet(s), {} bytes to {}",
            sheets.len(),
            buffer.len(),
            path.display()
        );

        Ok(WriteSummary {
            path: path.to_path_buf(),
            sheets,
            bytes: buffer.len(),
        })
    }

    /// Serialize tables to `.xlsx` bytes.
    pub fn to_bytes(&self, tables: &TableSet) -> Result<Vec<u8>> {
        self.build(tables).map(|(buffer, _)| buffer)
    }

    fn build(&self, tables: &TableSet) -> Result<(Vec<u8>, Vec<String>)> {
        let mut workbook = Workbook::new();

        let names = if tables.is_empty() {
            validate_sheet_name(&self.options.empty_sheet_name)?;
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&self.options.empty_sheet_name)?;
            log::debug!("No tables; writing empty sheet {}", self.options.empty_sheet_name);
            vec![self.options.empty_sheet_name.clone()]
        } else {
            let names = sheet_names(tables, &self.options)?;
            for (table, name) in tables.iter().zip(&names) {
                let worksheet = workbook.add_worksheet();
                worksheet.set_name(name)?;
                write_table(worksheet, table)
                    .map_err(|e| Error::Workbook(format!("sheet {}: {}", name, e)))?;
                log::debug!(
                    "Sheet {}: {} rows x {} columns",
                    name,
                    table.row_count(),
                    table.column_count()
                );
            }
            names
        };

        let buffer = workbook.save_to_buffer()?;
        Ok((buffer, names))
    }
}

/// Write `bytes` to a temporary file beside `path`, then rename it into place.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write one table's rows into a worksheet, header first.
fn write_table(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    if table.row_count() > MAX_ROWS || table.column_count() > MAX_COLUMNS {
        return Err(Error::Workbook(format!(
            "{} rows x {} columns exceeds worksheet limits",
            table.row_count(),
            table.column_count()
        )));
    }

    for (r, row) in table.rows().iter().enumerate() {
        for (c, cell) in row.cells.iter().enumerate() {
            // Bounded by the limit check above.
            let (r, c) = (r as u32, c as u16);
            match cell {
                CellValue::String(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
                CellValue::Empty => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    fn sample() -> TableSet {
        vec![
            Table::from_rows(vec![
                TableRow::header(vec!["A".into(), "B".into()]),
                TableRow::new(vec![CellValue::Number(1.0), CellValue::Empty]),
            ]),
            Table::from_rows(vec![TableRow::from_strings(["x"])]),
        ]
        .into()
    }

    #[test]
    fn test_to_bytes_is_zip() {
        let bytes = WorkbookWriter::new().to_bytes(&sample()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_write_reports_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let summary = WorkbookWriter::new().write(&sample(), &path).unwrap();
        assert_eq!(summary.sheets, vec!["Table_1", "Table_2"]);
        assert_eq!(summary.bytes as u64, std::fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_empty_set_gets_placeholder_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        let summary = WorkbookWriter::new().write(&TableSet::new(), &path).unwrap();
        assert_eq!(summary.sheets, vec![DEFAULT_EMPTY_SHEET]);
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        std::fs::write(&path, b"old").unwrap();

        WorkbookWriter::new().write(&sample(), &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"PK"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_rename_leaves_no_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken.xlsx");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), b"keep").unwrap();

        let err = WorkbookWriter::new().write(&sample(), &path).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(path.is_dir());
        assert_eq!(std::fs::read(path.join("keep.txt")).unwrap(), b"keep");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");

        let err = WorkbookWriter::new().write(&sample(), &path).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!path.exists());
    }
}
