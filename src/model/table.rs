//! Table types.

use super::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A rectangular table extracted from one `<table>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table, header first when present
    rows: Vec<TableRow>,

    /// Table caption
    pub caption: Option<String>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows, padding short rows with empty cells.
    ///
    /// Only the first row may be a header; a header flag on any later row is cleared.
    pub fn from_rows(rows: Vec<TableRow>) -> Self {
        let width = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                row.cells.resize(width, CellValue::Empty);
                row.is_header &= i == 0;
                row
            })
            .collect();
        Self {
            rows,
            caption: None,
        }
    }

    /// Set the caption and return self.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Get the number of rows, including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the first row is a header row.
    pub fn has_header(&self) -> bool {
        self.rows.first().is_some_and(|r| r.is_header)
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first().filter(|r| r.is_header)
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        if self.has_header() {
            &self.rows[1..]
        } else {
            &self.rows
        }
    }

    /// Header names mapped to their column index. First occurrence wins.
    pub fn header_map(&self) -> HashMap<String, usize> {
        let mut map = HashMap::new();
        if let Some(header) = self.header() {
            for (i, cell) in header.cells.iter().enumerate() {
                map.entry(cell.to_string()).or_insert(i);
            }
        }
        map
    }

    /// Find the column index of a header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header()?
            .cells
            .iter()
            .position(|c| c.to_string() == name)
    }

    /// Get a cell by row and column.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.cells.get(col)
    }

    /// Check that every row has the same number of cells.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.cells.len() == width)
    }

    /// Check whether another table holds the same values, allowing numeric coercion.
    pub fn matches(&self, other: &Table) -> bool {
        self.has_header() == other.has_header()
            && self.rows.len() == other.rows.len()
            && self.rows.iter().zip(&other.rows).all(|(a, b)| a.matches(b))
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<CellValue>,

    /// Whether this is a header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<CellValue>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(CellValue::text).collect())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn matches(&self, other: &TableRow) -> bool {
        self.cells.len() == other.cells.len()
            && self.cells.iter().zip(&other.cells).all(|(a, b)| a.matches(b))
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\t")
    }
}
