//! Ordered collection of tables from one document.

use super::Table;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// All tables found in one document, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSet {
    tables: Vec<Table>,
}

impl TableSet {
    /// Create an empty table set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table.
    pub fn push(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if no tables were found.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get a table by zero-based index.
    pub fn get(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    /// Iterate over tables in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.tables.iter()
    }

    /// Total number of rows across all tables.
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(Table::row_count).sum()
    }
}

impl From<Vec<Table>> for TableSet {
    fn from(tables: Vec<Table>) -> Self {
        Self { tables }
    }
}

impl FromIterator<Table> for TableSet {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for TableSet {
    type Output = Table;

    fn index(&self, index: usize) -> &Table {
        &self.tables[index]
    }
}

impl IntoIterator for TableSet {
    type Item = Table;
    type IntoIter = std::vec::IntoIter<Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}

impl<'a> IntoIterator for &'a TableSet {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
