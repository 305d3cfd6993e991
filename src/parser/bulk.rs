//! Bulk table parser: selects every table of a document in one pass.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};
use crate::model::{Table, TableSet};

use super::balance::check_balance;
use super::grid::{self, AssembleMode, RawCell, RawRow};
use super::options::{ErrorMode, ParseOptions};
use super::TableParser;

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("table selector is valid"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("row selector is valid"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").expect("cell selector is valid"));
static CAPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("caption").expect("caption selector is valid"));

/// Parses the whole document at once and types numeric cells.
///
/// In strict mode the source must have as many `</table>` tags as `<table>`
/// tags, otherwise table boundaries are considered unknown. Tags are counted
/// on the token stream, so table markup quoted in scripts or attributes does
/// not count.
#[derive(Debug, Clone, Default)]
pub struct BulkParser {
    options: ParseOptions,
}

impl BulkParser {
    /// Create a bulk parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bulk parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    fn mode(&self) -> AssembleMode {
        AssembleMode {
            infer_types: self.options.infer_types,
            ragged_rows: self.options.ragged_rows,
            span_policy: self.options.span_policy,
        }
    }

    fn read_table(&self, index: usize, table: ElementRef<'_>) -> Result<Table> {
        let rows: Vec<RawRow> = table
            .select(&ROW_SELECTOR)
            .filter(|tr| owner(*tr, &["table"]) == Some(table))
            .map(|tr| RawRow {
                cells: tr
                    .select(&CELL_SELECTOR)
                    .filter(|cell| owner(*cell, &["tr"]) == Some(tr))
                    .map(|cell| RawCell::from_element(cell, &self.options))
                    .collect(),
                in_head: section(tr) == Some("thead"),
            })
            .collect();

        log::debug!("BulkParser: table {} has {} rows", index, rows.len());

        let mut parsed = grid::assemble(index, rows, self.mode())?;
        let caption = table
            .select(&CAPTION_SELECTOR)
            .find(|c| owner(*c, &["table"]) == Some(table))
            .map(|c| grid::cell_text(c, self.options.normalize_unicode))
            .filter(|c| !c.is_empty());
        if let Some(caption) = caption {
            parsed = parsed.with_caption(caption);
        }
        Ok(parsed)
    }
}

impl TableParser for BulkParser {
    fn name(&self) -> &str {
        "bulk"
    }

    fn parse_all(&self, source: &str) -> Result<TableSet> {
        if self.options.error_mode == ErrorMode::Strict {
            check_balance(source)?;
        }

        let document = Html::parse_document(source);
        let tables = document
            .select(&TABLE_SELECTOR)
            .enumerate()
            .map(|(i, table)| self.read_table(i, table))
            .collect::<Result<TableSet>>()?;

        log::debug!("BulkParser: found {} tables", tables.len());
        Ok(tables)
    }

    fn parse_one(&self, source: &str, index: usize) -> Result<Table> {
        let tables = self.parse_all(source)?;
        let count = tables.len();
        tables
            .into_iter()
            .nth(index)
            .ok_or(Error::TableIndexOutOfRange { index, count })
    }
}

/// Nearest ancestor element whose name is in `names`.
fn owner<'a>(element: ElementRef<'a>, names: &[&str]) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| names.contains(&a.value().name()))
}

/// Name of the row group (`thead`, `tbody`, `tfoot`) a row belongs to.
fn section(row: ElementRef<'_>) -> Option<&str> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .map(|a| a.value().name())
        .find(|name| matches!(*name, "thead" | "tbody" | "tfoot" | "table"))
        .filter(|name| *name != "table")
}
