//! Targeted table parser: walks the tree to a single table by position.

use scraper::{ElementRef, Html};

use crate::error::{Error, Result};
use crate::model::{Table, TableSet};

use super::grid::{self, AssembleMode, RawCell, RawRow};
use super::options::{ParseOptions, RaggedRows};
use super::TableParser;

/// Reads tables by direct traversal of `table > (thead|tbody|tfoot) > tr > (td|th)`.
///
/// Never rejects markup: missing closing tags are repaired by the tree
/// builder, ragged rows are always padded, and cells stay text.
#[derive(Debug, Clone, Default)]
pub struct TargetedParser {
    options: ParseOptions,
}

impl TargetedParser {
    /// Create a targeted parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a targeted parser with custom options.
    ///
    /// Type inference and ragged row rejection are ignored by this strategy.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    fn mode(&self) -> AssembleMode {
        AssembleMode {
            infer_types: false,
            ragged_rows: RaggedRows::Pad,
            span_policy: self.options.span_policy,
        }
    }

    fn read_table(&self, index: usize, table: ElementRef<'_>) -> Result<Table> {
        let mut rows = Vec::new();
        let mut caption = None;

        for child in table.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "caption" if caption.is_none() => {
                    caption = Some(grid::cell_text(child, self.options.normalize_unicode));
                }
                group @ ("thead" | "tbody" | "tfoot") => {
                    let in_head = group == "thead";
                    rows.extend(
                        child
                            .children()
                            .filter_map(ElementRef::wrap)
                            .filter(|e| e.value().name() == "tr")
                            .map(|tr| self.read_row(tr, in_head)),
                    );
                }
                "tr" => rows.push(self.read_row(child, false)),
                _ => {}
            }
        }

        log::debug!("TargetedParser: table {} has {} rows", index, rows.len());

        let parsed = grid::assemble(index, rows, self.mode())?;
        Ok(match caption.filter(|c| !c.is_empty()) {
            Some(caption) => parsed.with_caption(caption),
            None => parsed,
        })
    }

    fn read_row(&self, tr: ElementRef<'_>, in_head: bool) -> RawRow {
        RawRow {
            cells: tr
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|e| matches!(e.value().name(), "td" | "th"))
                .map(|cell| RawCell::from_element(cell, &self.options))
                .collect(),
            in_head,
        }
    }
}

/// Every `<table>` element in document (pre-)order.
fn tables(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "table")
}

impl TableParser for TargetedParser {
    fn name(&self) -> &str {
        "targeted"
    }

    fn parse_all(&self, source: &str) -> Result<TableSet> {
        let document = Html::parse_document(source);
        let set = tables(&document)
            .enumerate()
            .map(|(i, table)| self.read_table(i, table))
            .collect::<Result<TableSet>>()?;

        log::debug!("TargetedParser: found {} tables", set.len());
        Ok(set)
    }

    fn parse_one(&self, source: &str, index: usize) -> Result<Table> {
        let document = Html::parse_document(source);
        let found = tables(&document).nth(index);
        match found {
            Some(table) => self.read_table(index, table),
            None => Err(Error::TableIndexOutOfRange {
                index,
                count: count_tables(&document),
            }),
        }
    }
}

/// Number of `<table>` elements in a parsed document.
fn count_tables(document: &Html) -> usize {
    tables(document).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, TableRow};

    #[test]
    fn test_parse_one_reads_strings() {
        let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
        let table = TargetedParser::new().parse_one(html, 0).unwrap();

        assert!(table.has_header());
        assert_eq!(table.body()[0], TableRow::from_strings(["1", "2"]));
    }

    #[test]
    fn test_parse_one_by_index() {
        let html = "<table><tr><td>first</td></tr></table><table><tr><td>second</td></tr></table>";
        let table = TargetedParser::new().parse_one(html, 1).unwrap();
        assert_eq!(table.cell(0, 0), Some(&CellValue::String("second".into())));
    }

    #[test]
    fn test_parse_one_out_of_range() {
        let html = "<table><tr><td>only</td></tr></table>";
        let err = TargetedParser::new().parse_one(html, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::TableIndexOutOfRange { index: 1, count: 1 }
        ));
    }

    #[test]
    fn test_missing_closing_tags_tolerated() {
        let html = "<table><tr><td>a<td>b<tr><td>c";
        let table = TargetedParser::new().parse_one(html, 0).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(1, 1), Some(&CellValue::Empty));
    }

    #[test]
    fn test_nested_table_is_separate_entry() {
        let html = "<table><tr><td>outer<table><tr><td>inner</td></tr></table></td></tr></table>";
        let tables = TargetedParser::new().parse_all(html).unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].cell(0, 0), Some(&CellValue::String("outer".into())));
        assert_eq!(tables[0].row_count(), 1);
        assert_eq!(tables[1].cell(0, 0), Some(&CellValue::String("inner".into())));
    }
}
