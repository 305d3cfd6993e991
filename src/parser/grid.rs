//! Cell text extraction and grid assembly shared by both parse strategies.

use scraper::{ElementRef, Node};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{CellValue, Table, TableRow};

use super::options::{ParseOptions, RaggedRows, SpanPolicy};

/// Upper bound browsers apply to `colspan`.
const MAX_COLSPAN: usize = 1000;
/// Upper bound browsers apply to `rowspan`.
const MAX_ROWSPAN: usize = 65534;

/// A cell as read from markup, before span expansion.
#[derive(Debug, Clone)]
pub(crate) struct RawCell {
    pub text: String,
    pub colspan: usize,
    /// 0 means "to the last row"
    pub rowspan: usize,
    pub is_th: bool,
}

impl RawCell {
    pub fn from_element(cell: ElementRef<'_>, options: &ParseOptions) -> Self {
        Self {
            text: cell_text(cell, options.normalize_unicode),
            colspan: span_attr(cell, "colspan", MAX_COLSPAN).max(1),
            rowspan: span_attr(cell, "rowspan", MAX_ROWSPAN),
            is_th: cell.value().name() == "th",
        }
    }
}

/// A row as read from markup.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawRow {
    pub cells: Vec<RawCell>,
    /// Row sits inside `<thead>`
    pub in_head: bool,
}

impl RawRow {
    /// Structurally marked as a header: inside `<thead>` or made only of `<th>` cells.
    fn is_header(&self) -> bool {
        !self.cells.is_empty() && (self.in_head || self.cells.iter().all(|c| c.is_th))
    }
}

/// How a strategy wants the grid turned into typed cells.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AssembleMode {
    pub infer_types: bool,
    pub ragged_rows: RaggedRows,
    pub span_policy: SpanPolicy,
}

/// Expand spans, check shape, and type the cells of one table.
///
/// `index` is the table's position in the document and only appears in errors.
pub(crate) fn assemble(index: usize, rows: Vec<RawRow>, mode: AssembleMode) -> Result<Table> {
    let rows: Vec<RawRow> = rows.into_iter().filter(|r| !r.cells.is_empty()).collect();
    let first_is_header = rows.first().is_some_and(RawRow::is_header);
    let grid = place_cells(&rows, mode.span_policy);

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    if mode.ragged_rows == RaggedRows::Reject {
        for (r, row) in grid.iter().enumerate() {
            let found = row.iter().filter(|c| c.is_some()).count();
            if found != width {
                return Err(Error::RaggedRow {
                    table: index,
                    row: r,
                    expected: width,
                    found,
                });
            }
        }
    }

    let typed = grid
        .into_iter()
        .enumerate()
        .map(|(r, row)| {
            let header = r == 0 && first_is_header;
            let cells = row
                .into_iter()
                .map(|slot| match slot {
                    None => CellValue::Empty,
                    Some(text) if header || !mode.infer_types => CellValue::text(text),
                    Some(text) => CellValue::infer(text),
                })
                .collect();
            if header {
                TableRow::header(cells)
            } else {
                TableRow::new(cells)
            }
        })
        .collect();

    Ok(Table::from_rows(typed))
}

/// Lay cells out on a grid, honoring rowspan and colspan.
///
/// A slot already claimed by an earlier span keeps its value. Spans never add
/// rows past the last source row.
fn place_cells(rows: &[RawRow], policy: SpanPolicy) -> Vec<Vec<Option<String>>> {
    let row_count = rows.len();
    let mut grid: Vec<Vec<Option<String>>> = vec![Vec::new(); row_count];

    for (r, row) in rows.iter().enumerate() {
        let mut c = 0;
        for cell in &row.cells {
            while grid[r].get(c).is_some_and(Option::is_some) {
                c += 1;
            }
            let last_row = match cell.rowspan {
                0 => row_count,
                span => (r + span).min(row_count),
            };
            for (rr, target) in grid.iter_mut().enumerate().take(last_row).skip(r) {
                for cc in c..c + cell.colspan {
                    let origin = rr == r && cc == c;
                    let value = if origin || policy == SpanPolicy::Duplicate {
                        cell.text.clone()
                    } else {
                        String::new()
                    };
                    claim(target, cc, value);
                }
            }
            c += cell.colspan;
        }
    }

    grid
}

fn claim(row: &mut Vec<Option<String>>, col: usize, value: String) {
    if row.len() <= col {
        row.resize(col + 1, None);
    }
    if row[col].is_none() {
        row[col] = Some(value);
    }
}

/// Read a span attribute. Missing or malformed values count as 1.
fn span_attr(cell: ElementRef<'_>, name: &str, max: usize) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .map(|v| v.min(max))
        .unwrap_or(1)
}

/// Visible text of an element, without nested tables, scripts, or styles.
pub(crate) fn cell_text(element: ElementRef<'_>, normalize_unicode: bool) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    let text = normalize_ws(&raw);
    if normalize_unicode {
        text.nfc().collect()
    } else {
        text
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => match el.name() {
                "table" | "script" | "style" | "template" => {}
                "br" => out.push(' '),
                name => {
                    let block = matches!(name, "p" | "div" | "li" | "ul" | "ol");
                    if block {
                        out.push(' ');
                    }
                    if let Some(child) = ElementRef::wrap(child) {
                        collect_text(child, out);
                    }
                    if block {
                        out.push(' ');
                    }
                }
            },
            _ => {}
        }
    }
}

/// Collapse sequences of whitespace into a single space and trim.
pub(crate) fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str, colspan: usize, rowspan: usize) -> RawCell {
        RawCell {
            text: text.to_string(),
            colspan,
            rowspan,
            is_th: false,
        }
    }

    fn row(cells: Vec<RawCell>) -> RawRow {
        RawRow {
            cells,
            in_head: false,
        }
    }

    const PAD: AssembleMode = AssembleMode {
        infer_types: false,
        ragged_rows: RaggedRows::Pad,
        span_policy: SpanPolicy::Duplicate,
    };

    #[test]
    fn test_normalize_ws() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
        assert_eq!(normalize_ws("a\u{a0}b"), "a b");
        assert_eq!(normalize_ws("   "), "");
    }

    #[test]
    fn test_colspan_duplicates() {
        let rows = vec![
            row(vec![cell("wide", 2, 1)]),
            row(vec![cell("a", 1, 1), cell("b", 1, 1)]),
        ];
        let table = assemble(0, rows, PAD).unwrap();
        assert_eq!(table.rows()[0], TableRow::from_strings(["wide", "wide"]));
    }

    #[test]
    fn test_rowspan_blank() {
        let rows = vec![
            row(vec![cell("tall", 1, 2), cell("x", 1, 1)]),
            row(vec![cell("y", 1, 1)]),
        ];
        let mode = AssembleMode {
            span_policy: SpanPolicy::Blank,
            ..PAD
        };
        let table = assemble(0, rows, mode).unwrap();
        assert_eq!(table.rows()[1].cells, vec![CellValue::Empty, "y".into()]);
    }

    #[test]
    fn test_rowspan_zero_spans_to_end() {
        let rows = vec![
            row(vec![cell("all", 1, 0), cell("1", 1, 1)]),
            row(vec![cell("2", 1, 1)]),
            row(vec![cell("3", 1, 1)]),
        ];
        let table = assemble(0, rows, PAD).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[2], TableRow::from_strings(["all", "3"]));
    }

    #[test]
    fn test_rowspan_does_not_add_rows() {
        let rows = vec![row(vec![cell("a", 1, 5)])];
        let table = assemble(0, rows, PAD).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_ragged_reject() {
        let rows = vec![
            row(vec![cell("a", 1, 1), cell("b", 1, 1)]),
            row(vec![cell("c", 1, 1)]),
        ];
        let mode = AssembleMode {
            ragged_rows: RaggedRows::Reject,
            ..PAD
        };
        let err = assemble(4, rows, mode).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedRow {
                table: 4,
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_empty_rows_skipped() {
        let rows = vec![row(vec![]), row(vec![cell("a", 1, 1)]), row(vec![])];
        let table = assemble(0, rows, PAD).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_header_detection_and_inference() {
        let mut header = row(vec![cell("n", 1, 1)]);
        header.cells[0].is_th = true;
        let rows = vec![header, row(vec![cell("7", 1, 1)])];
        let mode = AssembleMode {
            infer_types: true,
            ..PAD
        };
        let table = assemble(0, rows, mode).unwrap();
        assert!(table.has_header());
        assert_eq!(table.cell(0, 0), Some(&CellValue::String("n".into())));
        assert_eq!(table.cell(1, 0), Some(&CellValue::Number(7.0)));
    }
}
