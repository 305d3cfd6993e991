//! Markdown rendering for extracted tables.

use crate::error::Result;
use crate::model::{Table, TableSet};

use super::RenderOptions;

/// Convert a table set to Markdown tables.
///
/// Tables without a header row get an empty header so the output stays a
/// valid Markdown table.
pub fn to_markdown(tables: &TableSet, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    for (i, table) in tables.iter().enumerate() {
        if options.include_titles {
            output.push_str("## ");
            output.push_str(&RenderOptions::title(i, table.caption.as_deref()));
            output.push_str("\n\n");
        }
        render_table(&mut output, table, options);
    }

    Ok(output.trim_end().to_string())
}

fn render_table(output: &mut String, table: &Table, options: &RenderOptions) {
    let col_count = table.column_count();
    if col_count == 0 {
        return;
    }

    let header: Vec<String> = match table.header() {
        Some(row) => row.cells.iter().map(|c| escape(&c.to_string())).collect(),
        None => vec![String::new(); col_count],
    };
    push_row(output, &header);

    output.push('|');
    for _ in 0..col_count {
        output.push_str(" --- |");
    }
    output.push('\n');

    let body = table.body();
    let shown = options
        .visible_rows(table.row_count())
        .saturating_sub(usize::from(table.has_header()));
    for row in &body[..shown.min(body.len())] {
        let cells: Vec<String> = row.cells.iter().map(|c| escape(&c.to_string())).collect();
        push_row(output, &cells);
    }

    output.push('\n');
}

fn push_row(output: &mut String, cells: &[String]) {
    output.push('|');
    for cell in cells {
        output.push_str(&format!(" {} |", cell));
    }
    output.push('\n');
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
