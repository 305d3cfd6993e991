//! Plain text preview of extracted tables.

use crate::error::Result;
use crate::model::TableSet;

use super::RenderOptions;

/// Render tables as tab-separated rows, one blank line between tables.
pub fn to_text(tables: &TableSet, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        if options.include_titles {
            output.push_str(&RenderOptions::title(i, table.caption.as_deref()));
            output.push('\n');
        }
        let shown = options.visible_rows(table.row_count());
        for row in &table.rows()[..shown] {
            output.push_str(&row.plain_text());
            output.push('\n');
        }
        if shown < table.row_count() {
            output.push_str(&format!("... {} more rows\n", table.row_count() - shown));
        }
    }

    Ok(output.trim_end().to_string())
}
