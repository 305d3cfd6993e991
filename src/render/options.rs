//! Rendering options and configuration.

/// Options for rendering tables as text or Markdown.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Rows shown per table, header included (`None` = all)
    pub max_rows: Option<usize>,

    /// Print a `Table N` heading (with caption) before each table
    pub include_titles: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the rows shown per table.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Enable or disable per-table headings.
    pub fn with_titles(mut self, include: bool) -> Self {
        self.include_titles = include;
        self
    }

    /// Number of rows of a table that will be shown.
    pub(crate) fn visible_rows(&self, total: usize) -> usize {
        self.max_rows.map_or(total, |max| max.min(total))
    }

    /// Heading line for a table, one-based like sheet names.
    pub(crate) fn title(index: usize, caption: Option<&str>) -> String {
        match caption {
            Some(caption) => format!("Table {}: {}", index + 1, caption),
            None => format!("Table {}", index + 1),
        }
    }
}
