//! # untable
//!
//! Extract HTML tables into spreadsheet workbooks.
//!
//! Every `<table>` in a document becomes a [`Table`]: a rectangular grid of
//! typed cells with an optional header row. The tables of one document form a
//! [`TableSet`], which is written to an `.xlsx` workbook with one sheet per
//! table.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untable::{extract_all, write_workbook};
//!
//! fn main() -> untable::Result<()> {
//!     let html = std::fs::read_to_string("report.html")?;
//!     let tables = extract_all(&html)?;
//!     write_workbook(&tables, "report.xlsx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two parse strategies**: bulk selection with numeric typing, or
//!   targeted tree traversal of a single table
//! - **Merged cells**: rowspan/colspan values duplicated or blanked
//! - **Encoding detection**: BOM, `<meta charset>`, UTF-8, Cyrillic fallback
//! - **Outputs**: `.xlsx` workbooks, JSON, Markdown, text previews

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod workbook;
pub mod wrap;

// Re-export commonly used types
pub use detect::{decode_source, read_source, DecodedSource, EncodingSource};
pub use error::{Error, Result};
pub use model::{CellValue, Table, TableRow, TableSet};
pub use parser::{
    BulkParser, ErrorMode, ParseOptions, RaggedRows, SpanPolicy, Strategy, TableParser,
    TargetedParser,
};
pub use pipeline::{run, PipelineConfig, RunSummary};
pub use render::{JsonFormat, RenderOptions};
pub use workbook::{SheetNaming, WorkbookWriter, WriteOptions, WriteSummary};

use std::path::Path;

/// Extract every table of an HTML document with the bulk strategy.
///
/// Numeric strings become numbers. Returns an empty set when the document has
/// no tables.
///
/// # Example
///
/// ```
/// use untable::extract_all;
///
/// let tables = extract_all("<table><tr><td>1</td></tr></table>").unwrap();
/// assert_eq!(tables.len(), 1);
/// ```
pub fn extract_all(source: &str) -> Result<TableSet> {
    BulkParser::new().parse_all(source)
}

/// Extract every table with custom options.
pub fn extract_all_with_options(source: &str, options: ParseOptions) -> Result<TableSet> {
    BulkParser::with_options(options).parse_all(source)
}

/// Extract the table at a zero-based position with the targeted strategy.
///
/// # Example
///
/// ```
/// use untable::{extract_one, Error};
///
/// let html = "<table><tr><td>a</td></tr></table>";
/// assert_eq!(extract_one(html, 0).unwrap().row_count(), 1);
/// assert!(matches!(extract_one(html, 1), Err(Error::TableIndexOutOfRange { .. })));
/// ```
pub fn extract_one(source: &str, index: usize) -> Result<Table> {
    TargetedParser::new().parse_one(source, index)
}

/// Extract one table with custom options.
pub fn extract_one_with_options(source: &str, index: usize, options: ParseOptions) -> Result<Table> {
    TargetedParser::with_options(options).parse_one(source, index)
}

/// Read an HTML file (detecting its encoding) and extract every table.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<TableSet> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Read an HTML file and extract every table with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<TableSet> {
    let source = read_source(path, options.encoding.as_deref())?;
    extract_all_with_options(&source.text, options)
}

/// Read an HTML file asynchronously and extract every table.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<TableSet> {
    let source = detect::read_source_async(path, options.encoding.as_deref()).await?;
    extract_all_with_options(&source.text, options)
}

/// Write tables to an `.xlsx` workbook, one sheet per table.
///
/// Sheets are named `Table_1`, `Table_2`, ... in document order.
pub fn write_workbook<P: AsRef<Path>>(tables: &TableSet, path: P) -> Result<WriteSummary> {
    WorkbookWriter::new().write(tables, path)
}

/// Builder for extracting tables and writing workbooks.
///
/// # Example
///
/// ```no_run
/// use untable::{Strategy, Untable};
///
/// let summary = Untable::new()
///     .lenient()
///     .with_strategy(Strategy::Targeted)
///     .with_caption_sheet_names()
///     .parse_file("report.html")?
///     .save("report.xlsx")?;
/// println!("{} sheets", summary.sheets.len());
/// # Ok::<(), untable::Error>(())
/// ```
pub struct Untable {
    strategy: Strategy,
    parse_options: ParseOptions,
    write_options: WriteOptions,
}

impl Untable {
    /// Create a new Untable builder.
    pub fn new() -> Self {
        Self {
            strategy: Strategy::default(),
            parse_options: ParseOptions::default(),
            write_options: WriteOptions::default(),
        }
    }

    /// Select the parse strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Keep every cell as text.
    pub fn text_only(mut self) -> Self {
        self.parse_options = self.parse_options.text_only();
        self
    }

    /// Set merged cell handling.
    pub fn with_span_policy(mut self, policy: SpanPolicy) -> Self {
        self.parse_options = self.parse_options.with_span_policy(policy);
        self
    }

    /// Force a source encoding.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_encoding(label);
        self
    }

    /// Set the prefix of indexed sheet names.
    pub fn with_sheet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.write_options = self.write_options.with_sheet_prefix(prefix);
        self
    }

    /// Name sheets after table captions.
    pub fn with_caption_sheet_names(mut self) -> Self {
        self.write_options = self.write_options.caption_names();
        self
    }

    /// Parse HTML text.
    pub fn parse(self, source: &str) -> Result<UntableResult> {
        let tables = self
            .strategy
            .parser(self.parse_options)
            .parse_all(source)?;
        Ok(UntableResult {
            tables,
            write_options: self.write_options,
        })
    }

    /// Read and parse an HTML file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<UntableResult> {
        let source = read_source(path, self.parse_options.encoding.as_deref())?;
        self.parse(&source.text)
    }
}

impl Default for Untable {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a document.
pub struct UntableResult {
    /// The extracted tables
    pub tables: TableSet,
    /// Write options to use
    write_options: WriteOptions,
}

impl UntableResult {
    /// Write the workbook.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<WriteSummary> {
        WorkbookWriter::with_options(self.write_options.clone()).write(&self.tables, path)
    }

    /// Serialize the workbook to bytes.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        WorkbookWriter::with_options(self.write_options.clone()).to_bytes(&self.tables)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.tables, format)
    }

    /// Get the tables.
    pub fn tables(&self) -> &TableSet {
        &self.tables
    }
}
