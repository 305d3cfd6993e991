//! The load → parse → write pipeline.

use std::path::{Path, PathBuf};

use crate::detect::read_source;
use crate::error::Result;
use crate::parser::{ParseOptions, Strategy};
use crate::workbook::{WorkbookWriter, WriteOptions};

/// Input used when no path is configured.
pub const DEFAULT_INPUT: &str = "data/test.html";
/// Output used when no path is configured.
pub const DEFAULT_OUTPUT: &str = "data/all_tables.xlsx";

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// HTML document to read
    pub input: PathBuf,
    /// Workbook to write (replaced if it exists)
    pub output: PathBuf,
    /// Parsing strategy
    pub strategy: Strategy,
    /// Parse options
    pub parse: ParseOptions,
    /// Write options
    pub write: WriteOptions,
}

impl PipelineConfig {
    /// Create a config for the given paths with default options.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            strategy: Strategy::default(),
            parse: ParseOptions::default(),
            write: WriteOptions::default(),
        }
    }

    /// Set the parsing strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set write options.
    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.write = options;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_OUTPUT)
    }
}

/// What a pipeline run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Workbook path
    pub output: PathBuf,
    /// Sheet names, one per table (or the placeholder sheet)
    pub sheets: Vec<String>,
    /// Number of tables found
    pub table_count: usize,
    /// Rows written across all sheets
    pub row_count: usize,
}

/// Read the input, extract every table, and write the workbook.
///
/// Any failure aborts the run before the output file is touched.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    log::info!(
        "Reading {} ({:?} strategy)",
        config.input.display(),
        config.strategy
    );
    let source = read_source(&config.input, config.parse.encoding.as_deref())?;
    log::debug!(
        "Decoded input as {} ({:?})",
        source.encoding.name(),
        source.detected_by
    );

    let parser = config.strategy.parser(config.parse.clone());
    let tables = parser.parse_all(&source.text)?;
    if tables.is_empty() {
        log::warn!("No tables found in {}", config.input.display());
    } else {
        log::info!("Found {} tables", tables.len());
    }

    let summary = WorkbookWriter::with_options(config.write.clone()).write(&tables, &config.output)?;

    Ok(RunSummary {
        output: summary.path,
        sheets: summary.sheets,
        table_count: tables.len(),
        row_count: tables.total_rows(),
    })
}

/// Run the pipeline for a pair of paths with default options.
pub fn run_paths<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<RunSummary> {
    run(&PipelineConfig::new(input.as_ref(), output.as_ref()))
}
