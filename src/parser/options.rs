//! Parsing options and configuration.

/// Options for parsing HTML tables.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// What to do with rows shorter than the widest row
    pub ragged_rows: RaggedRows,

    /// How merged (rowspan/colspan) cells fill their spanned positions
    pub span_policy: SpanPolicy,

    /// Whether numeric strings become numbers (bulk strategy only)
    pub infer_types: bool,

    /// Whether cell text is normalized to Unicode NFC
    pub normalize_unicode: bool,

    /// Encoding label overriding detection (e.g. "windows-1251")
    pub encoding: Option<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip the table balance check).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set ragged row handling.
    pub fn with_ragged_rows(mut self, ragged: RaggedRows) -> Self {
        self.ragged_rows = ragged;
        self
    }

    /// Set merged cell handling.
    pub fn with_span_policy(mut self, policy: SpanPolicy) -> Self {
        self.span_policy = policy;
        self
    }

    /// Enable or disable numeric type inference.
    pub fn with_type_inference(mut self, infer: bool) -> Self {
        self.infer_types = infer;
        self
    }

    /// Keep every cell as text.
    pub fn text_only(mut self) -> Self {
        self.infer_types = false;
        self
    }

    /// Enable or disable Unicode normalization of cell text.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Force a source encoding instead of detecting it.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            ragged_rows: RaggedRows::Pad,
            span_policy: SpanPolicy::Duplicate,
            infer_types: true,
            normalize_unicode: true,
            encoding: None,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when table boundaries cannot be located
    #[default]
    Strict,
    /// Let the HTML tree builder repair the markup and continue
    Lenient,
}

/// Handling of rows with fewer cells than the widest row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaggedRows {
    /// Pad short rows with empty cells
    #[default]
    Pad,
    /// Fail with a ragged row error (bulk strategy only)
    Reject,
}

/// How a merged cell fills the positions it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanPolicy {
    /// Copy the cell value into every spanned position
    #[default]
    Duplicate,
    /// Keep the value in the top-left position and leave the rest empty
    Blank,
}
