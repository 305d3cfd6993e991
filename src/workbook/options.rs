//! Workbook writing options.

/// Default prefix for indexed sheet names (`Table_1`, `Table_2`, ...).
pub const DEFAULT_SHEET_PREFIX: &str = "Table_";

/// Name of the placeholder sheet written when there are no tables.
pub const DEFAULT_EMPTY_SHEET: &str = "Sheet1";

/// Options for writing tables to a workbook.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// How sheets are named
    pub sheet_naming: SheetNaming,

    /// Prefix for indexed sheet names
    pub sheet_prefix: String,

    /// Name of the single sheet written for an empty table set
    pub empty_sheet_name: String,
}

impl WriteOptions {
    /// Create new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sheet naming.
    pub fn with_sheet_naming(mut self, naming: SheetNaming) -> Self {
        self.sheet_naming = naming;
        self
    }

    /// Name sheets after table captions where available.
    pub fn caption_names(mut self) -> Self {
        self.sheet_naming = SheetNaming::Caption;
        self
    }

    /// Set the prefix for indexed sheet names.
    pub fn with_sheet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sheet_prefix = prefix.into();
        self
    }

    /// Set the placeholder sheet name for empty output.
    pub fn with_empty_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.empty_sheet_name = name.into();
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sheet_naming: SheetNaming::Indexed,
            sheet_prefix: DEFAULT_SHEET_PREFIX.to_string(),
            empty_sheet_name: DEFAULT_EMPTY_SHEET.to_string(),
        }
    }
}

/// Sheet naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetNaming {
    /// Prefix plus one-based table position
    #[default]
    Indexed,
    /// Table caption, falling back to the indexed name
    Caption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_options_builder() {
        let options = WriteOptions::new()
            .caption_names()
            .with_sheet_prefix("T")
            .with_empty_sheet_name("Empty");

        assert_eq!(options.sheet_naming, SheetNaming::Caption);
        assert_eq!(options.sheet_prefix, "T");
        assert_eq!(options.empty_sheet_name, "Empty");
    }

    #[test]
    fn test_default_options() {
        let options = WriteOptions::default();
        assert_eq!(options.sheet_naming, SheetNaming::Indexed);
        assert_eq!(options.sheet_prefix, "Table_");
    }
}
