//! HTML table parsing module.
//!
//! Two strategies read the same document differently:
//!
//! - [`BulkParser`] selects every table at once and types numeric cells.
//! - [`TargetedParser`] walks the tree to one table by position and keeps text.
//!
//! Both share one policy for merged cells and nested tables, so for any valid
//! index `i` the targeted table matches the `i`-th bulk table up to numeric
//! coercion.

mod balance;
mod bulk;
mod grid;
mod options;
mod targeted;

pub use bulk::BulkParser;
pub use options::{ErrorMode, ParseOptions, RaggedRows, SpanPolicy};
pub use targeted::TargetedParser;

use crate::error::Result;
use crate::model::{Table, TableSet};

/// A strategy for turning HTML text into tables.
pub trait TableParser {
    /// Get the name of this strategy.
    fn name(&self) -> &str;

    /// Parse every table in document order.
    fn parse_all(&self, source: &str) -> Result<TableSet>;

    /// Parse the table at a zero-based position.
    fn parse_one(&self, source: &str, index: usize) -> Result<Table>;
}

/// Which parsing strategy the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Whole-document selection with type inference
    #[default]
    Bulk,
    /// Per-table tree traversal, text cells
    Targeted,
}

impl Strategy {
    /// Build the parser for this strategy.
    pub fn parser(self, options: ParseOptions) -> Box<dyn TableParser> {
        match self {
            Strategy::Bulk => Box::new(BulkParser::with_options(options)),
            Strategy::Targeted => Box::new(TargetedParser::with_options(options)),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bulk" => Ok(Strategy::Bulk),
            "targeted" => Ok(Strategy::Targeted),
            other => Err(crate::error::Error::Other(format!(
                "Unknown parse strategy: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parser_names() {
        assert_eq!(Strategy::Bulk.parser(ParseOptions::default()).name(), "bulk");
        assert_eq!(
            Strategy::Targeted.parser(ParseOptions::default()).name(),
            "targeted"
        );
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Bulk".parse::<Strategy>().unwrap(), Strategy::Bulk);
        assert_eq!(" targeted ".parse::<Strategy>().unwrap(), Strategy::Targeted);
        assert!("pandas".parse::<Strategy>().is_err());
    }
}
