//! Sheet name rules.
//!
//! Spreadsheet applications limit sheet names to 31 characters, forbid
//! `[ ] : * ? / \`, reject names starting or ending with an apostrophe, and
//! compare names case-insensitively.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::TableSet;

use super::options::{SheetNaming, WriteOptions};

/// Longest sheet name accepted.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Check a sheet name against the spreadsheet rules.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidSheetName("name cannot be blank".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "'{}' is longer than {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(Error::InvalidSheetName(format!(
            "'{}' contains '{}'",
            name, c
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(Error::InvalidSheetName(format!(
            "'{}' starts or ends with an apostrophe",
            name
        )));
    }
    Ok(())
}

/// Turn arbitrary text (a caption) into a usable sheet name, if anything is left.
pub fn sanitize_sheet_name(text: &str) -> Option<String> {
    let cleaned: String = text
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let cleaned = cleaned.trim_matches('\'').trim();
    let truncated: String = cleaned.chars().take(MAX_SHEET_NAME_LEN).collect();
    let truncated = truncated.trim_end().trim_end_matches('\'').to_string();
    (!truncated.is_empty()).then_some(truncated)
}

/// Deterministic, unique sheet names for every table, in order.
pub fn sheet_names(tables: &TableSet, options: &WriteOptions) -> Result<Vec<String>> {
    let mut taken = HashSet::new();
    let mut names = Vec::with_capacity(tables.len());

    for (i, table) in tables.iter().enumerate() {
        let indexed = format!("{}{}", options.sheet_prefix, i + 1);
        let base = match options.sheet_naming {
            SheetNaming::Indexed => indexed,
            SheetNaming::Caption => table
                .caption
                .as_deref()
                .and_then(sanitize_sheet_name)
                .unwrap_or(indexed),
        };
        validate_sheet_name(&base)?;

        let name = unique(&base, &mut taken);
        names.push(name);
    }

    Ok(names)
}

/// Append `_2`, `_3`, ... until the name is free, keeping within the length limit.
fn unique(base: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.to_lowercase()) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let suffix = format!("_{}", n);
        let keep = MAX_SHEET_NAME_LEN - suffix.len();
        let head: String = base.chars().take(keep).collect();
        let candidate = format!("{}{}", head, suffix);
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}
