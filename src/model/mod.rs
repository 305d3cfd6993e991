//! Table model types.
//!
//! This module defines the intermediate representation that bridges HTML
//! parsing and workbook writing. A [`TableSet`] owns its tables; tables are
//! rectangular grids of typed [`CellValue`]s.

mod cell;
mod table;
mod table_set;

pub use cell::{parse_number, CellValue};
pub use table::{Table, TableRow};
pub use table_set::TableSet;
