//! SpreadsheetML (.xlsx) production.
//!
//! Renders a header row plus rectangular cell data into a workbook package
//! with a single worksheet. Strings are written as inline strings, numbers
//! as native numeric cells.

mod writer;

pub use writer::{Cell, write_workbook};
