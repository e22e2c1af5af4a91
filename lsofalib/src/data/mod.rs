//! Data collection: locate columns and parse listing rows.
//!
//! This module handles the second stage of the pipeline - turning raw lsof
//! text into structured records. It provides:
//!
//! - **Columns**: header-driven discovery of each column's character span
//! - **Records**: one struct per data line with eleven named fields
//! - **Parsing**: lazy line-to-record conversion (`RowParser`, `parse_listing`)
//!
//! ## Example
//!
//! ```rust
//! use lsofalib::data::{locate_columns, parse_line, Column, HeaderMode};
//!
//! let header = "COMMAND   PID   TID  TASKCMD   USER    FD   TYPE DEVICE  SIZE/OFF NODE NAME";
//! let layout = locate_columns(header, HeaderMode::Strict).unwrap();
//! assert_eq!(layout.span(Column::Pid).start, 10);
//!
//! let record = parse_line(&layout, "bash      4242                 bob  cwd   DIR    8,1    4096     2     /home");
//! assert_eq!(record.command, "bash");
//! assert_eq!(record.name, "/home");
//! ```

pub mod columns;
pub mod parser;
pub mod record;

pub use columns::{available_fields, locate_columns, Column, ColumnLayout, ColumnSpan, HeaderMode};
pub use parser::{parse_line, parse_listing, parse_str, ParseOptions, RowParser};
pub use record::Record;
