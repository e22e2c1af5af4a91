//! Output formatting: present data as tables.
//!
//! This module handles the fourth and final stage of the pipeline -
//! formatting query results for display. It provides:
//!
//! - **ListingTable**: Table-ready data structure with headers and rows
//! - **Markdown**: pipe-table rendering with numeric columns right-aligned
//!
//! ListingTable is a pure presentation layer - it only formats data into strings.
//! All grouping, sorting and limiting happens in the query stage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lsofalib::output::ListingTable;
//!
//! let table = ListingTable::from_queryset(&queryset);
//! // table.headers: ["COMMAND", "count"]
//! // table.rows: [["bash", "2"], ["zsh", "1"]]
//! print!("{}", table.to_markdown());
//! ```

pub mod table;

pub use table::{Align, ListingTable};
