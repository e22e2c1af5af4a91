//! # lsofalib
//!
//! Parse the fixed-width output of `lsof` and summarize it.
//!
//! ## Overview
//!
//! lsof pads its columns to widths that depend on the data being listed, so
//! rows cannot be split on whitespace (NAME and TASKCMD may contain spaces,
//! TID and TASKCMD are often blank). This library reads the header line,
//! derives the character span of each column from where its title sits, and
//! slices every data line with those spans.
//!
//! The pipeline has four stages, one module each:
//!
//! - **source**: pick the input (file or standard input)
//! - **data**: locate columns and parse lines into [`Record`]s
//! - **query**: optionally group records, count, sort and keep the top N
//! - **output**: format the result as a table
//!
//! ## Example
//!
//! ```rust
//! use lsofalib::{analyze, Grouping, ListingTable, ParseOptions, QueryOptions};
//!
//! let listing = "\
//! COMMAND   PID   TID  TASKCMD   USER    FD   TYPE DEVICE  SIZE/OFF NODE NAME
//! bash      101                  root cwd   DIR    8,1    4096     2     /
//! bash      102                  root cwd   DIR    8,1    4096     2     /root
//! zsh       103                  root cwd   DIR    8,1    4096     2     /
//! ";
//!
//! let options = QueryOptions::new().grouping(Grouping::parse("COMMAND").unwrap());
//! let result = analyze(listing.as_bytes(), &ParseOptions::new(), &options).unwrap();
//!
//! let table = ListingTable::from_queryset(&result);
//! assert_eq!(table.headers, vec!["COMMAND", "count"]);
//! assert_eq!(table.rows, vec![vec!["bash", "2"], vec!["zsh", "1"]]);
//! ```

use std::io::BufRead;

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use data::{
    locate_columns, parse_line, parse_listing, parse_str, Column, ColumnLayout, ColumnSpan,
    HeaderMode, ParseOptions, Record, RowParser,
};
pub use error::LsofaError;
pub use output::{Align, ListingTable};
pub use query::{aggregate, GroupCount, Grouping, QueryOptions, QuerySet, COUNT_FIELD};
pub use source::InputSource;

/// Result type for lsofalib operations
pub type Result<T> = std::result::Result<T, LsofaError>;

/// Parse a listing and apply grouping and limits in one call.
pub fn analyze<R: BufRead>(
    reader: R,
    parse_options: &ParseOptions,
    query_options: &QueryOptions,
) -> Result<QuerySet> {
    let records = parse_listing(reader, parse_options)?;
    Ok(QuerySet::build(records, query_options))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "COMMAND   PID   TID  TASKCMD   USER    FD   TYPE DEVICE  SIZE/OFF NODE NAME";

    #[test]
    fn test_analyze_groups_by_command() {
        let listing = format!(
            "{}\n{}\n{}\n{}\n",
            HEADER,
            "bash      1                    root cwd   DIR    8,1    4096     2     /",
            "zsh       2                    root cwd   DIR    8,1    4096     2     /",
            "bash      3                    root cwd   DIR    8,1    4096     2     /",
        );
        let options = QueryOptions::new().grouping(Grouping::parse("COMMAND").unwrap());
        let result = analyze(listing.as_bytes(), &ParseOptions::new(), &options).unwrap();
        match result {
            QuerySet::Groups { groups, .. } => {
                assert_eq!(groups.len(), 2);
                assert_eq!(groups[0].key, vec!["bash"]);
                assert_eq!(groups[0].count, 2);
                assert_eq!(groups[1].key, vec!["zsh"]);
                assert_eq!(groups[1].count, 1);
            }
            other => panic!("expected groups, got {:?}", other),
        }
    }

    #[test]
    fn test_analyze_header_only() {
        let result = analyze(HEADER.as_bytes(), &ParseOptions::new(), &QueryOptions::new()).unwrap();
        assert!(result.is_empty());
        let table = ListingTable::from_queryset(&result);
        assert_eq!(table.headers.len(), 11);
        assert_eq!(table.to_markdown().lines().count(), 2);
    }
}
