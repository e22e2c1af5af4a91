//! Query processing: group, count, sort and limit records.
//!
//! This module handles the third stage of the pipeline - transforming parsed
//! records into a query-ready format. It provides:
//!
//! - **Options**: Configuration for grouping and limiting (`Grouping`, `QueryOptions`)
//! - **QuerySet**: Processed data ready for presentation
//!
//! ## Example
//!
//! ```rust
//! use lsofalib::data::Record;
//! use lsofalib::query::{Grouping, QueryOptions, QuerySet};
//!
//! let records = vec![
//!     Record::from_values(["bash", "1", "", "", "alice", "cwd", "DIR", "8,1", "4096", "2", "/"]),
//!     Record::from_values(["bash", "2", "", "", "alice", "cwd", "DIR", "8,1", "4096", "2", "/"]),
//! ];
//! let options = QueryOptions::new().grouping(Grouping::parse("COMMAND,USER").unwrap());
//! let queryset = QuerySet::build(records, &options);
//! assert_eq!(queryset.len(), 1);
//! ```

pub mod options;
pub mod queryset;

pub use options::{Grouping, QueryOptions};
pub use queryset::{aggregate, GroupCount, QuerySet, COUNT_FIELD};
