//! Source selection: where the listing is read from.
//!
//! This module handles the first stage of the pipeline - acquiring the lsof
//! text, either from a file or from standard input.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lsofalib::source::InputSource;
//!
//! let reader = InputSource::from_arg(Some("lsof.txt")).open()?;
//! ```

pub mod input;

pub use input::InputSource;
