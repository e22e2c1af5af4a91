//! Row parsing: turn listing lines into [`Record`]s.

use std::io::{self, BufRead};

use log::debug;

use crate::error::LsofaError;
use crate::Result;

use super::columns::{locate_columns, Column, ColumnLayout, HeaderMode};
use super::record::Record;

/// Options for parsing a listing.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// How to treat a malformed header line
    pub header_mode: HeaderMode,
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set header handling.
    pub fn header_mode(mut self, mode: HeaderMode) -> Self {
        self.header_mode = mode;
        self
    }
}

/// Split one data line into a record using `layout`.
///
/// Never fails: fields beyond the end of the line are empty.
pub fn parse_line(layout: &ColumnLayout, line: &str) -> Record {
    let line = line.strip_suffix('\r').unwrap_or(line);
    Record::from_values(Column::ALL.map(|c| layout.span(c).slice(line)))
}

/// Lazy adapter from listing lines to records.
///
/// Yields one record per line, in input order. Read errors are passed
/// through.
pub struct RowParser<I> {
    layout: ColumnLayout,
    lines: I,
}

impl<I> RowParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(layout: ColumnLayout, lines: I) -> Self {
        Self { layout, lines }
    }

    /// Read the header from `lines`, locate the columns and return a parser
    /// over the remaining lines.
    pub fn from_header(mut lines: I, mode: HeaderMode) -> Result<Self> {
        let header = lines.next().ok_or(LsofaError::EmptyInput)??;
        let layout = locate_columns(&header, mode)?;
        Ok(Self::new(layout, lines))
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }
}

impl<I> Iterator for RowParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(
            line.map(|l| parse_line(&self.layout, &l))
                .map_err(LsofaError::from),
        )
    }
}

/// Parse a whole listing (header plus data lines) into records.
pub fn parse_listing<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Vec<Record>> {
    let records = RowParser::from_header(reader.lines(), options.header_mode)?
        .collect::<Result<Vec<_>>>()?;
    debug!("parsed {} records", records.len());
    Ok(records)
}

/// Parse a listing held in memory.
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<Vec<Record>> {
    parse_listing(text.as_bytes(), options)
}
