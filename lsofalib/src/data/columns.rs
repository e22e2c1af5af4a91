//! Column layout discovery for fixed-width lsof listings.
//!
//! lsof pads every field to a width that depends on the data, so the layout
//! cannot be hard-coded. Instead the header line is scanned for each column
//! marker and the *end* of every column is derived from where its marker
//! sits. Columns are contiguous: each one starts where the previous one ends.
//!
//! ```text
//! COMMAND   PID   TID  TASKCMD   USER    FD   TYPE DEVICE  SIZE/OFF NODE NAME
//! [0,10)   [10,14)...                                                [71, ..)
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::LsofaError;
use crate::Result;

/// One of the eleven lsof columns, in left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    Command,
    Pid,
    Tid,
    TaskCmd,
    User,
    Fd,
    Type,
    Device,
    SizeOff,
    Node,
    Name,
}

impl Column {
    /// All columns in canonical order
    pub const ALL: [Column; 11] = [
        Column::Command,
        Column::Pid,
        Column::Tid,
        Column::TaskCmd,
        Column::User,
        Column::Fd,
        Column::Type,
        Column::Device,
        Column::SizeOff,
        Column::Node,
        Column::Name,
    ];

    /// Display name used for table headers and grouping arguments.
    pub fn name(self) -> &'static str {
        match self {
            Column::Command => "COMMAND",
            Column::Pid => "PID",
            Column::Tid => "TID",
            Column::TaskCmd => "TASCMD",
            Column::User => "USER",
            Column::Fd => "FD",
            Column::Type => "TYPE",
            Column::Device => "DEVICE",
            Column::SizeOff => "SIZE/OFF",
            Column::Node => "NODE",
            Column::Name => "NAME",
        }
    }

    /// Position in [`Column::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Marker searched for in the header, and how the column end is derived
    /// from the marker position: `end = position + shift + width`.
    ///
    /// COMMAND and NAME are not located: COMMAND is always `[0, 10)` and NAME
    /// runs to the end of the line.
    fn marker(self) -> Option<Marker> {
        let (token, shift, width) = match self {
            Column::Command | Column::Name => return None,
            Column::Pid => ("PID", 0, 4),
            Column::Tid => ("TID", 0, 4),
            Column::TaskCmd => ("TASKCMD", 0, 10),
            Column::User => ("USER", 0, 5),
            // lsof prints FD right-aligned one character past its values
            Column::Fd => ("FD", -1, 4),
            Column::Type => ("TYPE", 0, 5),
            Column::Device => ("DEVICE", 0, 7),
            Column::SizeOff => ("SIZE/OFF", 0, 8),
            Column::Node => ("NODE", 0, 5),
        };
        Some(Marker {
            token,
            shift,
            width,
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = LsofaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("TASKCMD") {
            return Ok(Column::TaskCmd);
        }
        Column::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LsofaError::UnknownField(wanted.to_string()))
    }
}

/// Comma-separated list of every column name, for help and error text.
pub fn available_fields() -> String {
    Column::ALL
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, Copy)]
struct Marker {
    token: &'static str,
    shift: isize,
    width: isize,
}

const COMMAND_END: usize = 10;

/// How to treat a header whose markers are missing or out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeaderMode {
    /// Reject the header with an error
    #[default]
    Strict,
    /// Treat a missing marker as found at -1 and keep going; affected
    /// columns slice to empty or misaligned values
    Lenient,
}

/// Half-open character range `[start, end)` of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpan {
    pub column: Column,
    /// Inclusive start, in characters
    pub start: usize,
    /// Exclusive end, in characters; `None` means end of line
    pub end: Option<usize>,
}

impl ColumnSpan {
    /// Extract this column from `line`, trimmed.
    ///
    /// The span is clamped to the line, so short lines give short or empty
    /// values. An inverted span gives an empty value.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        char_slice(line, self.start, self.end).trim()
    }

    /// Width in characters, `None` for the open-ended last column.
    pub fn width(&self) -> Option<usize> {
        self.end.map(|end| end.saturating_sub(self.start))
    }
}

/// The eleven column spans of a listing, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    spans: Vec<ColumnSpan>,
}

impl ColumnLayout {
    pub fn spans(&self) -> &[ColumnSpan] {
        &self.spans
    }

    pub fn span(&self, column: Column) -> &ColumnSpan {
        &self.spans[column.index()]
    }
}

/// Compute the span of every column from the listing's header line.
///
/// Offsets are character positions. In [`HeaderMode::Strict`] a missing
/// marker or an inverted span is an error; in [`HeaderMode::Lenient`] the
/// layout is produced regardless.
pub fn locate_columns(header: &str, mode: HeaderMode) -> Result<ColumnLayout> {
    let header = header.trim_end_matches(['\r', '\n']);
    let mut spans = Vec::with_capacity(Column::ALL.len());
    let mut prev_end = 0usize;

    for column in Column::ALL {
        let end = match column.marker() {
            None if column == Column::Command => Some(COMMAND_END),
            None => None,
            Some(marker) => Some(marker_end(header, marker, mode)?),
        };

        let span = ColumnSpan {
            column,
            start: prev_end,
            end,
        };
        if let Some(end) = end {
            if end < span.start {
                if mode == HeaderMode::Strict {
                    return Err(LsofaError::MalformedHeader {
                        column: column.name().to_string(),
                        start: span.start,
                        end,
                    });
                }
                warn!(
                    "column {} spans [{}, {}): values will be empty",
                    column, span.start, end
                );
            }
            prev_end = end;
        }
        spans.push(span);
    }

    debug!(
        "located columns: {}",
        spans
            .iter()
            .map(|s| match s.end {
                Some(end) => format!("{}[{},{})", s.column, s.start, end),
                None => format!("{}[{},..)", s.column, s.start),
            })
            .collect::<Vec<_>>()
            .join(" ")
    );

    Ok(ColumnLayout { spans })
}

fn marker_end(header: &str, marker: Marker, mode: HeaderMode) -> Result<usize> {
    let position = match find_chars(header, marker.token) {
        Some(pos) => pos as isize,
        None if mode == HeaderMode::Strict => {
            return Err(LsofaError::MissingHeaderToken {
                token: marker.token.to_string(),
            })
        }
        None => {
            warn!("header has no '{}' column", marker.token);
            -1
        }
    };
    Ok((position + marker.shift + marker.width).max(0) as usize)
}

/// Character index of the first occurrence of `needle` in `haystack`.
fn find_chars(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_pos| haystack[..byte_pos].chars().count())
}

/// Slice `line` by character positions, clamped to its length.
fn char_slice(line: &str, start: usize, end: Option<usize>) -> &str {
    if line.is_ascii() {
        let len = line.len();
        let from = start.min(len);
        let to = end.map_or(len, |e| e.min(len));
        return if to > from { &line[from..to] } else { "" };
    }

    let byte_at = |n: usize| line.char_indices().nth(n).map_or(line.len(), |(i, _)| i);
    let from = byte_at(start);
    let to = end.map_or(line.len(), byte_at);
    if to > from {
        &line[from..to]
    } else {
        ""
    }
}
