//! Table-ready data structures for listing output.
//!
//! This module provides `ListingTable`, a presentation-ready data structure
//! that can be rendered as a markdown pipe table or serialized to JSON.
//!
//! The data flow is:
//! 1. Records (parsed lsof lines)
//! 2. QuerySet (grouped, sorted, limited)
//! 3. ListingTable (formatted strings for display)
//!
//! ListingTable is a pure presentation layer - it only formats data, no
//! grouping or sorting logic.

use console::measure_text_width;
use serde::{Deserialize, Serialize};

use crate::data::columns::Column;
use crate::query::queryset::{QuerySet, COUNT_FIELD};

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

/// Table-ready listing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingTable {
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows, one value per header
    pub rows: Vec<Vec<String>>,
    /// Alignment per column
    #[serde(skip)]
    pub aligns: Vec<Align>,
}

impl ListingTable {
    /// Create a table from headers and rows, deriving column alignment from
    /// the cell contents.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let aligns = (0..headers.len())
            .map(|i| column_align(rows.iter().map(|r| cell(r, i))))
            .collect();
        ListingTable {
            headers,
            rows,
            aligns,
        }
    }

    /// Create a ListingTable from a QuerySet.
    ///
    /// Ungrouped sets show all eleven columns; grouped sets show the grouping
    /// fields followed by `count`.
    pub fn from_queryset(qs: &QuerySet) -> Self {
        match qs {
            QuerySet::Records { records } => {
                let headers: Vec<String> =
                    Column::ALL.iter().map(|c| c.name().to_string()).collect();
                let rows: Vec<Vec<String>> = records
                    .iter()
                    .map(|r| r.values().iter().map(|v| v.to_string()).collect())
                    .collect();
                Self::new(headers, rows)
            }
            QuerySet::Groups { fields, groups } => {
                let headers: Vec<String> = fields
                    .iter()
                    .map(|c| c.name().to_string())
                    .chain(std::iter::once(COUNT_FIELD.to_string()))
                    .collect();
                let rows: Vec<Vec<String>> = groups
                    .iter()
                    .map(|g| {
                        let mut row = g.key.clone();
                        row.push(g.count.to_string());
                        row
                    })
                    .collect();
                Self::new(headers, rows)
            }
        }
    }

    /// Render as a markdown pipe table, without a row index column.
    pub fn to_markdown(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| measure_text_width(cell(r, i)))
                    .chain(std::iter::once(measure_text_width(h)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_row(&mut out, &self.headers, &widths, &self.aligns);

        let rule: Vec<String> = widths
            .iter()
            .zip(&self.aligns)
            .map(|(w, a)| match a {
                Align::Left => format!(":{}", "-".repeat(w + 1)),
                Align::Right => format!("{}:", "-".repeat(w + 1)),
            })
            .collect();
        out.push('|');
        out.push_str(&rule.join("|"));
        out.push_str("|\n");

        for row in &self.rows {
            push_row(&mut out, row, &widths, &self.aligns);
        }
        out
    }
}

fn cell(row: &[String], i: usize) -> &str {
    row.get(i).map_or("", String::as_str)
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize], aligns: &[Align]) {
    out.push('|');
    for ((cell, width), align) in cells.iter().zip(widths).zip(aligns) {
        let pad = " ".repeat(width.saturating_sub(measure_text_width(cell)));
        match align {
            Align::Left => out.push_str(&format!(" {}{} |", cell, pad)),
            Align::Right => out.push_str(&format!(" {}{} |", pad, cell)),
        }
    }
    out.push('\n');
}

/// Numeric columns are right-aligned, everything else left-aligned.
fn column_align<'a>(cells: impl Iterator<Item = &'a str>) -> Align {
    let mut saw_value = false;
    for cell in cells.filter(|c| !c.is_empty()) {
        if cell.parse::<f64>().is_err() {
            return Align::Left;
        }
        saw_value = true;
    }
    if saw_value {
        Align::Right
    } else {
        Align::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::Record;
    use crate::query::options::{Grouping, QueryOptions};

    fn record(command: &str, pid: &str, name: &str) -> Record {
        Record::from_values([
            command, pid, "", "", "root", "cwd", "DIR", "8,1", "4096", "2", name,
        ])
    }

    fn grouped(records: Vec<Record>, spec: &str) -> QuerySet {
        QuerySet::build(
            records,
            &QueryOptions::new().grouping(Grouping::parse(spec).unwrap()),
        )
    }

    #[test]
    fn test_headers_ungrouped() {
        let table = ListingTable::from_queryset(&QuerySet::Records { records: vec![] });
        assert_eq!(
            table.headers,
            vec![
                "COMMAND", "PID", "TID", "TASCMD", "USER", "FD", "TYPE", "DEVICE", "SIZE/OFF",
                "NODE", "NAME"
            ]
        );
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_headers_grouped() {
        let qs = grouped(vec![record("bash", "1", "/")], "NAME,COMMAND");
        let table = ListingTable::from_queryset(&qs);
        assert_eq!(table.headers, vec!["NAME", "COMMAND", "count"]);
        assert_eq!(table.rows, vec![vec!["/", "bash", "1"]]);
    }

    #[test]
    fn test_alignment() {
        let qs = QuerySet::Records {
            records: vec![record("bash", "12", "/"), record("zsh", "", "/tmp")],
        };
        let table = ListingTable::from_queryset(&qs);
        assert_eq!(table.aligns[Column::Command.index()], Align::Left);
        assert_eq!(table.aligns[Column::Pid.index()], Align::Right);
        // all empty
        assert_eq!(table.aligns[Column::Tid.index()], Align::Left);
        assert_eq!(table.aligns[Column::Device.index()], Align::Left);
    }

    #[test]
    fn test_markdown_grouped() {
        let qs = grouped(
            vec![
                record("bash", "1", "/"),
                record("bash", "2", "/"),
                record("zsh", "3", "/"),
            ],
            "COMMAND",
        );
        let markdown = ListingTable::from_queryset(&qs).to_markdown();
        let expected = "\
| COMMAND | count |
|:--------|------:|
| bash    |     2 |
| zsh     |     1 |
";
        assert_eq!(markdown, expected);
    }

    #[test]
    fn test_markdown_empty_table_has_headers() {
        let table = ListingTable::from_queryset(&QuerySet::Records { records: vec![] });
        let markdown = table.to_markdown();
        let lines: Vec<&str> = markdown.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("| COMMAND |"));
        assert!(lines[0].ends_with("| NAME |"));
        assert!(lines[1].starts_with("|:--------|"));
    }

    #[test]
    fn test_markdown_wide_characters() {
        let table = ListingTable::new(
            vec!["NAME".to_string()],
            vec![vec!["日本".to_string()], vec!["ab".to_string()]],
        );
        let markdown = table.to_markdown();
        assert!(markdown.contains("| 日本 |"));
        assert!(markdown.contains("| ab   |"));
    }

    #[test]
    fn test_json_shape() {
        let qs = grouped(vec![record("bash", "1", "/")], "COMMAND");
        let json = serde_json::to_value(ListingTable::from_queryset(&qs)).unwrap();
        assert_eq!(json["headers"], serde_json::json!(["COMMAND", "count"]));
        assert_eq!(json["rows"], serde_json::json!([["bash", "1"]]));
        assert!(json.get("aligns").is_none());
    }
}
