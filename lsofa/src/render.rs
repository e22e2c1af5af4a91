//! Output rendering for the CLI

use lsofalib::{ListingTable, QuerySet};

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Markdown pipe table
    #[default]
    Table,
    /// Pretty-printed JSON of the table headers and rows
    Json,
}

impl OutputMode {
    /// Map the `--output` value; anything unrecognized falls back to a table.
    pub fn from_arg(value: &str) -> Self {
        match value {
            "json" => OutputMode::Json,
            _ => OutputMode::Table,
        }
    }
}

/// Render a query result to a string ready for printing.
pub fn render(result: &QuerySet, mode: OutputMode) -> Result<String, anyhow::Error> {
    let table = ListingTable::from_queryset(result);
    match mode {
        OutputMode::Table => Ok(table.to_markdown()),
        OutputMode::Json => {
            let mut json = serde_json::to_string_pretty(&table)?;
            json.push('\n');
            Ok(json)
        }
    }
}
