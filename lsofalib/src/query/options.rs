//! Input options for the aggregation stage.
//!
//! This module contains the configuration types that control how parsed
//! records are grouped and limited.

use serde::Serialize;
use std::str::FromStr;

use crate::data::columns::Column;
use crate::error::LsofaError;
use crate::Result;

/// Ordered, non-empty list of columns to group records by.
///
/// Order matters: group keys and output columns follow it, not the
/// canonical column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grouping {
    fields: Vec<Column>,
}

impl Grouping {
    /// Build from a list of columns.
    pub fn new(fields: Vec<Column>) -> Result<Self> {
        if fields.is_empty() {
            return Err(LsofaError::EmptyGrouping);
        }
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                return Err(LsofaError::DuplicateField(field.name().to_string()));
            }
        }
        Ok(Self { fields })
    }

    /// Parse a comma-separated list such as `COMMAND,TASCMD,NAME`.
    pub fn parse(spec: &str) -> Result<Self> {
        let fields = spec
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Column::from_str)
            .collect::<Result<Vec<_>>>()?;
        Self::new(fields)
    }

    pub fn fields(&self) -> &[Column] {
        &self.fields
    }
}

impl FromStr for Grouping {
    type Err = LsofaError;

    fn from_str(s: &str) -> Result<Self> {
        Grouping::parse(s)
    }
}

/// Options for building a query set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryOptions {
    /// Columns to group by; `None` keeps raw records
    pub grouping: Option<Grouping>,
    /// Keep only this many rows after sorting
    pub top: Option<usize>,
}

impl QueryOptions {
    /// Create new default options: no grouping, no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group records by the given fields.
    pub fn grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = Some(grouping);
        self
    }

    /// Limit output to the first `n` rows. Zero or negative means no limit.
    pub fn top(mut self, n: i64) -> Self {
        self.top = usize::try_from(n).ok().filter(|&n| n > 0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_parse_keeps_user_order() {
        let grouping = Grouping::parse("NAME,COMMAND,TASCMD").unwrap();
        assert_eq!(
            grouping.fields(),
            &[Column::Name, Column::Command, Column::TaskCmd]
        );
    }

    #[test]
    fn test_grouping_parse_trims_names() {
        let grouping: Grouping = " COMMAND , user ".parse().unwrap();
        assert_eq!(grouping.fields(), &[Column::Command, Column::User]);
    }

    #[test]
    fn test_grouping_unknown_field() {
        let err = Grouping::parse("COMMAND,PPID").unwrap_err();
        assert!(matches!(err, LsofaError::UnknownField(ref f) if f == "PPID"));
        assert!(err.to_string().contains("SIZE/OFF"));
    }

    #[test]
    fn test_grouping_duplicate_field() {
        let err = Grouping::parse("COMMAND,NAME,command").unwrap_err();
        assert!(matches!(err, LsofaError::DuplicateField(ref f) if f == "COMMAND"));
    }

    #[test]
    fn test_grouping_empty() {
        assert!(matches!(Grouping::parse(""), Err(LsofaError::EmptyGrouping)));
        assert!(matches!(Grouping::parse(" , "), Err(LsofaError::EmptyGrouping)));
        assert!(matches!(Grouping::new(vec![]), Err(LsofaError::EmptyGrouping)));
    }

    #[test]
    fn test_query_options_default() {
        let options = QueryOptions::new();
        assert!(options.grouping.is_none());
        assert!(options.top.is_none());
    }

    #[test]
    fn test_query_options_top() {
        assert_eq!(QueryOptions::new().top(5).top, Some(5));
        assert_eq!(QueryOptions::new().top(0).top, None);
        assert_eq!(QueryOptions::new().top(-3).top, None);
    }
}
