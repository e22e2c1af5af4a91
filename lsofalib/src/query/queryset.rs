//! Query set: processed data ready for table rendering.
//!
//! A QuerySet sits between parsed records and the final table output. It
//! represents data that has been:
//! - Grouped and counted by the requested fields (optional)
//! - Sorted by count, highest first
//! - Truncated to the requested number of rows
//!
//! The data pipeline is:
//! 1. Records (parsed lsof lines)
//! 2. QuerySet (grouped, sorted, limited)
//! 3. ListingTable (formatted strings for display)

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::data::columns::Column;
use crate::data::record::Record;

use super::options::{Grouping, QueryOptions};

/// Name of the column holding group sizes.
pub const COUNT_FIELD: &str = "count";

/// One aggregation result: a group key and how many records share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    /// Values of the grouping fields, in grouping order
    pub key: Vec<String>,
    /// Number of records with this key
    pub count: usize,
}

/// Records either kept as-is or collapsed into counted groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuerySet {
    /// Ungrouped records, in input order
    Records { records: Vec<Record> },
    /// Groups sorted by count, highest first
    Groups {
        fields: Vec<Column>,
        groups: Vec<GroupCount>,
    },
}

impl QuerySet {
    /// Apply grouping and the top-N limit to parsed records.
    pub fn build(records: Vec<Record>, options: &QueryOptions) -> Self {
        let mut qs = match &options.grouping {
            Some(grouping) => QuerySet::Groups {
                fields: grouping.fields().to_vec(),
                groups: aggregate(&records, grouping),
            },
            None => QuerySet::Records { records },
        };
        if let Some(n) = options.top {
            qs.truncate(n);
        }
        qs
    }

    /// Number of output rows.
    pub fn len(&self) -> usize {
        match self {
            QuerySet::Records { records } => records.len(),
            QuerySet::Groups { groups, .. } => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the first `n` rows.
    pub fn truncate(&mut self, n: usize) {
        match self {
            QuerySet::Records { records } => records.truncate(n),
            QuerySet::Groups { groups, .. } => groups.truncate(n),
        }
    }
}

/// Count records per distinct combination of the grouping fields.
///
/// Groups are sorted by count, highest first. The sort is stable, so groups
/// with equal counts stay in the order their keys first appeared.
pub fn aggregate(records: &[Record], grouping: &Grouping) -> Vec<GroupCount> {
    let fields = grouping.fields();
    let mut index: HashMap<Vec<&str>, usize> = HashMap::new();
    let mut groups: Vec<GroupCount> = Vec::new();

    for record in records {
        let key: Vec<&str> = fields.iter().map(|f| record.get(*f)).collect();
        match index.get(&key).copied() {
            Some(i) => groups[i].count += 1,
            None => {
                groups.push(GroupCount {
                    key: key.iter().map(|v| v.to_string()).collect(),
                    count: 1,
                });
                index.insert(key, groups.len() - 1);
            }
        }
    }

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    debug!(
        "grouped {} records into {} groups by {}",
        records.len(),
        groups.len(),
        fields
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(",")
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(command: &str, user: &str, name: &str) -> Record {
        Record::from_values([
            command, "1", "", "", user, "cwd", "DIR", "8,1", "4096", "2", name,
        ])
    }

    fn sample_records() -> Vec<Record> {
        vec![
            record("bash", "alice", "/home/alice"),
            record("zsh", "bob", "/home/bob"),
            record("bash", "alice", "/tmp"),
            record("sshd", "root", "/"),
            record("zsh", "bob", "/home/bob"),
            record("bash", "carol", "/home/carol"),
        ]
    }

    fn by(spec: &str) -> Grouping {
        Grouping::parse(spec).unwrap()
    }

    #[test]
    fn test_group_by_command() {
        let records = vec![
            record("bash", "a", "/"),
            record("bash", "a", "/"),
            record("zsh", "a", "/"),
        ];
        let groups = aggregate(&records, &by("COMMAND"));
        assert_eq!(
            groups,
            vec![
                GroupCount {
                    key: vec!["bash".to_string()],
                    count: 2
                },
                GroupCount {
                    key: vec!["zsh".to_string()],
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_key_order_follows_grouping() {
        let groups = aggregate(&sample_records(), &by("USER,COMMAND"));
        assert_eq!(groups[0].key, vec!["alice", "bash"]);
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn test_counts_sum_to_record_count() {
        let records = sample_records();
        for spec in ["COMMAND", "USER", "NAME", "COMMAND,NAME", "FD,TYPE"] {
            let groups = aggregate(&records, &by(spec));
            let total: usize = groups.iter().map(|g| g.count).sum();
            assert_eq!(total, records.len(), "grouping {}", spec);
        }
    }

    #[test]
    fn test_counts_non_increasing() {
        let groups = aggregate(&sample_records(), &by("COMMAND,USER"));
        for pair in groups.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let groups = aggregate(&sample_records(), &by("NAME"));
        let keys: Vec<&str> = groups.iter().map(|g| g.key[0].as_str()).collect();
        assert_eq!(
            keys,
            vec!["/home/bob", "/home/alice", "/tmp", "/", "/home/carol"]
        );
    }

    #[test]
    fn test_empty_values_group_together() {
        let records = vec![record("a", "", "/"), record("b", "", "/")];
        let groups = aggregate(&records, &by("USER"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, vec![""]);
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn test_queryset_ungrouped_keeps_records() {
        let qs = QuerySet::build(sample_records(), &QueryOptions::new());
        match &qs {
            QuerySet::Records { records } => {
                assert_eq!(records.len(), 6);
                assert_eq!(records[3].command, "sshd");
            }
            other => panic!("expected records, got {:?}", other),
        }
    }

    #[test]
    fn test_queryset_top_one_group() {
        let options = QueryOptions::new().grouping(by("COMMAND")).top(1);
        let qs = QuerySet::build(sample_records(), &options);
        match qs {
            QuerySet::Groups { fields, groups } => {
                assert_eq!(fields, vec![Column::Command]);
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].key, vec!["bash"]);
                assert_eq!(groups[0].count, 3);
            }
            other => panic!("expected groups, got {:?}", other),
        }
    }

    #[test]
    fn test_queryset_top_sizes() {
        let records = sample_records();
        for n in 1..=8i64 {
            let grouped = QuerySet::build(
                records.clone(),
                &QueryOptions::new().grouping(by("COMMAND")).top(n),
            );
            assert_eq!(grouped.len(), (n as usize).min(3));

            let raw = QuerySet::build(records.clone(), &QueryOptions::new().top(n));
            assert_eq!(raw.len(), (n as usize).min(records.len()));
        }
    }

    #[test]
    fn test_queryset_non_positive_top_keeps_all() {
        for n in [0, -1] {
            let qs = QuerySet::build(
                sample_records(),
                &QueryOptions::new().grouping(by("COMMAND")).top(n),
            );
            assert_eq!(qs.len(), 3);
        }
    }

    #[test]
    fn test_queryset_empty_input() {
        let qs = QuerySet::build(Vec::new(), &QueryOptions::new().grouping(by("COMMAND")));
        assert!(qs.is_empty());
        let qs = QuerySet::build(Vec::new(), &QueryOptions::new());
        assert!(qs.is_empty());
    }
}
