//! One parsed lsof row.

use serde::{Deserialize, Serialize};

use super::columns::Column;

/// A single lsof data line split into its eleven trimmed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "COMMAND")]
    pub command: String,
    #[serde(rename = "PID")]
    pub pid: String,
    #[serde(rename = "TID")]
    pub tid: String,
    #[serde(rename = "TASCMD")]
    pub taskcmd: String,
    #[serde(rename = "USER")]
    pub user: String,
    #[serde(rename = "FD")]
    pub fd: String,
    #[serde(rename = "TYPE")]
    pub file_type: String,
    #[serde(rename = "DEVICE")]
    pub device: String,
    #[serde(rename = "SIZE/OFF")]
    pub size_off: String,
    #[serde(rename = "NODE")]
    pub node: String,
    #[serde(rename = "NAME")]
    pub name: String,
}

impl Record {
    /// Value of one column.
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Command => &self.command,
            Column::Pid => &self.pid,
            Column::Tid => &self.tid,
            Column::TaskCmd => &self.taskcmd,
            Column::User => &self.user,
            Column::Fd => &self.fd,
            Column::Type => &self.file_type,
            Column::Device => &self.device,
            Column::SizeOff => &self.size_off,
            Column::Node => &self.node,
            Column::Name => &self.name,
        }
    }

    fn get_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::Command => &mut self.command,
            Column::Pid => &mut self.pid,
            Column::Tid => &mut self.tid,
            Column::TaskCmd => &mut self.taskcmd,
            Column::User => &mut self.user,
            Column::Fd => &mut self.fd,
            Column::Type => &mut self.file_type,
            Column::Device => &mut self.device,
            Column::SizeOff => &mut self.size_off,
            Column::Node => &mut self.node,
            Column::Name => &mut self.name,
        }
    }

    /// Build a record from one value per column, in canonical order.
    pub fn from_values<S: Into<String>>(values: [S; 11]) -> Self {
        let mut record = Record::default();
        for (column, value) in Column::ALL.into_iter().zip(values) {
            *record.get_mut(column) = value.into();
        }
        record
    }

    /// All values in canonical column order.
    pub fn values(&self) -> [&str; 11] {
        Column::ALL.map(|c| self.get(c))
    }

    /// Values of the given columns, in the order given.
    pub fn key(&self, columns: &[Column]) -> Vec<String> {
        columns.iter().map(|c| self.get(*c).to_string()).collect()
    }

    /// True when every field is empty (e.g. a blank input line).
    pub fn is_blank(&self) -> bool {
        self.values().iter().all(|v| v.is_empty())
    }
}
