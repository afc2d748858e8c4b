//! Slate ingestion: a delimited player file becomes an in-memory table.
//!
//! A [`Slate`] is the immutable inventory for one optimization run. Each row
//! carries a projection and a salary, resolved from the CSV header through a
//! caller-supplied [`ColumnRoles`] mapping (defaults: `proj` / `salary`).
//! The row's position in the file is its stable id; every downstream stage
//! refers to players by that id only.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Maps logical column roles to concrete header names.
///
/// Different sites export projections under different headers (`proj`,
/// `fpts`, `points`, ...). The optimizer only cares about two roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    /// Header of the projected-points column.
    pub points: String,
    /// Header of the salary column.
    pub salary: String,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            points: "proj".into(),
            salary: "salary".into(),
        }
    }
}

impl ColumnRoles {
    /// Column roles with a custom points and salary header.
    pub fn new(points: impl Into<String>, salary: impl Into<String>) -> Self {
        Self {
            points: points.into(),
            salary: salary.into(),
        }
    }
}

/// One slate row.
///
/// `name` and `pos` are carried for reporting only; the core stages operate
/// on `proj` and `salary` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Player name, taken from a `player` column when present.
    pub name: String,
    /// Roster position, taken from a `pos` column when present.
    pub pos: String,
    /// Projected points.
    pub proj: f64,
    /// Listed salary, before any captain scaling.
    pub salary: f64,
}

/// The immutable player inventory for one run.
#[derive(Debug, Clone, Default)]
pub struct Slate {
    items: Vec<Item>,
}

impl Slate {
    /// Builds a slate directly from items. Row order defines the ids.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Reads a slate from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>, roles: &ColumnRoles) -> Result<Self, ConfigError> {
        let reader = csv::Reader::from_path(path.as_ref())?;
        Self::from_csv(reader, roles)
    }

    /// Reads a slate from any CSV source.
    pub fn from_csv_reader<R: Read>(reader: R, roles: &ColumnRoles) -> Result<Self, ConfigError> {
        Self::from_csv(csv::Reader::from_reader(reader), roles)
    }

    fn from_csv<R: Read>(
        mut reader: csv::Reader<R>,
        roles: &ColumnRoles,
    ) -> Result<Self, ConfigError> {
        let headers = reader.headers()?.clone();
        let find = |name: &str| headers.iter().position(|h| h == name);

        let points_idx = find(&roles.points).ok_or_else(|| ConfigError::MissingColumn {
            role: "points",
            column: roles.points.clone(),
        })?;
        let salary_idx = find(&roles.salary).ok_or_else(|| ConfigError::MissingColumn {
            role: "salary",
            column: roles.salary.clone(),
        })?;
        let name_idx = find("player");
        let pos_idx = find("pos");

        let parse = |row: usize, column: &str, value: &str| -> Result<f64, ConfigError> {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidValue {
                    row,
                    column: column.to_string(),
                    value: value.to_string(),
                })
        };

        let mut items = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let field = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i)).unwrap_or("").to_string()
            };
            items.push(Item {
                name: field(name_idx),
                pos: field(pos_idx),
                proj: parse(row, &roles.points, record.get(points_idx).unwrap_or(""))?,
                salary: parse(row, &roles.salary, record.get(salary_idx).unwrap_or(""))?,
            });
        }
        Ok(Self { items })
    }

    /// Number of rows in the slate.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the slate has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All rows, id order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The row with the given id.
    pub fn item(&self, id: usize) -> &Item {
        &self.items[id]
    }

    /// Id → projected points lookup, built once per run.
    pub fn projections(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.proj).collect()
    }

    /// Id → salary lookup, built once per run.
    pub fn salaries(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.salary).collect()
    }
}
