//! Per-call configuration for table accumulation

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// One column name or an ordered sequence of names
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ColumnSelection {
    One(String),
    Many(Vec<String>),
}

impl ColumnSelection {
    /// Selected names in order
    pub fn names(&self) -> Vec<&str> {
        match self {
            ColumnSelection::One(name) => vec![name.as_str()],
            ColumnSelection::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Check if a name is selected
    pub fn contains(&self, name: &str) -> bool {
        match self {
            ColumnSelection::One(n) => n == name,
            ColumnSelection::Many(names) => names.iter().any(|n| n == name),
        }
    }
}

impl TryFrom<Value> for ColumnSelection {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(ColumnSelection::One(name)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(name) => Ok(name),
                    other => Err(Error::InvalidRule(format!(
                        "column names must be strings, found {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(ColumnSelection::Many),
            other => Err(Error::InvalidRule(format!(
                "expected a column name or a list of names, found {}",
                other
            ))),
        }
    }
}

impl From<&str> for ColumnSelection {
    fn from(name: &str) -> Self {
        ColumnSelection::One(name.to_string())
    }
}

impl From<String> for ColumnSelection {
    fn from(name: String) -> Self {
        ColumnSelection::One(name)
    }
}

impl From<Vec<String>> for ColumnSelection {
    fn from(names: Vec<String>) -> Self {
        ColumnSelection::Many(names)
    }
}

impl From<&[&str]> for ColumnSelection {
    fn from(names: &[&str]) -> Self {
        ColumnSelection::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSelection {
    fn from(names: [&str; N]) -> Self {
        ColumnSelection::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Configuration for accumulating two tables
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccumulateConfig {
    /// Columns to verify and pass through; `None` joins every common
    /// column that is not added or used as the weight
    pub join: Option<ColumnSelection>,
    /// Columns to sum, or average when a weight is requested
    pub add: Option<ColumnSelection>,
    /// Name of the weight column to produce
    pub weight: Option<String>,
}

impl AccumulateConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a loosely-typed configuration such as
    /// `{"join": "wlen", "add": ["flux"], "weight": "w"}`
    pub fn from_json(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| Error::InvalidRule(e.to_string()))
    }

    /// Set join columns
    pub fn with_join(mut self, join: impl Into<ColumnSelection>) -> Self {
        self.join = Some(join.into());
        self
    }

    /// Set add columns
    pub fn with_add(mut self, add: impl Into<ColumnSelection>) -> Self {
        self.add = Some(add.into());
        self
    }

    /// Set the weight column name
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }
}
