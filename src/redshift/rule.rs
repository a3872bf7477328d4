//! Per-column power-law rules

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::Array;

/// How one output column is derived: `value * factor^exponent`.
///
/// The values come from the named column of the input table, or from an
/// explicit array when no input table is given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct TransformRule {
    name: String,
    exponent: f64,
    source: Option<Array>,
}

impl TransformRule {
    /// Create a rule that reads `name` from the input table
    pub fn new(name: impl Into<String>, exponent: f64) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidRule("empty column name".to_string()));
        }
        if !exponent.is_finite() {
            return Err(Error::InvalidRule(format!(
                "Invalid exponent for {}: {}",
                name, exponent
            )));
        }
        Ok(Self {
            name,
            exponent,
            source: None,
        })
    }

    /// Read the values from an explicit array instead of the input table
    pub fn with_source(mut self, array: Array) -> Self {
        self.source = Some(array);
        self
    }

    /// Output column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Power applied to the redshift factor
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Explicit source array, if any
    pub fn source(&self) -> Option<&Array> {
        self.source.as_ref()
    }
}

impl TryFrom<Value> for TransformRule {
    type Error = Error;

    /// Accepts `{"name": "flux", "exponent": -1, "array_in": {...}}`.
    /// The exponent may also be a numeric string.
    fn try_from(value: Value) -> Result<Self> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(Error::InvalidRule(format!(
                    "expected a rule object, found {}",
                    other
                )))
            }
        };

        let name = match fields.remove("name") {
            Some(Value::String(name)) => name,
            other => {
                return Err(Error::InvalidRule(format!(
                    "Invalid name in rule: {}",
                    other.unwrap_or(Value::Null)
                )))
            }
        };
        let exponent = parse_exponent(&name, fields.remove("exponent"))?;
        let source = take_source(&name, &mut fields)?;

        if let Some(key) = fields.keys().next() {
            return Err(Error::InvalidRule(format!(
                "Unknown key '{}' in rule for {}",
                key, name
            )));
        }

        let rule = TransformRule::new(name, exponent)?;
        Ok(match source {
            Some(array) => rule.with_source(array),
            None => rule,
        })
    }
}

fn parse_exponent(name: &str, value: Option<Value>) -> Result<f64> {
    let invalid = |shown: &dyn std::fmt::Display| {
        Error::InvalidRule(format!("Invalid exponent for {}: {}", name, shown))
    };
    match value {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(&n)),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid(&s)),
        Some(other) => Err(invalid(&other)),
        None => Err(invalid(&"missing")),
    }
}

fn take_source(name: &str, fields: &mut Map<String, Value>) -> Result<Option<Array>> {
    match fields.remove("array_in") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
            Error::InvalidRule(format!("Invalid array_in for {}: {}", name, e))
        }),
    }
}
