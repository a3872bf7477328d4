//! Resolution of join, add and weight columns

use rustc_hash::FxHashSet;

use crate::config::{AccumulateConfig, ColumnSelection};
use crate::error::{Error, Result};
use crate::model::RecordTable;

/// Output columns of one accumulate call, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub join: Vec<String>,
    pub add: Vec<String>,
    pub weight: Option<String>,
}

impl Resolved {
    /// Resolve the configured columns against both input tables.
    ///
    /// An omitted join selects every column common to both tables that is
    /// neither added nor the weight, in the first table's order.
    pub fn new(config: &AccumulateConfig, t1: &RecordTable, t2: &RecordTable) -> Result<Self> {
        let add = match &config.add {
            Some(selection) => unique_names(selection, "add")?,
            None => Vec::new(),
        };
        for name in &add {
            if !(t1.contains(name) && t2.contains(name)) {
                return Err(Error::InvalidRule(format!(
                    "add column '{}' is not present in both input tables",
                    name
                )));
            }
        }

        let join = match &config.join {
            Some(selection) => {
                let join = unique_names(selection, "join")?;
                if let Some(name) = join.iter().find(|n| !(t1.contains(n) && t2.contains(n))) {
                    return Err(Error::UnknownColumn(name.clone()));
                }
                if let Some(name) = join.iter().find(|n| add.contains(n)) {
                    return Err(Error::InvalidRule(format!(
                        "column '{}' cannot be both joined and added",
                        name
                    )));
                }
                join
            }
            None => t1
                .column_names()
                .filter(|n| t2.contains(n))
                .filter(|n| !add.iter().any(|a| a == n))
                .filter(|n| config.weight.as_deref() != Some(*n))
                .map(str::to_string)
                .collect(),
        };

        if let Some(weight) = &config.weight {
            if weight.is_empty() {
                return Err(Error::InvalidRule("empty weight column name".to_string()));
            }
            if join.contains(weight) || add.contains(weight) {
                return Err(Error::InvalidRule(format!(
                    "weight column '{}' cannot also be joined or added",
                    weight
                )));
            }
        }

        if join.is_empty() && add.is_empty() {
            return Err(Error::NoOutputColumns);
        }

        Ok(Self {
            join,
            add,
            weight: config.weight.clone(),
        })
    }

    /// Whether the output must be mask-capable.
    ///
    /// Join columns, and add columns without a weight, carry masks whenever
    /// either input does. Weighted columns record missing data as weight 0
    /// instead, so a weighted-only output stays plain.
    pub fn requires_mask(&self, t1: &RecordTable, t2: &RecordTable) -> bool {
        let maskable = !self.join.is_empty() || (self.weight.is_none() && !self.add.is_empty());
        (t1.has_mask() || t2.has_mask()) && maskable
    }

    /// Output column names in order
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.join
            .iter()
            .chain(&self.add)
            .chain(&self.weight)
            .map(String::as_str)
    }
}

fn unique_names(selection: &ColumnSelection, what: &str) -> Result<Vec<String>> {
    let mut seen = FxHashSet::default();
    let mut names = Vec::new();
    for name in selection.names() {
        if !seen.insert(name) {
            return Err(Error::InvalidRule(format!(
                "column '{}' listed twice in {}",
                name, what
            )));
        }
        names.push(name.to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(names: &[&str]) -> RecordTable {
        names.iter().fold(RecordTable::new([3]), |t, n| {
            t.with_filled_column(*n, 0.0).unwrap()
        })
    }

    #[test]
    fn test_default_join_is_common_columns() {
        let t1 = table(&["wlen", "flux", "w", "sky"]);
        let t2 = table(&["flux", "wlen", "w"]);
        let config = AccumulateConfig::new().with_add("flux").with_weight("w");
        let resolved = Resolved::new(&config, &t1, &t2).unwrap();
        assert_eq!(resolved.join, vec!["wlen"]);
        assert_eq!(resolved.add, vec!["flux"]);
        let names: Vec<_> = resolved.output_names().collect();
        assert_eq!(names, vec!["wlen", "flux", "w"]);
    }

    #[test]
    fn test_no_common_columns() {
        let t1 = table(&["wlen1", "flux1"]);
        let t2 = table(&["wlen2", "flux2"]);
        assert_eq!(
            Resolved::new(&AccumulateConfig::new(), &t1, &t2),
            Err(Error::NoOutputColumns)
        );
    }

    #[test]
    fn test_join_must_be_in_both() {
        let t1 = table(&["wlen", "flux1"]);
        let t2 = table(&["wlen", "flux2"]);
        for join in ["flux1", "flux12"] {
            let config = AccumulateConfig::new().with_join(join);
            assert_eq!(
                Resolved::new(&config, &t1, &t2),
                Err(Error::UnknownColumn(join.to_string()))
            );
        }
    }

    #[test]
    fn test_invalid_add() {
        let t1 = table(&["wlen", "f1"]);
        let t2 = table(&["wlen", "f2"]);
        for config in [
            AccumulateConfig::new().with_add("f1"),
            AccumulateConfig::new().with_add("f12"),
            AccumulateConfig::new().with_join("wlen").with_add("wlen"),
            AccumulateConfig::new().with_add(["wlen", "wlen"]),
        ] {
            assert!(
                matches!(Resolved::new(&config, &t1, &t2), Err(Error::InvalidRule(_))),
                "accepted {:?}",
                config
            );
        }
    }

    #[test]
    fn test_invalid_weight() {
        let t1 = table(&["f"]);
        let t2 = table(&["f"]);
        let config = AccumulateConfig::new().with_add("f").with_weight("f");
        assert!(matches!(
            Resolved::new(&config, &t1, &t2),
            Err(Error::InvalidRule(_))
        ));
    }

    #[test]
    fn test_requires_mask() {
        let plain = table(&["wlen", "f"]);
        let masked = plain.masked_copy();

        let joined = Resolved::new(&AccumulateConfig::new().with_join("wlen"), &plain, &plain)
            .unwrap();
        assert!(joined.requires_mask(&masked, &masked));
        assert!(joined.requires_mask(&masked, &plain));
        assert!(joined.requires_mask(&plain, &masked));
        assert!(!joined.requires_mask(&plain, &plain));

        let summed = Resolved::new(
            &AccumulateConfig::new().with_join(Vec::<String>::new()).with_add("f"),
            &plain,
            &plain,
        )
        .unwrap();
        assert!(summed.requires_mask(&plain, &masked));

        let weighted = Resolved::new(
            &AccumulateConfig::new().with_join(Vec::<String>::new()).with_add("f").with_weight("w"),
            &plain,
            &plain,
        )
        .unwrap();
        assert!(!weighted.requires_mask(&masked, &masked));
        assert!(!weighted.requires_mask(&masked, &plain));
    }
}
