//! Element-wise combination of one column from two tables

use crate::error::{Error, Result};
use crate::model::mask::{both_masked, either_masked, first_valid, values_match};
use crate::model::{ColumnOutput, RecordTable};

/// One side of a column: values plus per-element mask flags
struct ColumnSide<'a> {
    values: &'a [f64],
    mask: Option<&'a [bool]>,
}

impl<'a> ColumnSide<'a> {
    fn of(table: &'a RecordTable, name: &str) -> Self {
        Self {
            values: table.column(name).unwrap_or_default(),
            mask: table.mask_of(name),
        }
    }

    #[inline]
    fn masked(&self, i: usize) -> bool {
        self.mask.is_some_and(|m| m[i])
    }
}

fn output_mask(t1: &RecordTable, t2: &RecordTable, flags: Vec<bool>) -> Option<Vec<bool>> {
    (t1.has_mask() || t2.has_mask()).then_some(flags)
}

/// Verify a join column and pass its values through.
///
/// Where neither side is masked the values must match exactly. Each output
/// element comes from the first valid side and is masked only when both
/// sides are.
pub fn join(name: &str, t1: &RecordTable, t2: &RecordTable) -> Result<ColumnOutput> {
    let a = ColumnSide::of(t1, name);
    let b = ColumnSide::of(t2, name);
    let mut values = Vec::with_capacity(a.values.len());
    let mut flags = Vec::with_capacity(a.values.len());

    for (i, (&v1, &v2)) in a.values.iter().zip(b.values).enumerate() {
        let (m1, m2) = (a.masked(i), b.masked(i));
        if !either_masked(m1, m2) && !values_match(v1, v2) {
            return Err(Error::UnmatchedJoin {
                column: name.to_string(),
                index: i,
                left: v1,
                right: v2,
            });
        }
        let (value, masked) = first_valid(v1, m1, v2, m2);
        values.push(value);
        flags.push(masked);
    }

    Ok(ColumnOutput {
        name: name.to_string(),
        values,
        mask: output_mask(t1, t2, flags),
    })
}

/// Sum an add column, a masked side contributing 0.
///
/// Elements masked on both sides keep the first value and stay masked.
pub fn sum(name: &str, t1: &RecordTable, t2: &RecordTable) -> ColumnOutput {
    let a = ColumnSide::of(t1, name);
    let b = ColumnSide::of(t2, name);
    let mut values = Vec::with_capacity(a.values.len());
    let mut flags = Vec::with_capacity(a.values.len());

    for (i, (&v1, &v2)) in a.values.iter().zip(b.values).enumerate() {
        let (m1, m2) = (a.masked(i), b.masked(i));
        let value = if both_masked(m1, m2) {
            v1
        } else {
            let x1 = if m1 { 0.0 } else { v1 };
            let x2 = if m2 { 0.0 } else { v2 };
            x1 + x2
        };
        values.push(value);
        flags.push(both_masked(m1, m2));
    }

    ColumnOutput {
        name: name.to_string(),
        values,
        mask: output_mask(t1, t2, flags),
    }
}

/// Per-element weight a table brings before add-column masks apply.
///
/// The table's own `weight` column is used when it has one, otherwise every
/// element weighs 1. Elements whose weight is masked weigh 0.
pub fn base_weights(table: &RecordTable, weight: &str) -> Vec<f64> {
    let existing = table.column(weight);
    (0..table.len())
        .map(|i| match existing {
            _ if table.is_masked(weight, i) => 0.0,
            Some(w) => w[i],
            None => 1.0,
        })
        .collect()
}

/// Weight a table contributes to the emitted weight column.
///
/// An element masked in any add column contributes 0.
pub fn side_weights(table: &RecordTable, add: &[String], base: &[f64]) -> Vec<f64> {
    base.iter()
        .enumerate()
        .map(|(i, &w)| {
            if add.iter().any(|name| table.is_masked(name, i)) {
                0.0
            } else {
                w
            }
        })
        .collect()
}

/// Weighted mean of an add column.
///
/// Each side weighs its base weight where this column is valid and 0 where
/// it is masked. Where the total weight is 0 the first valid value is kept.
/// The output is never masked: a zero weight marks missing data.
pub fn weighted_mean(
    name: &str,
    t1: &RecordTable,
    b1: &[f64],
    t2: &RecordTable,
    b2: &[f64],
) -> ColumnOutput {
    let a = ColumnSide::of(t1, name);
    let b = ColumnSide::of(t2, name);
    let term = |w: f64, v: f64| if w == 0.0 { 0.0 } else { w * v };

    let values = (0..a.values.len())
        .map(|i| {
            let (v1, v2) = (a.values[i], b.values[i]);
            let (m1, m2) = (a.masked(i), b.masked(i));
            let w1 = if m1 { 0.0 } else { b1[i] };
            let w2 = if m2 { 0.0 } else { b2[i] };
            let total = w1 + w2;
            if total == 0.0 {
                first_valid(v1, m1, v2, m2).0
            } else {
                (term(w1, v1) + term(w2, v2)) / total
            }
        })
        .collect();

    ColumnOutput {
        name: name.to_string(),
        values,
        mask: None,
    }
}

/// Sum of both sides' weights
pub fn total_weight(name: &str, w1: &[f64], w2: &[f64]) -> ColumnOutput {
    ColumnOutput {
        name: name.to_string(),
        values: w1.iter().zip(w2).map(|(a, b)| a + b).collect(),
        mask: None,
    }
}
