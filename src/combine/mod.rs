//! Pairwise accumulation of record tables.
//!
//! Two tables with the same row shape are combined column by column. Join
//! columns (typically wavelengths) must agree wherever both sides are valid
//! and pass through. Add columns are summed, or averaged when a weight column
//! is requested. Element masks decide which side contributes.
//!
//! The destination may be one of the inputs, which supports iterative
//! accumulation of many spectra into one table. Every output column is
//! computed before any is written, so a failed call leaves the destination
//! unchanged.

pub mod column;
mod resolve;

use tracing::{debug, trace};

use crate::config::AccumulateConfig;
use crate::error::{Error, Result};
use crate::model::{Array, ColumnOutput, RecordTable};

pub use resolve::Resolved;

/// An accumulate input. Only record tables can be accumulated.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Table(&'a RecordTable),
    Array(&'a Array),
}

impl<'a> Operand<'a> {
    fn table(self, argument: &'static str) -> Result<&'a RecordTable> {
        match self {
            Operand::Table(table) => Ok(table),
            Operand::Array(_) => Err(Error::InvalidArgumentType {
                argument,
                found: "array",
            }),
        }
    }
}

impl<'a> From<&'a RecordTable> for Operand<'a> {
    fn from(table: &'a RecordTable) -> Self {
        Operand::Table(table)
    }
}

impl<'a> From<&'a Array> for Operand<'a> {
    fn from(array: &'a Array) -> Self {
        Operand::Array(array)
    }
}

/// Which input an in-place destination stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Accumulation engine
#[derive(Debug, Clone, Default)]
pub struct TableAccumulator {
    config: AccumulateConfig,
}

impl TableAccumulator {
    /// Create an accumulator with configuration
    pub fn new(config: AccumulateConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &AccumulateConfig {
        &self.config
    }

    /// Accumulate two tables into a newly allocated table
    pub fn accumulate<'a>(
        &self,
        table1: impl Into<Operand<'a>>,
        table2: impl Into<Operand<'a>>,
    ) -> Result<RecordTable> {
        let t1 = table1.into().table("table1")?;
        let t2 = table2.into().table("table2")?;
        let (resolved, outputs) = self.compute(t1, t2, None)?;

        let masked = resolved.requires_mask(t1, t2);
        let mut result = if masked {
            RecordTable::masked(t1.shape().clone())
        } else {
            RecordTable::new(t1.shape().clone())
        };
        write_outputs(&mut result, outputs);

        debug!(
            join = ?resolved.join,
            add = ?resolved.add,
            weight = ?resolved.weight,
            shape = %result.shape(),
            masked,
            "accumulated into new table"
        );
        Ok(result)
    }

    /// Accumulate two tables into a caller-supplied result.
    ///
    /// Output columns missing from `result` are appended to it.
    pub fn accumulate_into<'a>(
        &self,
        table1: impl Into<Operand<'a>>,
        table2: impl Into<Operand<'a>>,
        result: &mut RecordTable,
    ) -> Result<()> {
        let t1 = table1.into().table("table1")?;
        let t2 = table2.into().table("table2")?;
        let (resolved, outputs) = self.compute(t1, t2, Some(&*result))?;
        write_outputs(result, outputs);

        debug!(
            join = ?resolved.join,
            add = ?resolved.add,
            weight = ?resolved.weight,
            shape = %result.shape(),
            "accumulated into result"
        );
        Ok(())
    }

    /// Accumulate `other` into `target`, where `target` is also the input
    /// on `side`.
    pub fn accumulate_in_place<'a>(
        &self,
        target: &mut RecordTable,
        other: impl Into<Operand<'a>>,
        side: Side,
    ) -> Result<()> {
        let other = other.into().table("other")?;
        let (resolved, outputs) = {
            let current: &RecordTable = target;
            match side {
                Side::First => self.compute(current, other, Some(current))?,
                Side::Second => self.compute(other, current, Some(current))?,
            }
        };
        write_outputs(target, outputs);

        debug!(
            join = ?resolved.join,
            add = ?resolved.add,
            weight = ?resolved.weight,
            ?side,
            "accumulated in place"
        );
        Ok(())
    }

    /// Validate inputs and destination, then compute every output column.
    ///
    /// Nothing is written here; both operands are read in full first.
    fn compute(
        &self,
        t1: &RecordTable,
        t2: &RecordTable,
        result: Option<&RecordTable>,
    ) -> Result<(Resolved, Vec<ColumnOutput>)> {
        if t1.shape() != t2.shape() {
            return Err(Error::shape_mismatch("table2", t1.shape(), t2.shape()));
        }
        let resolved = Resolved::new(&self.config, t1, t2)?;

        if let Some(result) = result {
            if result.shape() != t1.shape() {
                return Err(Error::shape_mismatch("result", t1.shape(), result.shape()));
            }
            if resolved.requires_mask(t1, t2) && !result.has_mask() {
                return Err(Error::MaskDowngrade("result"));
            }
        }

        let mut outputs = Vec::with_capacity(resolved.output_names().count());
        for name in &resolved.join {
            trace!(column = %name, "joining column");
            outputs.push(column::join(name, t1, t2)?);
        }

        match &resolved.weight {
            None => {
                for name in &resolved.add {
                    trace!(column = %name, "summing column");
                    outputs.push(column::sum(name, t1, t2));
                }
            }
            Some(weight) => {
                let b1 = column::base_weights(t1, weight);
                let b2 = column::base_weights(t2, weight);
                for name in &resolved.add {
                    trace!(column = %name, weight = %weight, "averaging column");
                    outputs.push(column::weighted_mean(name, t1, &b1, t2, &b2));
                }
                let w1 = column::side_weights(t1, &resolved.add, &b1);
                let w2 = column::side_weights(t2, &resolved.add, &b2);
                outputs.push(column::total_weight(weight, &w1, &w2));
            }
        }

        Ok((resolved, outputs))
    }
}

fn write_outputs(result: &mut RecordTable, outputs: Vec<ColumnOutput>) {
    for column in outputs {
        result.write_column(column);
    }
}

/// Accumulate two tables with the given configuration
pub fn accumulate<'a>(
    table1: impl Into<Operand<'a>>,
    table2: impl Into<Operand<'a>>,
    config: &AccumulateConfig,
) -> Result<RecordTable> {
    TableAccumulator::new(config.clone()).accumulate(table1, table2)
}
