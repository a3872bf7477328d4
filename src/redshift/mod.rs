//! Redshift transforms of spectral record tables.
//!
//! Every ruled quantity `X` is rescaled with a power law:
//!
//! ```text
//! X_out = X_in * ((1 + z_out) / (1 + z_in))^exponent
//! ```
//!
//! Redshifts may be scalars or arrays. The factor is broadcast against the
//! row shape of the input, so one redshift can be applied to many spectra or
//! many redshifts to one spectrum. Columns of the input table without a rule
//! are copied unchanged, and element masks are carried to the output.

mod rule;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::{broadcast, Array, Broadcast, ColumnOutput, RecordTable, Shape};

pub use rule::TransformRule;

/// Applies a set of power-law rules for one pair of redshifts
#[derive(Debug, Clone)]
pub struct RedshiftTransformer {
    factor: Array,
    rules: Vec<TransformRule>,
}

/// Where a ruled column reads its values from
enum Source<'a> {
    Table {
        values: &'a [f64],
        mask: Option<&'a [bool]>,
    },
    Explicit(&'a Array),
}

/// Validated layout of one transform call
struct Plan<'a> {
    shape_in: Shape,
    shape_out: Shape,
    masked: bool,
    ruled: Vec<(&'a TransformRule, Source<'a>)>,
}

impl RedshiftTransformer {
    /// Create a transformer from `z_in` to `z_out`.
    ///
    /// Fails with [`Error::InvalidRedshift`] if any redshift is negative, and
    /// with [`Error::ShapeMismatch`] if the two do not broadcast.
    pub fn new(z_in: impl Into<Array>, z_out: impl Into<Array>) -> Result<Self> {
        let z_in = z_in.into();
        let z_out = z_out.into();
        check_redshift("z_in", &z_in)?;
        check_redshift("z_out", &z_out)?;
        Ok(Self {
            factor: redshift_factor(&z_in, &z_out)?,
            rules: Vec::new(),
        })
    }

    /// Add a rule
    pub fn with_rule(mut self, rule: TransformRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add several rules
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = TransformRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// The broadcast factor `(1 + z_out) / (1 + z_in)`
    pub fn factor(&self) -> &Array {
        &self.factor
    }

    /// Rules in application order
    pub fn rules(&self) -> &[TransformRule] {
        &self.rules
    }

    /// Transform into a newly allocated table
    pub fn transform(&self, data_in: Option<&RecordTable>) -> Result<RecordTable> {
        let plan = self.plan(data_in, None)?;
        let outputs = self.compute(&plan, data_in)?;

        let mut data_out = if plan.masked {
            RecordTable::masked(plan.shape_out.clone())
        } else {
            RecordTable::new(plan.shape_out.clone())
        };
        for column in outputs {
            data_out.write_column(column);
        }

        debug!(
            rules = self.rules.len(),
            columns = data_out.column_count(),
            shape = %plan.shape_out,
            masked = plan.masked,
            "redshift transform allocated output"
        );
        Ok(data_out)
    }

    /// Transform into a caller-supplied table.
    ///
    /// `data_out` must carry every input and ruled column, have the
    /// broadcast output shape, and be masked when any source is. It is left
    /// unchanged if validation fails.
    pub fn transform_into(
        &self,
        data_in: Option<&RecordTable>,
        data_out: &mut RecordTable,
    ) -> Result<()> {
        let outputs = {
            let plan = self.plan(data_in, Some(&*data_out))?;
            self.compute(&plan, data_in)?
        };
        let count = outputs.len();
        for column in outputs {
            data_out.write_column(column);
        }

        debug!(
            rules = self.rules.len(),
            columns = count,
            shape = %data_out.shape(),
            "redshift transform written to data_out"
        );
        Ok(())
    }

    /// Transform a table in place, using it as both input and output.
    ///
    /// The redshift factor must not grow the table's row shape.
    pub fn transform_in_place(&self, table: &mut RecordTable) -> Result<()> {
        let outputs = {
            let data_in: &RecordTable = table;
            let plan = self.plan(Some(data_in), Some(data_in))?;
            self.compute(&plan, Some(data_in))?
        };
        for column in outputs {
            table.write_column(column);
        }

        debug!(
            rules = self.rules.len(),
            shape = %table.shape(),
            "redshift transform applied in place"
        );
        Ok(())
    }

    /// Validate rules and destinations without touching any data
    fn plan<'a>(
        &'a self,
        data_in: Option<&'a RecordTable>,
        data_out: Option<&RecordTable>,
    ) -> Result<Plan<'a>> {
        let mut shape_in = data_in.map(|t| t.shape().clone());
        let mut masked = data_in.is_some_and(RecordTable::has_mask);
        let mut ruled = Vec::with_capacity(self.rules.len());

        for (i, rule) in self.rules.iter().enumerate() {
            let name = rule.name();
            if self.rules[..i].iter().any(|r| r.name() == name) {
                return Err(Error::InvalidRule(format!("duplicate rule for {}", name)));
            }
            if let Some(table) = data_in {
                if !table.contains(name) {
                    return Err(Error::MissingColumn {
                        column: name.to_string(),
                        table: "data_in",
                    });
                }
            }
            if let Some(table) = data_out {
                if !table.contains(name) {
                    return Err(Error::MissingColumn {
                        column: name.to_string(),
                        table: "data_out",
                    });
                }
            }

            let source = match (rule.source(), data_in) {
                (Some(array), table) => {
                    let expected = shape_in.get_or_insert_with(|| array.shape().clone());
                    if *expected != *array.shape() {
                        return Err(Error::shape_mismatch(
                            format!("array_in of {}", name),
                            expected,
                            array.shape(),
                        ));
                    }
                    if table.is_some() {
                        return Err(Error::ColumnSourceConflict(name.to_string()));
                    }
                    masked |= array.has_mask();
                    Source::Explicit(array)
                }
                (None, Some(table)) => Source::Table {
                    values: table.column(name).unwrap_or_default(),
                    mask: table.mask_of(name),
                },
                (None, None) => return Err(Error::MissingSource(name.to_string())),
            };
            ruled.push((rule, source));
        }

        let shape_in = shape_in.unwrap_or_else(Shape::scalar);
        let shape_out = broadcast(&shape_in, self.factor.shape(), "redshift factor")?;

        if let Some(table) = data_out {
            if let Some(column) = data_in
                .into_iter()
                .flat_map(|t| t.column_names())
                .find(|c| !table.contains(c))
            {
                return Err(Error::MissingColumn {
                    column: column.to_string(),
                    table: "data_out",
                });
            }
            if table.shape() != &shape_out {
                return Err(Error::shape_mismatch("data_out", &shape_out, table.shape()));
            }
            if masked && !table.has_mask() {
                return Err(Error::MaskDowngrade("data_out"));
            }
        }

        Ok(Plan {
            shape_in,
            shape_out,
            masked,
            ruled,
        })
    }

    /// Compute every output column from fully-read sources
    fn compute(&self, plan: &Plan<'_>, data_in: Option<&RecordTable>) -> Result<Vec<ColumnOutput>> {
        let rows = Broadcast::new(&plan.shape_in, &plan.shape_out)?;
        let factors = Broadcast::new(self.factor.shape(), &plan.shape_out)?;
        let mut outputs = Vec::new();

        // Unruled input columns are copied verbatim.
        if let Some(table) = data_in {
            for name in table.column_names() {
                if plan.ruled.iter().any(|(rule, _)| rule.name() == name) {
                    continue;
                }
                let values = table.column(name).unwrap_or_default();
                outputs.push(ColumnOutput {
                    name: name.to_string(),
                    values: rows.indices().map(|i| values[i]).collect(),
                    mask: table
                        .mask_of(name)
                        .map(|mask| rows.indices().map(|i| mask[i]).collect()),
                });
            }
        }

        for (rule, source) in &plan.ruled {
            let (values, mask) = match source {
                Source::Table { values, mask } => (*values, *mask),
                Source::Explicit(array) => (array.values(), array.mask()),
            };
            let scale: Vec<f64> = self
                .factor
                .values()
                .iter()
                .map(|f| f.powf(rule.exponent()))
                .collect();
            trace!(column = rule.name(), exponent = rule.exponent(), "rescaling column");

            let output = ColumnOutput {
                name: rule.name().to_string(),
                values: rows
                    .indices()
                    .zip(factors.indices())
                    .map(|(i, f)| values[i] * scale[f])
                    .collect(),
                mask: mask.map(|mask| rows.indices().map(|i| mask[i]).collect()),
            };
            outputs.push(output);
        }

        // Ruled input columns go back to their input position.
        if let Some(table) = data_in {
            order_like_input(&mut outputs, table);
        }
        Ok(outputs)
    }
}

/// Sort outputs so that input columns keep the input table's order
fn order_like_input(outputs: &mut [ColumnOutput], table: &RecordTable) {
    let position = |name: &str| table.column_names().position(|c| c == name);
    outputs.sort_by_key(|c| position(&c.name).unwrap_or(usize::MAX));
}

/// Reject negative (and NaN) redshifts
fn check_redshift(which: &'static str, z: &Array) -> Result<()> {
    match z.values().iter().find(|&&v| !(v >= 0.0)) {
        Some(&value) => Err(Error::InvalidRedshift { which, value }),
        None => Ok(()),
    }
}

/// Elementwise `(1 + z_out) / (1 + z_in)` over the broadcast shape
fn redshift_factor(z_in: &Array, z_out: &Array) -> Result<Array> {
    let shape = broadcast(z_in.shape(), z_out.shape(), "z_out")?;
    let zi = Broadcast::new(z_in.shape(), &shape)?;
    let zo = Broadcast::new(z_out.shape(), &shape)?;
    let values = zi
        .indices()
        .zip(zo.indices())
        .map(|(i, o)| (1.0 + z_out.values()[o]) / (1.0 + z_in.values()[i]))
        .collect();
    Array::with_shape(shape, values)
}

/// Transform `data_in` (or the rules' explicit arrays) from `z_in` to
/// `z_out` into a newly allocated table.
pub fn transform(
    z_in: impl Into<Array>,
    z_out: impl Into<Array>,
    data_in: Option<&RecordTable>,
    rules: &[TransformRule],
) -> Result<RecordTable> {
    RedshiftTransformer::new(z_in, z_out)?
        .with_rules(rules.iter().cloned())
        .transform(data_in)
}

/// Transform from `z_in` to `z_out`, writing into `data_out`
pub fn transform_into(
    z_in: impl Into<Array>,
    z_out: impl Into<Array>,
    data_in: Option<&RecordTable>,
    data_out: &mut RecordTable,
    rules: &[TransformRule],
) -> Result<()> {
    RedshiftTransformer::new(z_in, z_out)?
        .with_rules(rules.iter().cloned())
        .transform_into(data_in, data_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spectrum() -> RecordTable {
        RecordTable::new([4])
            .with_column("wlen", vec![4000.0, 5000.0, 6000.0, 7000.0])
            .unwrap()
            .with_column("flux", vec![1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_filled_column("ivar", 0.5)
            .unwrap()
    }

    fn rules() -> Vec<TransformRule> {
        vec![
            TransformRule::new("wlen", 1.0).unwrap(),
            TransformRule::new("flux", -1.0).unwrap(),
        ]
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "length differs");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() <= 1e-12 * e.abs().max(1.0), "element {}: {} != {}", i, a, e);
        }
    }

    #[test]
    fn test_scalar_transform() {
        let out = transform(0.0, 1.0, Some(&spectrum()), &rules()).unwrap();
        assert_eq!(out.shape(), &Shape::from([4]));
        assert!(!out.has_mask());
        assert_close(out.column("wlen").unwrap(), &[8000.0, 10000.0, 12000.0, 14000.0]);
        assert_close(out.column("flux").unwrap(), &[0.5, 1.0, 1.5, 2.0]);
        // Unruled columns are copied.
        assert_eq!(out.column("ivar"), Some(&[0.5; 4][..]));
        let names: Vec<_> = out.column_names().collect();
        assert_eq!(names, vec!["wlen", "flux", "ivar"]);
    }

    #[test]
    fn test_no_rules_copies_input() {
        let input = spectrum();
        let out = transform(0.5, 2.0, Some(&input), &[]).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_array_redshift_broadcasts_over_rows() {
        let z_out = Array::with_shape([3, 1], vec![0.0, 1.0, 3.0]).unwrap();
        let out = transform(0.0, z_out, Some(&spectrum()), &rules()).unwrap();
        assert_eq!(out.shape(), &Shape::from([3, 4]));
        let flux = out.column("flux").unwrap();
        assert_close(&flux[0..4], &[1.0, 2.0, 3.0, 4.0]);
        assert_close(&flux[4..8], &[0.5, 1.0, 1.5, 2.0]);
        assert_close(&flux[8..12], &[0.25, 0.5, 0.75, 1.0]);
        // Copied columns broadcast too.
        assert_eq!(out.column("ivar").map(<[f64]>::len), Some(12));
    }

    #[test]
    fn test_per_row_redshift() {
        let z_in = Array::from_vec(vec![0.0, 1.0, 0.0, 1.0]);
        let out = transform(z_in, 1.0, Some(&spectrum()), &rules()).unwrap();
        assert_eq!(out.shape(), &Shape::from([4]));
        assert_close(out.column("flux").unwrap(), &[0.5, 2.0, 1.5, 4.0]);
    }

    #[test]
    fn test_negative_redshift() {
        assert!(matches!(
            transform(-0.1, 1.0, Some(&spectrum()), &rules()),
            Err(Error::InvalidRedshift { which: "z_in", .. })
        ));
        let z_out = Array::from_vec(vec![0.0, 1.0, -2.0]);
        assert!(matches!(
            RedshiftTransformer::new(0.0, z_out),
            Err(Error::InvalidRedshift { which: "z_out", value }) if value == -2.0
        ));
        assert!(RedshiftTransformer::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_incompatible_redshifts() {
        let z_in = Array::from_vec(vec![0.0, 1.0]);
        let z_out = Array::from_vec(vec![0.0, 1.0, 2.0]);
        assert!(matches!(
            RedshiftTransformer::new(z_in, z_out),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_redshift_does_not_broadcast_with_data() {
        let z_out = Array::from_vec(vec![0.0, 1.0, 3.0]);
        assert!(matches!(
            transform(0.0, z_out, Some(&spectrum()), &rules()),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_explicit_arrays_without_table() {
        let wlen = Array::from_vec(vec![4000.0, 5000.0]);
        let flux = Array::from_vec(vec![2.0, 4.0])
            .with_mask(vec![false, true])
            .unwrap();
        let rules = vec![
            TransformRule::new("wlen", 1.0).unwrap().with_source(wlen),
            TransformRule::new("flux", -1.0).unwrap().with_source(flux),
        ];
        let out = transform(1.0, 3.0, None, &rules).unwrap();
        assert!(out.has_mask());
        assert_close(out.column("wlen").unwrap(), &[8000.0, 10000.0]);
        assert_close(out.column("flux").unwrap(), &[1.0, 2.0]);
        assert_eq!(out.mask_of("flux"), Some(&[false, true][..]));
        assert_eq!(out.mask_of("wlen"), Some(&[false, false][..]));
    }

    #[test]
    fn test_explicit_array_shapes_must_agree() {
        let rules = vec![
            TransformRule::new("wlen", 1.0)
                .unwrap()
                .with_source(Array::from_vec(vec![1.0, 2.0])),
            TransformRule::new("flux", -1.0)
                .unwrap()
                .with_source(Array::from_vec(vec![1.0, 2.0, 3.0])),
        ];
        assert!(matches!(
            transform(0.0, 1.0, None, &rules),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_source() {
        assert_eq!(
            transform(0.0, 1.0, None, &rules()).unwrap_err(),
            Error::MissingSource("wlen".into())
        );
    }

    #[test]
    fn test_source_conflict() {
        let rule = TransformRule::new("flux", -1.0)
            .unwrap()
            .with_source(Array::from_vec(vec![1.0; 4]));
        assert_eq!(
            transform(0.0, 1.0, Some(&spectrum()), &[rule]).unwrap_err(),
            Error::ColumnSourceConflict("flux".into())
        );
    }

    #[test]
    fn test_array_shape_checked_before_conflict() {
        let rule = TransformRule::new("flux", -1.0)
            .unwrap()
            .with_source(Array::from_vec(vec![1.0; 3]));
        assert!(matches!(
            transform(0.0, 1.0, Some(&spectrum()), &[rule]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_masked_array_needs_masked_destination() {
        let flux = Array::from_vec(vec![2.0, 4.0])
            .with_mask(vec![false, true])
            .unwrap();
        let rule = TransformRule::new("flux", -1.0).unwrap().with_source(flux);

        let mut plain = RecordTable::new([2]).with_filled_column("flux", 0.0).unwrap();
        let before = plain.clone();
        assert_eq!(
            transform_into(0.0, 1.0, None, &mut plain, &[rule.clone()]).unwrap_err(),
            Error::MaskDowngrade("data_out")
        );
        assert_eq!(plain, before);

        let mut masked = before.masked_copy();
        transform_into(0.0, 1.0, None, &mut masked, &[rule]).unwrap();
        assert_eq!(masked.mask_of("flux"), Some(&[false, true][..]));
    }

    #[test]
    fn test_missing_column() {
        let rule = TransformRule::new("sky", 1.0).unwrap();
        assert!(matches!(
            transform(0.0, 1.0, Some(&spectrum()), &[rule]),
            Err(Error::MissingColumn { table: "data_in", .. })
        ));
    }

    #[test]
    fn test_duplicate_rule() {
        let rules = vec![
            TransformRule::new("flux", -1.0).unwrap(),
            TransformRule::new("flux", 1.0).unwrap(),
        ];
        assert!(matches!(
            transform(0.0, 1.0, Some(&spectrum()), &rules),
            Err(Error::InvalidRule(_))
        ));
    }

    #[test]
    fn test_masked_input_propagates() {
        let mut input = spectrum().masked_copy();
        input.mask_element("flux", 1, true).unwrap();
        input.mask_element("ivar", 3, true).unwrap();

        let out = transform(0.0, 1.0, Some(&input), &rules()).unwrap();
        assert!(out.has_mask());
        assert_eq!(out.mask_of("flux"), Some(&[false, true, false, false][..]));
        assert_eq!(out.mask_of("ivar"), Some(&[false, false, false, true][..]));
        // Masked elements are still rescaled.
        assert_close(out.column("flux").unwrap(), &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_transform_into() {
        let mut data_out = RecordTable::new([4])
            .with_filled_column("wlen", 0.0)
            .unwrap()
            .with_filled_column("flux", 0.0)
            .unwrap()
            .with_filled_column("ivar", 0.0)
            .unwrap()
            .with_filled_column("extra", 7.0)
            .unwrap();
        transform_into(0.0, 1.0, Some(&spectrum()), &mut data_out, &rules()).unwrap();
        assert_close(data_out.column("flux").unwrap(), &[0.5, 1.0, 1.5, 2.0]);
        assert_eq!(data_out.column("ivar"), Some(&[0.5; 4][..]));
        assert_eq!(data_out.column("extra"), Some(&[7.0; 4][..]));
    }

    #[test]
    fn test_transform_into_validates_destination() {
        let input = spectrum();

        let mut wrong_shape = RecordTable::new([5])
            .with_filled_column("wlen", 0.0)
            .unwrap()
            .with_filled_column("flux", 0.0)
            .unwrap()
            .with_filled_column("ivar", 0.0)
            .unwrap();
        let before = wrong_shape.clone();
        assert!(matches!(
            transform_into(0.0, 1.0, Some(&input), &mut wrong_shape, &rules()),
            Err(Error::ShapeMismatch { .. })
        ));
        assert_eq!(wrong_shape, before);

        let mut missing = RecordTable::new([4]).with_filled_column("wlen", 0.0).unwrap();
        assert!(matches!(
            transform_into(0.0, 1.0, Some(&input), &mut missing, &rules()),
            Err(Error::MissingColumn { table: "data_out", .. })
        ));

        let mut plain = input.clone();
        assert_eq!(
            transform_into(0.0, 1.0, Some(&input.masked_copy()), &mut plain, &rules())
                .unwrap_err(),
            Error::MaskDowngrade("data_out")
        );
        assert_eq!(plain, input);
    }

    #[test]
    fn test_reused_destination_clears_stale_masks() {
        let mut data_out = RecordTable::masked([2])
            .with_filled_column("flux", 0.0)
            .unwrap();
        data_out.mask_element("flux", 0, true).unwrap();
        let rule = TransformRule::new("flux", -1.0)
            .unwrap()
            .with_source(Array::from_vec(vec![2.0, 2.0]));
        transform_into(0.0, 1.0, None, &mut data_out, &[rule]).unwrap();
        assert_eq!(data_out.mask_of("flux"), Some(&[false, false][..]));
        assert_close(data_out.column("flux").unwrap(), &[1.0, 1.0]);
    }

    #[test]
    fn test_in_place() {
        let mut table = spectrum();
        RedshiftTransformer::new(0.0, 1.0)
            .unwrap()
            .with_rules(rules())
            .transform_in_place(&mut table)
            .unwrap();
        assert_close(table.column("flux").unwrap(), &[0.5, 1.0, 1.5, 2.0]);

        // A factor that grows the row shape cannot be applied in place.
        let z_out = Array::with_shape([2, 1], vec![0.0, 1.0]).unwrap();
        let err = RedshiftTransformer::new(0.0, z_out)
            .unwrap()
            .with_rules(rules())
            .transform_in_place(&mut table)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_no_input_at_all() {
        let z_out = Array::from_vec(vec![1.0, 2.0]);
        let out = transform(0.0, z_out, None, &[]).unwrap();
        assert_eq!(out.shape(), &Shape::from([2]));
        assert_eq!(out.column_count(), 0);
    }

    #[test]
    fn test_json_rules() {
        let rules: Vec<TransformRule> = serde_json::from_str(
            r#"[{"name": "wlen", "exponent": 1}, {"name": "flux", "exponent": -1}]"#,
        )
        .unwrap();
        let out = transform(0.0, 1.0, Some(&spectrum()), &rules).unwrap();
        assert_close(out.column("flux").unwrap(), &[0.5, 1.0, 1.5, 2.0]);
    }

    proptest! {
        #[test]
        fn test_equal_redshifts_are_identity(
            z in 0.0f64..10.0,
            exponent in -4.0f64..4.0,
            values in prop::collection::vec(-1e6f64..1e6, 1..16),
        ) {
            let input = RecordTable::new([values.len()])
                .with_column("flux", values.clone())
                .unwrap();
            let rule = TransformRule::new("flux", exponent).unwrap();
            let out = transform(z, z, Some(&input), &[rule]).unwrap();
            prop_assert_eq!(out.column("flux").unwrap(), values.as_slice());
        }

        #[test]
        fn test_power_law(
            z_in in 0.0f64..5.0,
            z_out in 0.0f64..5.0,
            exponent in -3.0f64..3.0,
            values in prop::collection::vec(-1e3f64..1e3, 1..16),
        ) {
            let input = RecordTable::new([values.len()])
                .with_column("flux", values.clone())
                .unwrap();
            let rule = TransformRule::new("flux", exponent).unwrap();
            let out = transform(z_in, z_out, Some(&input), &[rule]).unwrap();
            let factor = ((1.0 + z_out) / (1.0 + z_in)).powf(exponent);
            for (a, v) in out.column("flux").unwrap().iter().zip(&values) {
                let expected = v * factor;
                prop_assert!((a - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }

        #[test]
        fn test_negative_redshift_rejected(z in -100.0f64..-1e-9, other in 0.0f64..5.0) {
            let is_invalid_redshift =
                |r: Result<RedshiftTransformer>| matches!(r, Err(Error::InvalidRedshift { .. }));
            prop_assert!(is_invalid_redshift(RedshiftTransformer::new(z, other)));
            prop_assert!(is_invalid_redshift(RedshiftTransformer::new(other, z)));
        }
    }
}
