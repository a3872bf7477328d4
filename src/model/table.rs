//! Record tables: named columns sharing one row shape

use indexmap::IndexMap;

use crate::error::{Error, Result};

use super::shape::Shape;

/// Values and mask computed for one output column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOutput {
    pub name: String,
    pub values: Vec<f64>,
    /// `None` when no element can be masked
    pub mask: Option<Vec<bool>>,
}

/// Mask capability of a table, fixed when the table is created
#[derive(Debug, Clone, PartialEq)]
enum Masking {
    /// No element masks; every element is valid
    Plain,
    /// One element mask per column, keyed like the columns
    Masked(IndexMap<String, Vec<bool>>),
}

/// An ordered set of named `f64` columns that all share one row shape.
///
/// Column order is insertion order. A masked table keeps one mask per column
/// where `true` marks an invalid element.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    shape: Shape,
    columns: IndexMap<String, Vec<f64>>,
    masking: Masking,
}

impl RecordTable {
    /// Create an empty plain table with the given row shape
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            columns: IndexMap::new(),
            masking: Masking::Plain,
        }
    }

    /// Create an empty masked table with the given row shape
    pub fn masked(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            columns: IndexMap::new(),
            masking: Masking::Masked(IndexMap::new()),
        }
    }

    /// Add a column and return the table
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.add_column(name, values)?;
        Ok(self)
    }

    /// Add a column where every element is `value`
    pub fn with_filled_column(self, name: impl Into<String>, value: f64) -> Result<Self> {
        let values = vec![value; self.shape.size()];
        self.with_column(name, values)
    }

    /// Add a column. Masked tables start the column with an all-valid mask.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::InvalidRule(format!("duplicate column '{}'", name)));
        }
        if values.len() != self.shape.size() {
            return Err(Error::shape_mismatch(
                format!("column '{}'", name),
                &self.shape,
                &Shape::new(vec![values.len()]),
            ));
        }
        if let Masking::Masked(masks) = &mut self.masking {
            masks.insert(name.clone(), vec![false; values.len()]);
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Replace the mask of a column. Fails on plain tables.
    pub fn set_mask(&mut self, name: &str, mask: Vec<bool>) -> Result<()> {
        if mask.len() != self.shape.size() {
            return Err(Error::shape_mismatch(
                format!("mask of '{}'", name),
                &self.shape,
                &Shape::new(vec![mask.len()]),
            ));
        }
        let slot = self.mask_mut(name)?;
        *slot = mask;
        Ok(())
    }

    /// Mark a single element of a column as masked (or valid)
    pub fn mask_element(&mut self, name: &str, index: usize, masked: bool) -> Result<()> {
        let shape = self.shape.clone();
        let slot = self.mask_mut(name)?;
        match slot.get_mut(index) {
            Some(flag) => {
                *flag = masked;
                Ok(())
            }
            None => Err(Error::shape_mismatch(
                format!("element {} of '{}'", index, name),
                &shape,
                &Shape::new(vec![index + 1]),
            )),
        }
    }

    fn mask_mut(&mut self, name: &str) -> Result<&mut Vec<bool>> {
        let missing = || Error::MissingColumn {
            column: name.to_string(),
            table: "table",
        };
        match &mut self.masking {
            Masking::Plain if self.columns.contains_key(name) => {
                Err(Error::MaskUnsupported(name.to_string()))
            }
            Masking::Plain => Err(missing()),
            Masking::Masked(masks) => masks.get_mut(name).ok_or_else(missing),
        }
    }

    /// Row shape shared by every column
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of elements per column
    pub fn len(&self) -> usize {
        self.shape.size()
    }

    /// Check if the row shape holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Check if a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get column values by name
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Get mutable column values by name
    pub fn column_mut(&mut self, name: &str) -> Option<&mut [f64]> {
        self.columns.get_mut(name).map(Vec::as_mut_slice)
    }

    /// Whether this table carries element masks
    pub fn has_mask(&self) -> bool {
        matches!(self.masking, Masking::Masked(_))
    }

    /// Mask of a column; `None` for plain tables or unknown columns
    pub fn mask_of(&self, name: &str) -> Option<&[bool]> {
        match &self.masking {
            Masking::Plain => None,
            Masking::Masked(masks) => masks.get(name).map(Vec::as_slice),
        }
    }

    /// Whether an element is masked. Elements of plain tables never are.
    pub fn is_masked(&self, name: &str, index: usize) -> bool {
        self.mask_of(name)
            .and_then(|m| m.get(index).copied())
            .unwrap_or(false)
    }

    /// Copy of this table with masks, all-valid if this table is plain
    pub fn masked_copy(&self) -> RecordTable {
        let masks = match &self.masking {
            Masking::Masked(masks) => masks.clone(),
            Masking::Plain => self
                .columns
                .iter()
                .map(|(name, values)| (name.clone(), vec![false; values.len()]))
                .collect(),
        };
        Self {
            shape: self.shape.clone(),
            columns: self.columns.clone(),
            masking: Masking::Masked(masks),
        }
    }

    /// Overwrite a column's values and, on masked tables, its mask.
    ///
    /// Appends the column when it does not exist yet. A `None` mask marks
    /// every element valid; plain tables drop the mask. Lengths are checked
    /// by callers.
    pub(crate) fn write_column(&mut self, column: ColumnOutput) {
        let ColumnOutput { name, values, mask } = column;
        debug_assert_eq!(values.len(), self.shape.size());
        if let Masking::Masked(masks) = &mut self.masking {
            let mask = mask.unwrap_or_else(|| vec![false; values.len()]);
            masks.insert(name.clone(), mask);
        }
        self.columns.insert(name, values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordTable {
        RecordTable::new([4])
            .with_column("wlen", vec![1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_filled_column("flux", 1.0)
            .unwrap()
    }

    #[test]
    fn test_column_order_and_lookup() {
        let table = sample();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["wlen", "flux"]);
        assert_eq!(table.column("wlen"), Some(&[1.0, 2.0, 3.0, 4.0][..]));
        assert!(table.column("ivar").is_none());
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_add_column_checks_length_and_duplicates() {
        let mut table = sample();
        assert!(matches!(
            table.add_column("ivar", vec![1.0; 3]),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            table.add_column("flux", vec![1.0; 4]),
            Err(Error::InvalidRule(_))
        ));
    }

    #[test]
    fn test_plain_table_has_no_masks() {
        let mut table = sample();
        assert!(!table.has_mask());
        assert!(table.mask_of("flux").is_none());
        assert!(!table.is_masked("flux", 0));
        assert_eq!(
            table.set_mask("flux", vec![false; 4]),
            Err(Error::MaskUnsupported("flux".into()))
        );
        assert_eq!(
            table.mask_element("wlen", 0, true),
            Err(Error::MaskUnsupported("wlen".into()))
        );
        assert!(matches!(
            table.mask_element("ivar", 0, true),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_masked_table_masks() {
        let mut table = RecordTable::masked([4])
            .with_filled_column("flux", 1.0)
            .unwrap();
        assert!(table.has_mask());
        assert_eq!(table.mask_of("flux"), Some(&[false; 4][..]));

        table.mask_element("flux", 2, true).unwrap();
        assert!(table.is_masked("flux", 2));
        assert!(!table.is_masked("flux", 1));
        assert!(table.mask_element("flux", 9, true).is_err());
        assert!(matches!(
            table.set_mask("ivar", vec![false; 4]),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_masked_copy_of_plain() {
        let copy = sample().masked_copy();
        assert!(copy.has_mask());
        assert_eq!(copy.mask_of("wlen"), Some(&[false; 4][..]));
        assert_eq!(copy.column("wlen"), sample().column("wlen"));
    }

    #[test]
    fn test_write_column_appends() {
        let output = |values: Vec<f64>, mask| ColumnOutput {
            name: "w".into(),
            values,
            mask,
        };
        let mut table = RecordTable::masked([2]);
        table.write_column(output(vec![2.0, 0.0], Some(vec![false, true])));
        assert_eq!(table.column("w"), Some(&[2.0, 0.0][..]));
        assert!(table.is_masked("w", 1));

        table.write_column(output(vec![1.0, 1.0], None));
        assert!(!table.is_masked("w", 1));

        let mut plain = RecordTable::new([2]);
        plain.write_column(output(vec![3.0, 4.0], Some(vec![true, false])));
        assert!(!plain.has_mask());
        assert_eq!(plain.column("w"), Some(&[3.0, 4.0][..]));
    }
}
