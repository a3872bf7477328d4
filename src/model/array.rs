//! Standalone shaped arrays with an optional element mask

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::shape::Shape;

/// A shaped `f64` array, plain or masked.
///
/// Redshift values and explicit rule sources are arrays. A mask, when
/// present, has one flag per element and `true` marks an invalid element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArray")]
pub struct Array {
    shape: Shape,
    values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mask: Option<Vec<bool>>,
}

#[derive(Deserialize)]
struct RawArray {
    shape: Option<Shape>,
    values: Vec<f64>,
    mask: Option<Vec<bool>>,
}

impl TryFrom<RawArray> for Array {
    type Error = Error;

    fn try_from(raw: RawArray) -> Result<Self> {
        let array = match raw.shape {
            Some(shape) => Array::with_shape(shape, raw.values)?,
            None => Array::from_vec(raw.values),
        };
        match raw.mask {
            Some(mask) => array.with_mask(mask),
            None => Ok(array),
        }
    }
}

impl Array {
    /// A 0-d array holding one value
    pub fn scalar(value: f64) -> Self {
        Self {
            shape: Shape::scalar(),
            values: vec![value],
            mask: None,
        }
    }

    /// A 1-d array over `values`
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            shape: Shape::new(vec![values.len()]),
            values,
            mask: None,
        }
    }

    /// An array of the given shape; `values` must hold `shape.size()` elements
    pub fn with_shape(shape: impl Into<Shape>, values: Vec<f64>) -> Result<Self> {
        let shape = shape.into();
        if values.len() != shape.size() {
            return Err(Error::shape_mismatch(
                "array values",
                &shape,
                &Shape::new(vec![values.len()]),
            ));
        }
        Ok(Self {
            shape,
            values,
            mask: None,
        })
    }

    /// An array of the given shape filled with `value`
    pub fn full(shape: impl Into<Shape>, value: f64) -> Self {
        let shape = shape.into();
        let values = vec![value; shape.size()];
        Self {
            shape,
            values,
            mask: None,
        }
    }

    /// Attach a mask, making this a masked array
    pub fn with_mask(mut self, mask: Vec<bool>) -> Result<Self> {
        if mask.len() != self.values.len() {
            return Err(Error::shape_mismatch(
                "array mask",
                &self.shape,
                &Shape::new(vec![mask.len()]),
            ));
        }
        self.mask = Some(mask);
        Ok(self)
    }

    /// Array shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Flat element values in row-major order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Whether this array carries a mask
    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    /// The mask, if any
    pub fn mask(&self) -> Option<&[bool]> {
        self.mask.as_deref()
    }

    /// Whether the element at `index` is masked
    pub fn is_masked(&self, index: usize) -> bool {
        self.mask
            .as_ref()
            .and_then(|m| m.get(index).copied())
            .unwrap_or(false)
    }
}

impl From<f64> for Array {
    fn from(value: f64) -> Self {
        Array::scalar(value)
    }
}

impl From<Vec<f64>> for Array {
    fn from(values: Vec<f64>) -> Self {
        Array::from_vec(values)
    }
}
