//! Row shapes and the broadcasting rule shared by both components

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An N-dimensional extent. Elements are laid out flat in row-major order.
///
/// The empty shape `()` describes a scalar holding exactly one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Create a shape from its axis extents
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    /// The 0-d shape of a scalar
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    /// Axis extents
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    /// Broadcast two shapes against each other.
    ///
    /// Shapes are right-aligned and missing leading axes count as extent 1.
    /// On every axis the extents must be equal, or one of them must be 1, in
    /// which case it stretches to the other.
    pub fn broadcast(&self, other: &Shape) -> Option<Shape> {
        let ndim = self.ndim().max(other.ndim());
        let mut dims = vec![0; ndim];
        for (axis, dim) in dims.iter_mut().enumerate() {
            let a = self.axis_from_right(ndim - 1 - axis);
            let b = other.axis_from_right(ndim - 1 - axis);
            *dim = match (a, b) {
                (a, b) if a == b => a,
                (1, b) => b,
                (a, 1) => a,
                _ => return None,
            };
        }
        Some(Shape(dims))
    }

    /// Extent of the axis `offset` positions from the right, 1 if absent
    fn axis_from_right(&self, offset: usize) -> usize {
        if offset < self.0.len() {
            self.0[self.0.len() - 1 - offset]
        } else {
            1
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "()"),
            [n] => write!(f, "({},)", n),
            dims => {
                let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self(dims.to_vec())
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

/// Broadcast two shapes, failing with [`Error::ShapeMismatch`] when they are
/// incompatible.
pub fn broadcast(a: &Shape, b: &Shape, context: &str) -> Result<Shape> {
    a.broadcast(b)
        .ok_or_else(|| Error::shape_mismatch(context, a, b))
}

/// Maps flat indices of a broadcast output shape back to a source shape.
///
/// Stretched axes get stride 0, so every output element along them reads
/// the same source element.
#[derive(Debug, Clone)]
pub struct Broadcast {
    out_dims: Vec<usize>,
    strides: Vec<usize>,
    identity: bool,
}

impl Broadcast {
    /// Build a mapper from `source` to `out`.
    ///
    /// `out` must be a broadcast of `source` (see [`Shape::broadcast`]).
    pub fn new(source: &Shape, out: &Shape) -> Result<Self> {
        if source.broadcast(out).as_ref() != Some(out) {
            return Err(Error::shape_mismatch("broadcast source", out, source));
        }

        let ndim = out.ndim();
        let mut strides = vec![0; ndim];
        let mut stride = 1;
        for offset in 0..ndim {
            let axis = ndim - 1 - offset;
            let extent = source.axis_from_right(offset);
            if offset < source.ndim() && extent == out.dims()[axis] {
                strides[axis] = stride;
            }
            if offset < source.ndim() {
                stride *= extent;
            }
        }

        Ok(Self {
            out_dims: out.dims().to_vec(),
            strides,
            identity: source == out,
        })
    }

    /// Source flat index for the output flat index `flat`
    pub fn source_index(&self, mut flat: usize) -> usize {
        if self.identity {
            return flat;
        }
        let mut index = 0;
        for (dim, stride) in self.out_dims.iter().zip(&self.strides).rev() {
            index += (flat % dim) * stride;
            flat /= dim;
        }
        index
    }

    /// Iterate source indices in output order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        let size: usize = self.out_dims.iter().product();
        (0..size).map(move |flat| self.source_index(flat))
    }
}
