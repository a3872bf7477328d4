//! specrecs - Redshift transforms and table accumulation for spectral data
//!
//! Spectra are held in column-oriented [`RecordTable`]s whose columns share
//! one row shape and may carry element masks. Two stateless operations work
//! on them:
//!
//! - [`redshift::transform`] rescales columns by a power of
//!   `(1 + z_out) / (1 + z_in)`, broadcasting array-valued redshifts.
//! - [`combine::accumulate`] joins or adds two tables column by column,
//!   optionally producing a weight column for iterative averaging.

pub mod combine;
pub mod config;
pub mod error;
pub mod model;
pub mod redshift;

pub use combine::{accumulate, Operand, Side, TableAccumulator};
pub use config::{AccumulateConfig, ColumnSelection};
pub use error::{Error, Result};
pub use model::{Array, RecordTable, Shape};
pub use redshift::{transform, transform_into, RedshiftTransformer, TransformRule};
