//! Data model for record tables, arrays, shapes and element masks

mod array;
pub mod mask;
mod shape;
mod table;

pub use array::Array;
pub use shape::{broadcast, Broadcast, Shape};
pub use table::{ColumnOutput, RecordTable};
