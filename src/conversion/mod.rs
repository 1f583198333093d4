pub mod float;
pub mod integer;

pub use float::{BenchFloat, FloatEncoder};
pub use integer::ParseStrategy;
