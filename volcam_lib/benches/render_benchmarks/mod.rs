//! Benchmark categories

pub mod arcball;
pub mod render;
