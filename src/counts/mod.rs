// Co-occurrence counting between target and association terms.

pub mod engine;
pub mod matrix;

pub use engine::{AloneCounts, CooccurrenceEngine};
pub use matrix::{CooccurrenceMatrix, CountsData, Ranked};
