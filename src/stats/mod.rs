pub mod cumulative;
pub mod histogram;
pub mod normalization;

pub use cumulative::{CumulativeAverage, cumulative_average, mean};
pub use histogram::{Histogram, Histogram2d};
pub use normalization::{center_on, round_to_tenth};
