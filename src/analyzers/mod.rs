//! Grade aggregation.
//!
//! Coerces imported rows into numeric grades, partitions them by group, and
//! computes threshold-driven rates, fixed-band counts, mean and population
//! standard deviation for the whole dataset and for each group.

pub mod aggregate;
pub mod band;
pub mod types;
pub mod utility;
