//! Class standings from merit and demerit points.
//!
//! The scoring engine in [`scoring`] folds a log of point-change entries into
//! a ranking table ([`scoring::aggregate`]) and a cumulative weekly trend for
//! the leading classes ([`scoring::build_series`]). Both are pure functions
//! over borrowed snapshots; [`model`] and [`config`] load those snapshots and
//! settings, and [`output`] renders the results for the terminal.

pub mod config;
pub mod model;
pub mod output;
pub mod scoring;
