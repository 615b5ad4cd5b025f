pub mod accumulate;
pub mod config;
pub mod ranking;
pub mod trend;
pub mod validation;

pub use config::*;
pub use ranking::{aggregate, top_classes, RankingRow};
pub use trend::{build_series, order_weeks, SeriesValue, TrendPoint};
pub use validation::{validate_engine, validate_snapshot};
