//! Data models for the analysis commands
//!
//! Records produced by the parsers, series produced by the classifier,
//! and the figure settings consumed by the chart renderer.

pub mod chart;
pub mod latency;
pub mod tick;

pub use chart::{ClassifiedSeries, Figure, Series, SeriesPoint};
pub use latency::LatencySummary;
pub use tick::{LimitOrder, OrderSide, TickRecord};
