//! Competitive visibility reports for local businesses.
//!
//! Samples a grid of points around the business, searches the listings
//! provider at each point, then turns the ranked results into competitor
//! profiles, per-zone verdicts, a revenue model and ordered insights.

pub mod competitors;
pub mod error;
pub mod generator;
pub mod geography;
pub mod grid;
pub mod insights;
mod money;
pub mod report;
pub mod revenue;

pub use competitors::aggregate_competitors;
pub use error::ReportError;
pub use generator::{ReportGenerator, ReportSettings};
pub use geography::classify_zones;
pub use grid::{generate_queries, QuadrantLayout, SquareLayout, ZoneLayout, DEFAULT_RADIUS_MILES};
pub use insights::synthesize_insights;
pub use report::{analyze_listings, compile_report, ReportAnalysis};
pub use revenue::{client_visibility, estimate_revenue, potential_daily_revenue};
