//! Shared domain types and configuration for rankscope.
//!
//! Holds the listing and report data model, market assumptions (with
//! per-industry YAML overrides), the scoring heuristics, and the
//! environment-driven application config.

pub mod app_config;
pub mod config;
pub mod heuristics;
pub mod listings;
pub mod market;
pub mod report;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use heuristics::{CallVolumeBands, Heuristics};
pub use listings::{Coordinates, GridPoint, ListingResult, ZoneId};
pub use market::{load_market_profiles, MarketAssumptions, MarketProfile, MarketProfiles};
pub use report::{
    BusinessInfo, CompetitorProfile, GeographicAnalysis, Insight, InsightKind, InsightPayload,
    Report, ReportParams, RevenueImpact, SearchFailure, Urgency, ZoneClassification,
    ZonePosition, ZoneStatus,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read market profiles file {path}: {source}")]
    MarketFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse market profiles file: {0}")]
    MarketFileParse(#[source] serde_yaml::Error),

    #[error("market profile validation failed: {0}")]
    Validation(String),
}
