//! Report input and the immutable report snapshot with its component records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::listings::ZoneId;
use crate::market::MarketAssumptions;

/// Caller-supplied description of the business to report on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportParams {
    pub business_name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Vertical used to select market assumptions, e.g. `"hvac"`.
    pub industry: Option<String>,
    /// Search keywords in priority order. Must be non-empty.
    pub keywords: Vec<String>,
    /// Sampling radius in miles. Falls back to the configured default.
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub industry: Option<String>,
    pub keywords: Vec<String>,
}

/// Aggregated view of one competing business across every zone it appeared in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    /// Name as first seen; identity is case-insensitive.
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    /// Distinct zones the competitor appeared in, in grid order.
    pub zones_present: Vec<ZoneId>,
    /// Number of distinct zones, i.e. `zones_present.len()`.
    pub market_presence: usize,
    /// Mean rank over every listing of this competitor, across all zones and queries.
    pub average_rank: f64,
    /// `zones_present / total_zones`, in `[0, 1]`.
    pub dominance_score: f64,
    pub estimated_daily_calls: u32,
    pub estimated_monthly_revenue: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// The client holds the top rank.
    Client,
    /// A competitor holds the top rank.
    Competitor,
    /// No listings were found.
    Opportunity,
}

impl std::fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneStatus::Client => write!(f, "client"),
            ZoneStatus::Competitor => write!(f, "competitor"),
            ZoneStatus::Opportunity => write!(f, "opportunity"),
        }
    }
}

/// Display-grid cell for a zone, derived from its index in the grid sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePosition {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneClassification {
    pub zone: ZoneId,
    pub position: ZonePosition,
    pub status: ZoneStatus,
    pub top_competitor: Option<String>,
    pub client_rank: Option<u32>,
    pub top_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicAnalysis {
    pub total_zones: usize,
    pub client_visible_zones: usize,
    pub competitor_dominated_zones: usize,
    pub opportunity_zones: usize,
    pub zones: Vec<ZoneClassification>,
}

/// Revenue figures in whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueImpact {
    pub daily_lost_revenue: i64,
    pub monthly_lost_revenue: i64,
    pub annual_lost_revenue: i64,
    /// Monthly revenue available with full visibility.
    pub opportunity_value: i64,
    pub potential_daily_revenue: i64,
    pub current_daily_revenue: i64,
    /// Competitor name to modeled monthly revenue.
    pub competitor_revenue: BTreeMap<String, i64>,
    pub total_market_value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    RevenueBleeding,
    CallHijacking,
    TerritoryLoss,
    ReviewParadox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

/// Headline figure attached to an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum InsightPayload {
    Currency(i64),
    DailyCalls(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub headline: String,
    pub description: String,
    pub impact: String,
    pub urgency: Urgency,
    pub related_competitor: Option<String>,
    pub payload: Option<InsightPayload>,
}

/// A provider call that was dropped from the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFailure {
    pub zone: ZoneId,
    pub query: String,
    pub reason: String,
}

/// The compiled visibility report. Built once per generation and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub business: BusinessInfo,
    /// Top competitors by dominance score, highest first.
    pub competitors: Vec<CompetitorProfile>,
    pub geography: GeographicAnalysis,
    pub revenue: RevenueImpact,
    /// Ordered by severity, most severe first.
    pub insights: Vec<Insight>,
    pub market: MarketAssumptions,
    pub search_cost: Decimal,
    pub searches_attempted: usize,
    pub searches_succeeded: usize,
    pub failed_searches: Vec<SearchFailure>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_status_serializes_lowercase() {
        let json = serde_json::to_string(&ZoneStatus::Opportunity).unwrap();
        assert_eq!(json, "\"opportunity\"");
        assert_eq!(ZoneStatus::Client.to_string(), "client");
    }

    #[test]
    fn insight_kind_serializes_snake_case() {
        let json = serde_json::to_string(&InsightKind::RevenueBleeding).unwrap();
        assert_eq!(json, "\"revenue_bleeding\"");
    }

    #[test]
    fn insight_payload_is_tagged_with_unit() {
        let json = serde_json::to_value(InsightPayload::DailyCalls(45)).unwrap();
        assert_eq!(json, serde_json::json!({ "unit": "daily_calls", "value": 45 }));
    }

    #[test]
    fn urgency_orders_high_first() {
        assert!(Urgency::High < Urgency::Medium);
        assert!(Urgency::Medium < Urgency::Low);
    }
}
