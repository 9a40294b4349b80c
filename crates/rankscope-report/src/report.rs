//! Pure analysis over collected listings and final report assembly.

use chrono::{DateTime, Utc};
use rankscope_core::{
    BusinessInfo, CompetitorProfile, GeographicAnalysis, GridPoint, Heuristics, Insight,
    ListingResult, MarketAssumptions, Report, RevenueImpact, ZoneId,
};
use rankscope_search::SearchBatch;

use crate::competitors::aggregate_competitors;
use crate::geography::classify_zones;
use crate::insights::synthesize_insights;
use crate::revenue::estimate_revenue;

/// Every derived section of a report, before it is stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportAnalysis {
    pub competitors: Vec<CompetitorProfile>,
    pub geography: GeographicAnalysis,
    pub revenue: RevenueImpact,
    pub insights: Vec<Insight>,
}

/// Runs aggregation, zone classification, the revenue model and insight
/// synthesis over one set of listings.
///
/// Deterministic: the same inputs always produce the same analysis.
#[must_use]
pub fn analyze_listings(
    listings: &[ListingResult],
    grid_points: &[GridPoint],
    columns: usize,
    client_name: &str,
    market: &MarketAssumptions,
    heuristics: &Heuristics,
) -> ReportAnalysis {
    let zones: Vec<ZoneId> = grid_points.iter().map(|p| p.zone.clone()).collect();

    let competitors = aggregate_competitors(listings, client_name, &zones, heuristics, market);
    let geography = classify_zones(listings, grid_points, client_name, columns);
    let revenue = estimate_revenue(&geography, &competitors, market, heuristics);
    let insights = synthesize_insights(&competitors, &revenue, &geography, heuristics);

    ReportAnalysis {
        competitors,
        geography,
        revenue,
        insights,
    }
}

/// Assembles the immutable report snapshot.
#[must_use]
pub fn compile_report(
    business: BusinessInfo,
    analysis: ReportAnalysis,
    market: MarketAssumptions,
    batch: &SearchBatch,
    generated_at: DateTime<Utc>,
) -> Report {
    Report {
        business,
        competitors: analysis.competitors,
        geography: analysis.geography,
        revenue: analysis.revenue,
        insights: analysis.insights,
        market,
        search_cost: batch.cost,
        searches_attempted: batch.attempted,
        searches_succeeded: batch.succeeded,
        failed_searches: batch.failures.clone(),
        generated_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rankscope_core::{SearchFailure, ZoneStatus};
    use rust_decimal::Decimal;

    use super::*;

    fn grid() -> Vec<GridPoint> {
        ["NW", "NE", "SW", "SE"]
            .into_iter()
            .map(|z| GridPoint {
                lat: 33.4,
                lng: -112.0,
                zone: ZoneId::new(z),
            })
            .collect()
    }

    fn listing(name: &str, zone: &str, rank: u32) -> ListingResult {
        ListingResult {
            name: name.to_string(),
            phone: Some("602-555-0100".to_string()),
            address: None,
            rating: Some(4.2),
            reviews: Some(88),
            rank,
            zone: ZoneId::new(zone),
        }
    }

    fn business() -> BusinessInfo {
        BusinessInfo {
            name: "Client Co".to_string(),
            address: "1 Main St, Phoenix, AZ".to_string(),
            phone: None,
            website: None,
            latitude: 33.4,
            longitude: -112.0,
            industry: Some("hvac".to_string()),
            keywords: vec!["hvac repair".to_string()],
        }
    }

    fn batch(listings: Vec<ListingResult>) -> SearchBatch {
        SearchBatch {
            listings,
            failures: vec![SearchFailure {
                zone: ZoneId::new("SE"),
                query: "hvac repair near 1 Main St, Phoenix, AZ".to_string(),
                reason: "provider API error: exhausted".to_string(),
            }],
            attempted: 4,
            succeeded: 3,
            cost: Decimal::new(3, 2),
        }
    }

    fn build(listings: &[ListingResult]) -> Report {
        let market = MarketAssumptions::default();
        let analysis = analyze_listings(
            listings,
            &grid(),
            2,
            "Client Co",
            &market,
            &Heuristics::default(),
        );
        let generated_at = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
        compile_report(
            business(),
            analysis,
            market,
            &batch(listings.to_vec()),
            generated_at,
        )
    }

    #[test]
    fn analysis_wires_every_stage() {
        let listings = vec![
            listing("Rival", "NW", 1),
            listing("Client Co", "NE", 1),
            listing("Rival", "SW", 2),
        ];
        let analysis = analyze_listings(
            &listings,
            &grid(),
            2,
            "Client Co",
            &MarketAssumptions::default(),
            &Heuristics::default(),
        );
        assert_eq!(analysis.competitors.len(), 1);
        assert_eq!(analysis.geography.client_visible_zones, 1);
        assert_eq!(analysis.geography.zones[3].status, ZoneStatus::Opportunity);
        assert_eq!(
            analysis.revenue.competitor_revenue["Rival"],
            analysis.competitors[0].estimated_monthly_revenue
        );
        assert!(!analysis.insights.is_empty());
    }

    #[test]
    fn compile_copies_search_summary() {
        let report = build(&[listing("Rival", "NW", 1)]);
        assert_eq!(report.searches_attempted, 4);
        assert_eq!(report.searches_succeeded, 3);
        assert_eq!(report.search_cost, Decimal::new(3, 2));
        assert_eq!(report.failed_searches.len(), 1);
        assert_eq!(report.business.name, "Client Co");
        assert_eq!(report.market, MarketAssumptions::default());
    }

    #[test]
    fn same_inputs_same_report() {
        let listings = vec![
            listing("Rival", "NW", 1),
            listing("Other", "NW", 2),
            listing("Client Co", "NE", 1),
        ];
        let first = serde_json::to_value(build(&listings)).unwrap();
        let second = serde_json::to_value(build(&listings)).unwrap();
        assert_eq!(first, second);
    }
}
