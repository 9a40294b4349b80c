//! Collates listings from every zone into one profile per competing business.

use std::collections::HashMap;

use rankscope_core::{CompetitorProfile, Heuristics, ListingResult, MarketAssumptions, ZoneId};

use crate::money::whole_units;

/// Builds competitor profiles from every collected listing.
///
/// Listings are grouped by case-insensitive name and the client's own
/// business is excluded. Groups keep first-encounter order, and their
/// contact fields come from their first listing. `average_rank` mixes ranks
/// from different zones and queries as if they were comparable.
///
/// The result is stably sorted by dominance score, highest first, and
/// truncated to `heuristics.max_competitors`.
#[must_use]
pub fn aggregate_competitors(
    listings: &[ListingResult],
    client_name: &str,
    zones: &[ZoneId],
    heuristics: &Heuristics,
    market: &MarketAssumptions,
) -> Vec<CompetitorProfile> {
    let client_key = client_name.to_lowercase();

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<&ListingResult>> = Vec::new();
    for listing in listings {
        let key = listing.name.to_lowercase();
        if key == client_key {
            continue;
        }
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(listing);
    }

    let mut profiles: Vec<CompetitorProfile> = groups
        .iter()
        .filter_map(|members| build_profile(members, zones, heuristics, market))
        .collect();

    profiles.sort_by(|a, b| b.dominance_score.total_cmp(&a.dominance_score));
    profiles.truncate(heuristics.max_competitors);
    profiles
}

#[allow(clippy::cast_precision_loss)]
fn build_profile(
    members: &[&ListingResult],
    zones: &[ZoneId],
    heuristics: &Heuristics,
    market: &MarketAssumptions,
) -> Option<CompetitorProfile> {
    let first = members.first()?;

    let zones_present: Vec<ZoneId> = zones
        .iter()
        .filter(|zone| members.iter().any(|m| m.zone == **zone))
        .cloned()
        .collect();
    let market_presence = zones_present.len();

    let rank_sum: f64 = members.iter().map(|m| f64::from(m.rank)).sum();
    let average_rank = rank_sum / members.len() as f64;

    let dominance_score = if zones.is_empty() {
        0.0
    } else {
        market_presence as f64 / zones.len() as f64
    };

    let presence = u32::try_from(market_presence).unwrap_or(u32::MAX);
    let estimated_daily_calls = heuristics
        .call_volume
        .calls_per_zone(average_rank)
        .saturating_mul(presence);

    let estimated_monthly_revenue = whole_units(
        f64::from(estimated_daily_calls)
            * market.average_service_value
            * f64::from(heuristics.days_per_month),
    );

    Some(CompetitorProfile {
        name: first.name.clone(),
        phone: first.phone.clone(),
        address: first.address.clone(),
        rating: first.rating,
        reviews: first.reviews,
        zones_present,
        market_presence,
        average_rank,
        dominance_score,
        estimated_daily_calls,
        estimated_monthly_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> Vec<ZoneId> {
        ["NW", "NE", "SW", "SE"].into_iter().map(ZoneId::new).collect()
    }

    fn listing(name: &str, zone: &str, rank: u32) -> ListingResult {
        ListingResult {
            name: name.to_string(),
            phone: None,
            address: None,
            rating: None,
            reviews: None,
            rank,
            zone: ZoneId::new(zone),
        }
    }

    fn aggregate(listings: &[ListingResult], client: &str) -> Vec<CompetitorProfile> {
        aggregate_competitors(
            listings,
            client,
            &zones(),
            &Heuristics::default(),
            &MarketAssumptions::default(),
        )
    }

    #[test]
    fn empty_input_yields_no_competitors() {
        assert!(aggregate(&[], "Client Co").is_empty());
    }

    #[test]
    fn client_is_excluded_case_insensitively() {
        let listings = vec![
            listing("CLIENT CO", "NW", 1),
            listing("client co", "NE", 2),
            listing("Rival", "NW", 2),
        ];
        let profiles = aggregate(&listings, "Client Co");
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Rival");
    }

    #[test]
    fn names_are_merged_case_insensitively_keeping_first_spelling() {
        let mut first = listing("Acme HVAC", "NW", 1);
        first.phone = Some("602-555-0100".to_string());
        let listings = vec![first, listing("ACME hvac", "SW", 2)];
        let profiles = aggregate(&listings, "Client Co");
        assert_eq!(profiles.len(), 1);
        let acme = &profiles[0];
        assert_eq!(acme.name, "Acme HVAC");
        assert_eq!(acme.phone.as_deref(), Some("602-555-0100"));
        assert_eq!(acme.zones_present, [ZoneId::new("NW"), ZoneId::new("SW")]);
        assert_eq!(acme.market_presence, 2);
        assert!((acme.average_rank - 1.5).abs() < 1e-9);
        assert!((acme.dominance_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn repeated_zone_counts_once() {
        let listings = vec![listing("Rival", "NE", 1), listing("Rival", "NE", 3)];
        let profiles = aggregate(&listings, "Client Co");
        assert_eq!(profiles[0].zones_present, [ZoneId::new("NE")]);
        assert!((profiles[0].dominance_score - 0.25).abs() < 1e-9);
        // Average rank 2 → 8 calls per zone.
        assert_eq!(profiles[0].estimated_daily_calls, 8);
    }

    #[test]
    fn top_rank_in_three_zones_estimates_forty_five_calls() {
        let listings = vec![
            listing("Rival", "NW", 1),
            listing("Rival", "NE", 1),
            listing("Rival", "SE", 1),
        ];
        let profiles = aggregate(&listings, "Client Co");
        let rival = &profiles[0];
        assert_eq!(rival.estimated_daily_calls, 45);
        assert_eq!(rival.estimated_monthly_revenue, 45 * 650 * 30);
    }

    #[test]
    fn low_ranks_fall_back_to_two_calls_per_zone() {
        let listings = vec![listing("Rival", "NW", 7), listing("Rival", "NE", 5)];
        let profiles = aggregate(&listings, "Client Co");
        assert_eq!(profiles[0].estimated_daily_calls, 4);
    }

    #[test]
    fn sorted_by_dominance_with_stable_ties() {
        let listings = vec![
            listing("Alpha", "NW", 3),
            listing("Bravo", "NW", 2),
            listing("Bravo", "NE", 2),
            listing("Bravo", "SW", 2),
            listing("Charlie", "SE", 1),
        ];
        let profiles = aggregate(&listings, "Client Co");
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Bravo", "Alpha", "Charlie"]);
        assert!(profiles
            .windows(2)
            .all(|w| w[0].dominance_score >= w[1].dominance_score));
    }

    #[test]
    fn truncates_to_max_competitors() {
        let listings: Vec<ListingResult> = (0..15)
            .map(|i| listing(&format!("Shop {i}"), "NW", i + 1))
            .collect();
        let profiles = aggregate(&listings, "Client Co");
        assert_eq!(profiles.len(), 10);
        assert_eq!(profiles[0].name, "Shop 0");
    }

    #[test]
    fn dominance_is_bounded_by_zone_share() {
        let listings = vec![
            listing("Rival", "NW", 1),
            listing("Rival", "NE", 1),
            listing("Rival", "SW", 1),
            listing("Rival", "SE", 1),
            listing("Rival", "NW", 2),
        ];
        let profiles = aggregate(&listings, "Client Co");
        let rival = &profiles[0];
        assert!((rival.dominance_score - 1.0).abs() < 1e-9);
        assert!(rival.zones_present.len() <= 4);
    }
}
