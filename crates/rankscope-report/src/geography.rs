//! Per-zone verdicts: who holds the top rank in each sampled zone.

use rankscope_core::{
    GeographicAnalysis, GridPoint, ListingResult, ZoneClassification, ZonePosition, ZoneStatus,
};

/// Classifies every grid point, in grid order.
///
/// A zone with no listings is an opportunity. Otherwise the zone's top
/// listing (lowest rank, first collected on ties) decides between client and
/// competitor. `columns` maps each zone's index to its display row and column.
#[must_use]
pub fn classify_zones(
    listings: &[ListingResult],
    grid_points: &[GridPoint],
    client_name: &str,
    columns: usize,
) -> GeographicAnalysis {
    let columns = columns.max(1);
    let mut client_visible_zones = 0;
    let mut competitor_dominated_zones = 0;
    let mut opportunity_zones = 0;

    let zones = grid_points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let position = ZonePosition {
                row: index / columns,
                col: index % columns,
            };
            let top = listings
                .iter()
                .filter(|l| l.zone == point.zone)
                .min_by_key(|l| l.rank);

            match top {
                None => {
                    opportunity_zones += 1;
                    ZoneClassification {
                        zone: point.zone.clone(),
                        position,
                        status: ZoneStatus::Opportunity,
                        top_competitor: None,
                        client_rank: None,
                        top_rank: None,
                    }
                }
                Some(top) if top.is_named(client_name) => {
                    client_visible_zones += 1;
                    ZoneClassification {
                        zone: point.zone.clone(),
                        position,
                        status: ZoneStatus::Client,
                        top_competitor: None,
                        client_rank: Some(top.rank),
                        top_rank: Some(top.rank),
                    }
                }
                Some(top) => {
                    competitor_dominated_zones += 1;
                    ZoneClassification {
                        zone: point.zone.clone(),
                        position,
                        status: ZoneStatus::Competitor,
                        top_competitor: Some(top.name.clone()),
                        client_rank: None,
                        top_rank: Some(top.rank),
                    }
                }
            }
        })
        .collect();

    GeographicAnalysis {
        total_zones: grid_points.len(),
        client_visible_zones,
        competitor_dominated_zones,
        opportunity_zones,
        zones,
    }
}
