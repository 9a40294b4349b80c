//! Converts zone visibility into lost-revenue and opportunity figures.

use std::collections::BTreeMap;

use rankscope_core::{
    CompetitorProfile, GeographicAnalysis, Heuristics, MarketAssumptions, RevenueImpact,
};

use crate::money::whole_units;

/// Share of zones where the client holds the top rank, in `[0, 1]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn client_visibility(geography: &GeographicAnalysis) -> f64 {
    if geography.total_zones == 0 {
        return 0.0;
    }
    geography.client_visible_zones as f64 / geography.total_zones as f64
}

/// Revenue at full visibility: searches × ticket value × conversion.
#[must_use]
pub fn potential_daily_revenue(market: &MarketAssumptions) -> f64 {
    f64::from(market.daily_search_volume) * market.average_service_value * market.conversion_rate
}

/// Models what the client's missing visibility costs.
///
/// Every figure is rounded to whole currency units only on output, so
/// `daily_lost_revenue + current_daily_revenue` stays within one unit of
/// `potential_daily_revenue`.
#[must_use]
pub fn estimate_revenue(
    geography: &GeographicAnalysis,
    competitors: &[CompetitorProfile],
    market: &MarketAssumptions,
    heuristics: &Heuristics,
) -> RevenueImpact {
    let potential = potential_daily_revenue(market);
    let current = potential * client_visibility(geography);
    let lost = potential - current;

    let competitor_revenue: BTreeMap<String, i64> = competitors
        .iter()
        .map(|c| (c.name.clone(), c.estimated_monthly_revenue))
        .collect();

    RevenueImpact {
        daily_lost_revenue: whole_units(lost),
        monthly_lost_revenue: whole_units(lost * f64::from(heuristics.days_per_month)),
        annual_lost_revenue: whole_units(lost * f64::from(heuristics.days_per_year)),
        opportunity_value: whole_units(potential * f64::from(heuristics.days_per_month)),
        potential_daily_revenue: whole_units(potential),
        current_daily_revenue: whole_units(current),
        competitor_revenue,
        total_market_value: whole_units(market.market_size),
    }
}
