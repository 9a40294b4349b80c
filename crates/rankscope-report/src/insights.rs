//! Narrative findings derived from the aggregated numbers.
//!
//! Rules run in a fixed order and each adds at most one insight. The output
//! order is the severity order shown to readers.

use rankscope_core::{
    CompetitorProfile, GeographicAnalysis, Heuristics, Insight, InsightKind, InsightPayload,
    RevenueImpact, Urgency,
};

use crate::money::{format_currency, whole_units};

/// Builds the ordered insight list for a report.
///
/// `competitors` must already be sorted by dominance; its first entry is
/// treated as the top competitor. No competitors means no insights.
#[must_use]
pub fn synthesize_insights(
    competitors: &[CompetitorProfile],
    revenue: &RevenueImpact,
    geography: &GeographicAnalysis,
    heuristics: &Heuristics,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(top) = competitors.first() {
        insights.push(revenue_bleeding(top, revenue, geography));
        if let Some(insight) = call_hijacking(top, heuristics) {
            insights.push(insight);
        }
        insights.push(territory_loss(top, geography));
    }

    // Compares against a fixed bar because the client's own rating is never
    // collected.
    let lower_rated_rival = competitors
        .iter()
        .any(|c| c.rating.is_some_and(|r| r < heuristics.review_quality_threshold));
    if lower_rated_rival {
        insights.push(review_paradox());
    }

    insights
}

fn revenue_bleeding(
    top: &CompetitorProfile,
    revenue: &RevenueImpact,
    geography: &GeographicAnalysis,
) -> Insight {
    Insight {
        kind: InsightKind::RevenueBleeding,
        headline: format!(
            "{} is capturing {} a month that should be yours",
            top.name,
            format_currency(top.estimated_monthly_revenue)
        ),
        description: format!(
            "{} shows up in {} of {} sampled zones in your market area.",
            top.name, top.market_presence, geography.total_zones
        ),
        impact: format!(
            "{} in lost monthly revenue",
            format_currency(revenue.monthly_lost_revenue)
        ),
        urgency: Urgency::High,
        related_competitor: Some(top.name.clone()),
        payload: Some(InsightPayload::Currency(revenue.monthly_lost_revenue)),
    }
}

fn call_hijacking(top: &CompetitorProfile, heuristics: &Heuristics) -> Option<Insight> {
    let phone = top.phone.as_deref()?;
    let monthly_calls =
        u64::from(top.estimated_daily_calls) * u64::from(heuristics.days_per_month);
    Some(Insight {
        kind: InsightKind::CallHijacking,
        headline: format!(
            "{} daily service calls are going to {phone} instead of you",
            top.estimated_daily_calls
        ),
        description: format!(
            "People searching for your services find {} first and call {phone} directly.",
            top.name
        ),
        impact: format!("{monthly_calls} potential customers lost each month"),
        urgency: Urgency::High,
        related_competitor: Some(top.name.clone()),
        payload: Some(InsightPayload::DailyCalls(top.estimated_daily_calls)),
    })
}

#[allow(clippy::cast_precision_loss)]
fn territory_loss(top: &CompetitorProfile, geography: &GeographicAnalysis) -> Insight {
    let lost_share = if geography.total_zones == 0 {
        0
    } else {
        whole_units(
            geography.competitor_dominated_zones as f64 / geography.total_zones as f64 * 100.0,
        )
    };
    Insight {
        kind: InsightKind::TerritoryLoss,
        headline: "Competitors hold the top spot across your service area".to_string(),
        description: format!(
            "{} of {} zones are led by competitors, with {} out in front.",
            geography.competitor_dominated_zones, geography.total_zones, top.name
        ),
        impact: format!("{lost_share}% of your market territory can't see you"),
        urgency: Urgency::High,
        related_competitor: Some(top.name.clone()),
        payload: None,
    }
}

fn review_paradox() -> Insight {
    Insight {
        kind: InsightKind::ReviewParadox,
        headline: "Your ratings aren't turning into visibility".to_string(),
        description:
            "Competitors with weaker reviews still outrank you in local search results."
                .to_string(),
        impact: "Service quality goes unseen because of search position".to_string(),
        urgency: Urgency::Medium,
        related_competitor: None,
        payload: None,
    }
}
