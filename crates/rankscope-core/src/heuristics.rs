//! Tunable judgment calls baked into competitor scoring and insight rules.
//!
//! None of these are fitted from data. They encode rules of thumb about how
//! strongly local search position drives inbound calls.

use serde::{Deserialize, Serialize};

/// Step function from average rank to estimated inbound calls per zone per day.
///
/// Bands are checked in order; the first band whose `max_rank` is at least the
/// average rank wins. Ranks past every band get `fallback_calls`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallVolumeBands {
    /// `(max_rank, calls_per_zone)` pairs, ascending by `max_rank`.
    pub bands: Vec<(f64, u32)>,
    pub fallback_calls: u32,
}

impl Default for CallVolumeBands {
    fn default() -> Self {
        Self {
            bands: vec![(1.0, 15), (2.0, 8), (3.0, 4)],
            fallback_calls: 2,
        }
    }
}

impl CallVolumeBands {
    #[must_use]
    pub fn calls_per_zone(&self, average_rank: f64) -> u32 {
        self.bands
            .iter()
            .find(|(max_rank, _)| average_rank <= *max_rank)
            .map_or(self.fallback_calls, |(_, calls)| *calls)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    pub call_volume: CallVolumeBands,
    /// Competitor ratings below this trigger the review paradox insight.
    pub review_quality_threshold: f64,
    /// Competitor list is truncated to this many entries.
    pub max_competitors: usize,
    /// Days per modeled month.
    pub days_per_month: u32,
    /// Days per modeled year.
    pub days_per_year: u32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            call_volume: CallVolumeBands::default(),
            review_quality_threshold: 4.5,
            max_competitors: 10,
            days_per_month: 30,
            days_per_year: 365,
        }
    }
}
