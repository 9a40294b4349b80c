//! Fans one report's searches out across the listings provider.
//!
//! Every (grid point × query) pair is one provider call. Calls run
//! concurrently up to `max_concurrent`, each bounded by its own timeout. A
//! failed call never cancels its siblings: outcomes are collected first, then
//! merged in request order and partitioned into listings and failures.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use rankscope_core::{AppConfig, GridPoint, ListingResult, SearchFailure};
use rust_decimal::Decimal;

use crate::error::ProviderError;
use crate::provider::{ListingsProvider, SearchRequest};

#[derive(Debug, Clone)]
pub struct ExecutorOptions {
    pub max_concurrent: usize,
    pub per_call_timeout: Duration,
    /// Cost charged per successful call.
    pub unit_cost: Decimal,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            per_call_timeout: Duration::from_secs(30),
            unit_cost: Decimal::new(1, 2),
        }
    }
}

impl ExecutorOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent_searches,
            per_call_timeout: Duration::from_secs(config.request_timeout_secs),
            unit_cost: config.search_unit_cost,
        }
    }
}

/// Everything collected by one [`execute_searches`] run.
#[derive(Debug, Clone, Default)]
pub struct SearchBatch {
    /// All listings from successful calls, in (grid point, query) order.
    pub listings: Vec<ListingResult>,
    pub failures: Vec<SearchFailure>,
    pub attempted: usize,
    pub succeeded: usize,
    /// `unit_cost × succeeded`.
    pub cost: Decimal,
}

/// Runs one search per (grid point × query) pair and merges the outcomes.
///
/// Listings are re-stamped with the zone of the grid point that was searched,
/// so attribution never depends on the provider. Output order follows grid
/// order, then query order, regardless of completion order.
pub async fn execute_searches<P: ListingsProvider>(
    provider: &P,
    grid_points: &[GridPoint],
    queries: &[String],
    location: &str,
    options: &ExecutorOptions,
) -> SearchBatch {
    let requests: Vec<(usize, SearchRequest)> = grid_points
        .iter()
        .flat_map(|grid_point| {
            queries.iter().map(move |query| SearchRequest {
                query: query.clone(),
                location: location.to_string(),
                grid_point: grid_point.clone(),
            })
        })
        .enumerate()
        .collect();

    let attempted = requests.len();
    let max_concurrent = options.max_concurrent.max(1);
    let per_call_timeout = options.per_call_timeout;

    let mut outcomes: Vec<(usize, SearchRequest, Result<Vec<ListingResult>, ProviderError>)> =
        stream::iter(requests)
            .map(|(idx, request)| async move {
                let result = match tokio::time::timeout(per_call_timeout, provider.search(&request))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout {
                        millis: per_call_timeout.as_millis(),
                    }),
                };
                (idx, request, result)
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

    outcomes.sort_by_key(|(idx, _, _)| *idx);

    let mut batch = SearchBatch {
        attempted,
        ..SearchBatch::default()
    };

    for (_, request, result) in outcomes {
        let zone = request.grid_point.zone;
        match result {
            Ok(listings) => {
                tracing::debug!(
                    zone = %zone,
                    query = %request.query,
                    count = listings.len(),
                    "search completed"
                );
                batch.succeeded += 1;
                batch.listings.extend(listings.into_iter().map(|mut listing| {
                    listing.zone = zone.clone();
                    listing
                }));
            }
            Err(e) => {
                tracing::warn!(
                    zone = %zone,
                    query = %request.query,
                    error = %e,
                    "search failed; skipping"
                );
                batch.failures.push(SearchFailure {
                    zone,
                    query: request.query,
                    reason: e.to_string(),
                });
            }
        }
    }

    batch.cost = options.unit_cost * Decimal::from(batch.succeeded);

    if attempted > 0 && batch.succeeded == 0 {
        tracing::warn!(attempted, "every search failed; report will have no listings");
    }

    batch
}
