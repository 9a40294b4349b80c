//! End-to-end report pipeline: validate, geocode, sample, search, analyze.

use chrono::Utc;
use rankscope_core::{
    load_market_profiles, AppConfig, BusinessInfo, ConfigError, Heuristics, MarketAssumptions,
    MarketProfiles, Report, ReportParams,
};
use rankscope_search::{execute_searches, ExecutorOptions, Geocoder, ListingsProvider};

use crate::error::ReportError;
use crate::grid::{generate_queries, QuadrantLayout, ZoneLayout, DEFAULT_RADIUS_MILES};
use crate::report::{analyze_listings, compile_report};

/// Tunables shared by every report a generator produces.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub heuristics: Heuristics,
    pub executor: ExecutorOptions,
    /// Used when the report's industry has no profile.
    pub default_market: MarketAssumptions,
    pub market_profiles: MarketProfiles,
    pub default_radius_miles: f64,
    /// Search every keyword instead of only the first.
    pub search_all_keywords: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            heuristics: Heuristics::default(),
            executor: ExecutorOptions::default(),
            default_market: MarketAssumptions::default(),
            market_profiles: MarketProfiles::default(),
            default_radius_miles: DEFAULT_RADIUS_MILES,
            search_all_keywords: false,
        }
    }
}

impl ReportSettings {
    /// Builds settings from application config, loading market profiles when
    /// a profiles path is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the market profiles file cannot be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let market_profiles = match &config.market_profiles_path {
            Some(path) => load_market_profiles(path)?,
            None => MarketProfiles::default(),
        };
        Ok(Self {
            heuristics: Heuristics::default(),
            executor: ExecutorOptions::from_config(config),
            default_market: config.market.clone(),
            market_profiles,
            default_radius_miles: config.default_radius_miles,
            search_all_keywords: config.search_all_keywords,
        })
    }
}

/// Produces competitive visibility reports against a listings provider.
pub struct ReportGenerator<P, G> {
    provider: P,
    geocoder: G,
    layout: Box<dyn ZoneLayout>,
    settings: ReportSettings,
}

impl<P: ListingsProvider, G: Geocoder> ReportGenerator<P, G> {
    /// Generator with the 2×2 quadrant layout and default settings.
    pub fn new(provider: P, geocoder: G) -> Self {
        Self {
            provider,
            geocoder,
            layout: Box::new(QuadrantLayout),
            settings: ReportSettings::default(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: impl ZoneLayout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ReportSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Generates one report.
    ///
    /// Individual search failures are recorded on the report rather than
    /// failing it; a report with zero listings is still returned.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidInput`] for a blank name, address, or
    /// keyword list, or an unusable radius, and
    /// [`ReportError::AddressUnresolved`] when geocoding fails.
    pub async fn generate(&self, params: &ReportParams) -> Result<Report, ReportError> {
        let radius = validate(params, self.settings.default_radius_miles)?;

        tracing::info!(
            business = %params.business_name,
            address = %params.address,
            radius_miles = radius,
            "generating report"
        );

        let center = self
            .geocoder
            .geocode(&params.address)
            .await
            .map_err(|source| ReportError::AddressUnresolved {
                address: params.address.clone(),
                source,
            })?;

        let grid_points = self.layout.points(center, radius);
        let queries = generate_queries(
            &params.keywords,
            &params.address,
            self.settings.search_all_keywords,
        );
        let batch = execute_searches(
            &self.provider,
            &grid_points,
            &queries,
            &params.address,
            &self.settings.executor,
        )
        .await;

        let market = self
            .settings
            .market_profiles
            .resolve(params.industry.as_deref(), &self.settings.default_market);

        let analysis = analyze_listings(
            &batch.listings,
            &grid_points,
            self.layout.columns(),
            &params.business_name,
            &market,
            &self.settings.heuristics,
        );

        let business = BusinessInfo {
            name: params.business_name.clone(),
            address: params.address.clone(),
            phone: params.phone.clone(),
            website: params.website.clone(),
            latitude: center.lat,
            longitude: center.lng,
            industry: params.industry.clone(),
            keywords: params.keywords.clone(),
        };

        let report = compile_report(business, analysis, market, &batch, Utc::now());

        tracing::info!(
            business = %report.business.name,
            competitors = report.competitors.len(),
            client_zones = report.geography.client_visible_zones,
            searches_attempted = report.searches_attempted,
            searches_succeeded = report.searches_succeeded,
            search_cost = %report.search_cost,
            "report generated"
        );

        Ok(report)
    }
}

/// Checks report input and returns the radius to sample with.
fn validate(params: &ReportParams, default_radius: f64) -> Result<f64, ReportError> {
    if params.business_name.trim().is_empty() {
        return Err(ReportError::InvalidInput(
            "business_name must not be empty".to_string(),
        ));
    }
    if params.address.trim().is_empty() {
        return Err(ReportError::InvalidInput(
            "address must not be empty".to_string(),
        ));
    }
    if params.keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(ReportError::InvalidInput(
            "at least one non-empty keyword is required".to_string(),
        ));
    }

    let radius = params.radius.unwrap_or(default_radius);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ReportError::InvalidInput(format!(
            "radius must be a positive number of miles, got {radius}"
        )));
    }
    Ok(radius)
}
