use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::market::MarketAssumptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub serpapi_api_key: String,
    pub serpapi_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_searches: usize,
    /// Charged once per successful provider call.
    pub search_unit_cost: Decimal,
    pub default_radius_miles: f64,
    /// Search every keyword instead of only the first.
    pub search_all_keywords: bool,
    /// Used when the report's industry has no market profile.
    pub market: MarketAssumptions,
    pub market_profiles_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("serpapi_api_key", &"[redacted]")
            .field("serpapi_base_url", &self.serpapi_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_searches", &self.max_concurrent_searches)
            .field("search_unit_cost", &self.search_unit_cost)
            .field("default_radius_miles", &self.default_radius_miles)
            .field("search_all_keywords", &self.search_all_keywords)
            .field("market", &self.market)
            .field("market_profiles_path", &self.market_profiles_path)
            .finish()
    }
}
