use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::market::{validate_assumptions, MarketAssumptions};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive them from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> ParsedVar {
        ParsedVar {
            var: var.to_string(),
            raw: or_default(var, default),
        }
    };

    let serpapi_api_key = require("SERPAPI_API_KEY")?;

    let env = parse_environment(&or_default("RANKSCOPE_ENV", "development"))?;
    let log_level = or_default("RANKSCOPE_LOG_LEVEL", "info");
    let serpapi_base_url = or_default("RANKSCOPE_SERPAPI_BASE_URL", "https://serpapi.com/");
    let user_agent = or_default("RANKSCOPE_USER_AGENT", "rankscope/0.1 (visibility-report)");

    let request_timeout_secs: u64 = parse("RANKSCOPE_REQUEST_TIMEOUT_SECS", "30").value()?;
    let max_concurrent_searches: usize =
        parse("RANKSCOPE_MAX_CONCURRENT_SEARCHES", "4").value()?;
    let search_unit_cost: Decimal = parse("RANKSCOPE_SEARCH_UNIT_COST", "0.01").value()?;
    let default_radius_miles: f64 = parse("RANKSCOPE_DEFAULT_RADIUS_MILES", "10").value()?;
    let search_all_keywords: bool = parse("RANKSCOPE_SEARCH_ALL_KEYWORDS", "false").value()?;

    if max_concurrent_searches == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RANKSCOPE_MAX_CONCURRENT_SEARCHES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if !(default_radius_miles.is_finite() && default_radius_miles > 0.0) {
        return Err(ConfigError::InvalidEnvVar {
            var: "RANKSCOPE_DEFAULT_RADIUS_MILES".to_string(),
            reason: "must be a positive number of miles".to_string(),
        });
    }
    if search_unit_cost.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar {
            var: "RANKSCOPE_SEARCH_UNIT_COST".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    let defaults = MarketAssumptions::default();
    let market = MarketAssumptions {
        daily_search_volume: parse(
            "RANKSCOPE_MARKET_DAILY_SEARCH_VOLUME",
            &defaults.daily_search_volume.to_string(),
        )
        .value()?,
        average_service_value: parse(
            "RANKSCOPE_MARKET_AVERAGE_SERVICE_VALUE",
            &defaults.average_service_value.to_string(),
        )
        .value()?,
        conversion_rate: parse(
            "RANKSCOPE_MARKET_CONVERSION_RATE",
            &defaults.conversion_rate.to_string(),
        )
        .value()?,
        market_size: parse("RANKSCOPE_MARKET_SIZE", &defaults.market_size.to_string()).value()?,
    };
    validate_assumptions(&market).map_err(|reason| ConfigError::InvalidEnvVar {
        var: "RANKSCOPE_MARKET_*".to_string(),
        reason,
    })?;

    let market_profiles_path = lookup("RANKSCOPE_MARKET_PROFILES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        serpapi_api_key,
        serpapi_base_url,
        request_timeout_secs,
        user_agent,
        max_concurrent_searches,
        search_unit_cost,
        default_radius_miles,
        search_all_keywords,
        market,
        market_profiles_path,
    })
}

/// A raw env value tagged with its variable name for error reporting.
struct ParsedVar {
    var: String,
    raw: String,
}

impl ParsedVar {
    fn value<T>(self) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: self.var,
                reason: e.to_string(),
            })
    }
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RANKSCOPE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
