use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Vertical-level market figures the revenue model converts visibility into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    /// Local searches per day for the vertical's keywords.
    pub daily_search_volume: u32,
    /// Average ticket value per converted customer.
    pub average_service_value: f64,
    /// Fraction of searches that become a paying customer, in `(0, 1]`.
    pub conversion_rate: f64,
    /// Total addressable market, passed through to the report.
    pub market_size: f64,
}

impl Default for MarketAssumptions {
    /// Residential HVAC figures.
    fn default() -> Self {
        Self {
            daily_search_volume: 1247,
            average_service_value: 650.0,
            conversion_rate: 0.15,
            market_size: 500_000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketProfile {
    pub industry: String,
    #[serde(flatten)]
    pub assumptions: MarketAssumptions,
}

/// Per-industry overrides for [`MarketAssumptions`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketProfiles {
    pub profiles: Vec<MarketProfile>,
}

impl MarketProfiles {
    /// Returns the profile matching `industry` (case-insensitive), if any.
    #[must_use]
    pub fn find(&self, industry: &str) -> Option<&MarketAssumptions> {
        let wanted = industry.trim().to_lowercase();
        self.profiles
            .iter()
            .find(|p| p.industry.trim().to_lowercase() == wanted)
            .map(|p| &p.assumptions)
    }

    /// Resolves the assumptions for a report, falling back to `default` when
    /// the industry is absent or has no profile.
    #[must_use]
    pub fn resolve(&self, industry: Option<&str>, default: &MarketAssumptions) -> MarketAssumptions {
        industry
            .and_then(|i| self.find(i))
            .unwrap_or(default)
            .clone()
    }
}

/// Load and validate market profiles from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_market_profiles(path: &Path) -> Result<MarketProfiles, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::MarketFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_market_profiles(&content)
}

fn parse_market_profiles(content: &str) -> Result<MarketProfiles, ConfigError> {
    let profiles: MarketProfiles =
        serde_yaml::from_str(content).map_err(ConfigError::MarketFileParse)?;

    validate_profiles(&profiles)?;

    Ok(profiles)
}

fn validate_profiles(profiles: &MarketProfiles) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for profile in &profiles.profiles {
        let industry = profile.industry.trim();
        if industry.is_empty() {
            return Err(ConfigError::Validation(
                "market profile industry must be non-empty".to_string(),
            ));
        }

        if !seen.insert(industry.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate market profile industry: '{industry}'"
            )));
        }

        validate_assumptions(&profile.assumptions)
            .map_err(|reason| ConfigError::Validation(format!("'{industry}': {reason}")))?;
    }

    Ok(())
}

/// Checks the numeric ranges of a set of assumptions.
///
/// # Errors
///
/// Returns a human-readable reason when a value is out of range.
pub fn validate_assumptions(assumptions: &MarketAssumptions) -> Result<(), String> {
    let rate = assumptions.conversion_rate;
    if !(rate > 0.0 && rate <= 1.0) {
        return Err(format!("conversion_rate {rate} must be in (0, 1]"));
    }
    if !assumptions.average_service_value.is_finite() || assumptions.average_service_value < 0.0 {
        return Err(format!(
            "average_service_value {} must be a non-negative number",
            assumptions.average_service_value
        ));
    }
    if !assumptions.market_size.is_finite() || assumptions.market_size < 0.0 {
        return Err(format!(
            "market_size {} must be a non-negative number",
            assumptions.market_size
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES_YAML: &str = r"
profiles:
  - industry: HVAC
    daily_search_volume: 1247
    average_service_value: 650
    conversion_rate: 0.15
    market_size: 500000
  - industry: plumbing
    daily_search_volume: 900
    average_service_value: 320.5
    conversion_rate: 0.2
    market_size: 250000
";

    #[test]
    fn parses_profiles_with_flattened_assumptions() {
        let profiles = parse_market_profiles(PROFILES_YAML).unwrap();
        assert_eq!(profiles.profiles.len(), 2);
        let plumbing = profiles.find("plumbing").unwrap();
        assert_eq!(plumbing.daily_search_volume, 900);
        assert!((plumbing.average_service_value - 320.5).abs() < f64::EPSILON);
    }

    #[test]
    fn find_is_case_insensitive() {
        let profiles = parse_market_profiles(PROFILES_YAML).unwrap();
        assert!(profiles.find("hvac").is_some());
        assert!(profiles.find("  Plumbing ").is_some());
        assert!(profiles.find("roofing").is_none());
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let profiles = parse_market_profiles(PROFILES_YAML).unwrap();
        let default = MarketAssumptions::default();
        assert_eq!(profiles.resolve(None, &default), default);
        assert_eq!(profiles.resolve(Some("roofing"), &default), default);
        assert_eq!(
            profiles.resolve(Some("plumbing"), &default).daily_search_volume,
            900
        );
    }

    #[test]
    fn rejects_duplicate_industry() {
        let yaml = r"
profiles:
  - industry: hvac
    daily_search_volume: 1
    average_service_value: 1
    conversion_rate: 0.1
    market_size: 1
  - industry: HVAC
    daily_search_volume: 2
    average_service_value: 2
    conversion_rate: 0.1
    market_size: 2
";
        let err = parse_market_profiles(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate market profile industry"));
    }

    #[test]
    fn rejects_out_of_range_conversion_rate() {
        let yaml = r"
profiles:
  - industry: hvac
    daily_search_volume: 1
    average_service_value: 1
    conversion_rate: 1.5
    market_size: 1
";
        let err = parse_market_profiles(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("conversion_rate")));
    }

    #[test]
    fn rejects_blank_industry() {
        let yaml = r"
profiles:
  - industry: '  '
    daily_search_volume: 1
    average_service_value: 1
    conversion_rate: 0.1
    market_size: 1
";
        assert!(matches!(
            parse_market_profiles(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_market_profiles(Path::new("/nonexistent/markets.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::MarketFileIo { .. }));
    }

    #[test]
    fn default_assumptions_are_valid() {
        assert!(validate_assumptions(&MarketAssumptions::default()).is_ok());
    }
}
