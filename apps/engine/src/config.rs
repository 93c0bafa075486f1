use anyhow::{Context, Result};

use crate::scoring::ScoringConfig;

/// Application configuration loaded from environment variables.
///
/// Every scoring constant is overridable because the stock values
/// (0.60 threshold, 1.3x contextual boost, 0.6x semantic credit) are
/// empirically chosen, not derived; treat them as tunables.
#[derive(Debug, Clone)]
pub struct Config {
    pub semantic_threshold: f64,
    pub contextual_boost: f64,
    pub semantic_credit: f64,
    pub must_have_weight: f64,
    pub good_to_have_weight: f64,
    pub penalty_missing_fraction: f64,
    pub penalty_factor: f64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringConfig::default();
        Ok(Config {
            semantic_threshold: env_f64("SEMANTIC_THRESHOLD", defaults.semantic_threshold)?,
            contextual_boost: env_f64("CONTEXTUAL_BOOST", defaults.contextual_boost)?,
            semantic_credit: env_f64("SEMANTIC_CREDIT", defaults.semantic_credit)?,
            must_have_weight: env_f64("MUST_HAVE_WEIGHT", defaults.must_have_weight)?,
            good_to_have_weight: env_f64("GOOD_TO_HAVE_WEIGHT", defaults.good_to_have_weight)?,
            penalty_missing_fraction: env_f64(
                "PENALTY_MISSING_FRACTION",
                defaults.penalty_missing_fraction,
            )?,
            penalty_factor: env_f64("PENALTY_FACTOR", defaults.penalty_factor)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Scoring parameters assembled from the environment overrides.
    pub fn scoring(&self) -> ScoringConfig {
        ScoringConfig {
            semantic_threshold: self.semantic_threshold,
            contextual_boost: self.contextual_boost,
            semantic_credit: self.semantic_credit,
            must_have_weight: self.must_have_weight,
            good_to_have_weight: self.good_to_have_weight,
            penalty_missing_fraction: self.penalty_missing_fraction,
            penalty_factor: self.penalty_factor,
            ..ScoringConfig::default()
        }
    }
}

fn env_f64(key: &str, default: f64) -> Result<f64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("Environment variable '{key}' must be a number")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_f64_default_when_unset() {
        std::env::remove_var("RESUMATCH_TEST_MISSING");
        assert_eq!(env_f64("RESUMATCH_TEST_MISSING", 0.42).unwrap(), 0.42);
    }

    #[test]
    fn test_env_f64_rejects_garbage() {
        std::env::set_var("RESUMATCH_TEST_GARBAGE", "not-a-number");
        assert!(env_f64("RESUMATCH_TEST_GARBAGE", 1.0).is_err());
        std::env::remove_var("RESUMATCH_TEST_GARBAGE");
    }
}
