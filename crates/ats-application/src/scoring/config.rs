use std::collections::HashMap;
use std::sync::Arc;

use ats_domain::constants::{
    SETTING_KEYWORD_WEIGHT, SETTING_SCORING_STRATEGY, SETTING_SEMANTIC_WEIGHT,
    SETTING_SIMILARITY_THRESHOLD,
};
use ats_domain::error::{Error, Result};
use ats_domain::ports::TenantSettingsProvider;
use ats_domain::{ScoringConfig, ScoringStrategyKind};
use tracing::warn;

/// Build a tenant's scoring config from its raw key/value settings
///
/// Missing keys take the value from `defaults`. An unknown strategy name or
/// a weight outside [0, 1] is logged and replaced by the default for that
/// key; it never fails the request.
pub fn resolve_scoring_config(
    settings: &HashMap<String, String>,
    defaults: &ScoringConfig,
) -> ScoringConfig {
    let strategy = match settings.get(SETTING_SCORING_STRATEGY) {
        None => defaults.strategy,
        Some(raw) => raw.parse::<ScoringStrategyKind>().unwrap_or_else(|e| {
            warn!(
                key = SETTING_SCORING_STRATEGY,
                value = %raw,
                error = %e,
                "Invalid tenant setting, using default"
            );
            defaults.strategy
        }),
    };

    ScoringConfig {
        strategy,
        semantic_weight: unit_setting(settings, SETTING_SEMANTIC_WEIGHT, defaults.semantic_weight),
        keyword_weight: unit_setting(settings, SETTING_KEYWORD_WEIGHT, defaults.keyword_weight),
        similarity_threshold: unit_setting(
            settings,
            SETTING_SIMILARITY_THRESHOLD,
            defaults.similarity_threshold,
        ),
    }
}

fn unit_setting(settings: &HashMap<String, String>, key: &str, default: f64) -> f64 {
    let Some(raw) = settings.get(key) else {
        return default;
    };
    match parse_unit(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Invalid tenant setting, using default");
            default
        }
    }
}

fn parse_unit(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid_config(format!("'{raw}' is not a number")))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::invalid_config(format!("{value} is outside [0, 1]")))
    }
}

/// Resolves the [`ScoringConfig`] of a tenant at request time
#[derive(Clone)]
pub struct ScoringConfigResolver {
    settings: Arc<dyn TenantSettingsProvider>,
    defaults: ScoringConfig,
}

impl ScoringConfigResolver {
    /// Create a resolver over a settings store
    pub fn new(settings: Arc<dyn TenantSettingsProvider>, defaults: ScoringConfig) -> Self {
        Self { settings, defaults }
    }

    /// Deployment-wide defaults
    pub fn defaults(&self) -> &ScoringConfig {
        &self.defaults
    }

    /// Current scoring config of a tenant
    pub async fn resolve(&self, tenant_id: &str) -> Result<ScoringConfig> {
        let settings = self.settings.tenant_settings(tenant_id).await?;
        Ok(resolve_scoring_config(&settings, &self.defaults))
    }
}
