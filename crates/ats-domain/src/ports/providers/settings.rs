use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

/// Per-tenant key/value settings store
///
/// Keys read by the search core are listed in [`crate::constants`]
/// (`scoring_strategy`, `semantic_weight`, `keyword_weight`,
/// `similarity_threshold`). Unknown tenants yield an empty map.
#[async_trait]
pub trait TenantSettingsProvider: Send + Sync {
    /// All settings of one tenant
    async fn tenant_settings(&self, tenant_id: &str) -> Result<HashMap<String, String>>;
}
