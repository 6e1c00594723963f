//! Tenant settings held in memory
//!
//! Loaded from the `tenants` section of the application config and
//! updatable at runtime.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use ats_domain::error::Result;
use ats_domain::ports::TenantSettingsProvider;

/// Key/value tenant settings kept in a concurrent map
#[derive(Debug, Default)]
pub struct StaticTenantSettingsProvider {
    tenants: DashMap<String, HashMap<String, String>>,
}

impl StaticTenantSettingsProvider {
    /// Create a store with no tenants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from tenant id -> settings
    pub fn from_map(tenants: HashMap<String, HashMap<String, String>>) -> Self {
        Self {
            tenants: tenants.into_iter().collect(),
        }
    }

    /// Set one setting of one tenant
    pub fn set(&self, tenant_id: &str, key: impl Into<String>, value: impl Into<String>) {
        self.tenants
            .entry(tenant_id.to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Number of configured tenants
    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }
}

#[async_trait]
impl TenantSettingsProvider for StaticTenantSettingsProvider {
    async fn tenant_settings(&self, tenant_id: &str) -> Result<HashMap<String, String>> {
        Ok(self
            .tenants
            .get(tenant_id)
            .map(|settings| settings.clone())
            .unwrap_or_default())
    }
}
