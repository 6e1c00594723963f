//! Tenant settings providers

mod static_settings;

pub use static_settings::StaticTenantSettingsProvider;
