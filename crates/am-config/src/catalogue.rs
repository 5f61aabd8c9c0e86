//! In-memory variant catalogue
//!
//! [`StaticCatalogue`] serves per-tenant snapshots. Edits build a new slice
//! and swap it in, so a snapshot handed out earlier never changes.

use crate::config::{validate_variant, AdaptiveMediaConfig};
use crate::error::ConfigError;
use am_core::VariantCatalogue;
use am_media::{TenantId, VariantDefinition, VariantId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

type Snapshot = Arc<[VariantDefinition]>;

/// Catalogue held in memory, editable at runtime
#[derive(Debug, Default)]
pub struct StaticCatalogue {
    tenants: RwLock<HashMap<TenantId, Snapshot>>,
}

impl StaticCatalogue {
    /// Create empty catalogue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a configuration
    ///
    /// # Errors
    /// Validation failure
    pub fn from_config(config: &AdaptiveMediaConfig) -> Result<Self, ConfigError> {
        let catalogue = Self::new();
        catalogue.replace(config)?;
        Ok(catalogue)
    }

    /// Load a configuration file into a new catalogue
    ///
    /// # Errors
    /// See [`AdaptiveMediaConfig::load`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_config(&AdaptiveMediaConfig::load(path)?)
    }

    /// Swap the whole table for `config`
    ///
    /// Nothing changes if `config` is invalid.
    ///
    /// # Errors
    /// Validation failure
    pub fn replace(&self, config: &AdaptiveMediaConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let table: HashMap<_, _> = config
            .tenants
            .iter()
            .map(|t| (t.tenant_id, Snapshot::from(t.definitions())))
            .collect();

        *self.tenants.write() = table;
        tracing::info!("Catalogue replaced with {} tenants", config.tenants.len());
        Ok(())
    }

    /// Add `variant` to the tenant, or replace the one with the same id in place
    ///
    /// # Errors
    /// [`ConfigError::InvalidVariantId`] or [`ConfigError::InvalidParameter`]
    pub fn upsert_variant(
        &self,
        tenant: TenantId,
        variant: VariantDefinition,
    ) -> Result<(), ConfigError> {
        validate_variant(tenant, &variant)?;

        let mut tenants = self.tenants.write();
        let mut variants = tenants
            .get(&tenant)
            .map(|s| s.to_vec())
            .unwrap_or_default();

        tracing::debug!("Upserting variant {} for tenant {}", variant.id(), tenant);
        match variants.iter().position(|v| v.id() == variant.id()) {
            Some(i) => variants[i] = variant,
            None => variants.push(variant),
        }
        tenants.insert(tenant, variants.into());
        Ok(())
    }

    /// Remove a variant; `false` if the tenant had no such variant
    pub fn remove_variant(&self, tenant: TenantId, variant: &VariantId) -> bool {
        let mut tenants = self.tenants.write();
        let Some(current) = tenants.get(&tenant) else {
            return false;
        };

        let remaining: Vec<_> = current
            .iter()
            .filter(|v| v.id() != variant)
            .cloned()
            .collect();
        if remaining.len() == current.len() {
            return false;
        }

        tracing::debug!("Removed variant {} from tenant {}", variant, tenant);
        tenants.insert(tenant, remaining.into());
        true
    }

    /// Known tenants, ascending
    #[must_use]
    pub fn tenants(&self) -> Vec<TenantId> {
        let mut ids: Vec<_> = self.tenants.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl VariantCatalogue for StaticCatalogue {
    fn variant_definitions_for(&self, tenant_id: TenantId) -> Arc<[VariantDefinition]> {
        self.tenants
            .read()
            .get(&tenant_id)
            .map_or_else(|| Arc::from(Vec::new()), Arc::clone)
    }
}
