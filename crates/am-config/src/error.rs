//! Error types for catalogue configuration

use am_media::{TenantId, VariantId};
use std::path::PathBuf;

/// Errors loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No format registered for file extension
    #[error("unsupported config extension: '{0}'")]
    UnsupportedExtension(String),

    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// Tenant listed more than once
    #[error("duplicate tenant: {0}")]
    DuplicateTenant(TenantId),

    /// Variant id listed more than once for a tenant
    #[error("duplicate variant {variant} for tenant {tenant}")]
    DuplicateVariant { tenant: TenantId, variant: VariantId },

    /// Variant id that cannot appear in a location
    #[error("invalid variant id '{variant}' for tenant {tenant}")]
    InvalidVariantId { tenant: TenantId, variant: String },

    /// Size parameter that is not a positive integer
    #[error("invalid {parameter} '{value}' on variant {variant} of tenant {tenant}")]
    InvalidParameter {
        tenant: TenantId,
        variant: VariantId,
        parameter: String,
        value: String,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
