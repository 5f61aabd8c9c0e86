//! Configuration file model
//!
//! Variant catalogues per tenant, readable from YAML, JSON or TOML:
//!
//! ```yaml
//! tenants:
//!   - tenant_id: 1
//!     variants:
//!       - id: small
//!         name: Small
//!         parameters:
//!           max-width: 100
//! ```

use crate::error::ConfigError;
use am_media::{TenantId, VariantDefinition, VariantId, PARAM_MAX_HEIGHT, PARAM_MAX_WIDTH};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format for a file extension (without dot)
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Format for a path, by extension
    ///
    /// # Errors
    /// [`ConfigError::UnsupportedExtension`] for anything else
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
            .ok_or_else(|| ConfigError::UnsupportedExtension(extension.to_string()))
    }

    fn parse(self, content: &str) -> Result<AdaptiveMediaConfig, ConfigError> {
        let config = match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }
}

/// Parameter value as written in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One variant definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub id: VariantId,
    pub name: String,
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterValue>,
}

impl VariantConfig {
    #[must_use]
    pub fn to_definition(&self) -> VariantDefinition {
        self.parameters.iter().fold(
            VariantDefinition::new(self.id.clone(), self.name.clone()),
            |variant, (name, value)| variant.with_parameter(name.clone(), value),
        )
    }
}

/// Variant catalogue of one tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub variants: Vec<VariantConfig>,
}

impl TenantConfig {
    /// Definitions in file order
    #[must_use]
    pub fn definitions(&self) -> Vec<VariantDefinition> {
        self.variants.iter().map(VariantConfig::to_definition).collect()
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveMediaConfig {
    #[serde(default)]
    pub tenants: Vec<TenantConfig>,
}

impl AdaptiveMediaConfig {
    /// Load and validate a configuration file
    ///
    /// # Errors
    /// Read, parse or validation failure
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;

        let config = Self::parse(format, &content)?;
        tracing::info!(
            "Loaded {} tenant catalogues from {}",
            config.tenants.len(),
            path.display()
        );
        Ok(config)
    }

    /// # Errors
    /// Parse or validation failure
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(ConfigFormat::Yaml, content)
    }

    /// # Errors
    /// Parse or validation failure
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(ConfigFormat::Json, content)
    }

    /// # Errors
    /// Parse or validation failure
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(ConfigFormat::Toml, content)
    }

    fn parse(format: ConfigFormat, content: &str) -> Result<Self, ConfigError> {
        let config = format.parse(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check tenant and variant ids and size parameters
    ///
    /// # Errors
    /// The first problem found, in file order
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut tenants = HashSet::new();
        for tenant in &self.tenants {
            if !tenants.insert(tenant.tenant_id) {
                return Err(ConfigError::DuplicateTenant(tenant.tenant_id));
            }

            let mut ids = HashSet::new();
            for variant in &tenant.variants {
                if !ids.insert(&variant.id) {
                    return Err(ConfigError::DuplicateVariant {
                        tenant: tenant.tenant_id,
                        variant: variant.id.clone(),
                    });
                }
                validate_variant(tenant.tenant_id, &variant.to_definition())?;
            }
        }
        Ok(())
    }
}

/// Check a single definition
///
/// The id must be usable as a location segment and size parameters must be
/// positive integers.
///
/// # Errors
/// [`ConfigError::InvalidVariantId`] or [`ConfigError::InvalidParameter`]
pub fn validate_variant(tenant: TenantId, variant: &VariantDefinition) -> Result<(), ConfigError> {
    let id = variant.id().as_str();
    if id.is_empty() || id.contains('/') {
        return Err(ConfigError::InvalidVariantId {
            tenant,
            variant: id.to_string(),
        });
    }

    for parameter in [PARAM_MAX_WIDTH, PARAM_MAX_HEIGHT] {
        if let Some(value) = variant.parameter(parameter) {
            if !value.trim().parse::<u32>().is_ok_and(|v| v > 0) {
                return Err(ConfigError::InvalidParameter {
                    tenant,
                    variant: variant.id().clone(),
                    parameter: parameter.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(())
}
