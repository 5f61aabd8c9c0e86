//! Adaptive Media Configuration
//!
//! Per-tenant variant catalogues loaded from YAML, JSON or TOML, and
//! [`StaticCatalogue`], the in-memory [`am_core::VariantCatalogue`] they
//! feed.
//!
//! # Example
//!
//! ```rust
//! use am_config::{AdaptiveMediaConfig, StaticCatalogue};
//! use am_core::VariantCatalogue;
//! use am_media::TenantId;
//!
//! let config = AdaptiveMediaConfig::from_json_str(
//!     r#"{"tenants":[{"tenant_id":1,"variants":[{"id":"small","name":"Small"}]}]}"#,
//! )?;
//! let catalogue = StaticCatalogue::from_config(&config)?;
//! assert_eq!(catalogue.variant_definitions_for(TenantId(1)).len(), 1);
//! # Ok::<(), am_config::ConfigError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalogue;
pub mod config;
pub mod error;

pub use catalogue::StaticCatalogue;
pub use config::{
    validate_variant, AdaptiveMediaConfig, ConfigFormat, ParameterValue, TenantConfig,
    VariantConfig,
};
pub use error::ConfigError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
