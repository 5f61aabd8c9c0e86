//! Adaptive Media Model
//!
//! Source assets, variant definitions and the property machinery used to
//! rank renditions.
//!
//! # Core Concepts
//!
//! - [`SourceAsset`]: Origin content renditions are derived from
//! - [`VariantDefinition`]: Named set of generation parameters
//! - [`PropertyMapping`]: Properties a rendition is declared to have
//! - [`PropertyRequest`]: Properties a caller wants, in priority order
//! - [`Distance`] / [`DistanceRegistry`]: Per-property closeness measures
//! - [`Location`]: Stable relative path of a rendition
//!
//! # Example
//!
//! ```rust
//! use am_media::{Distance, PropertyValue};
//!
//! let d = Distance::Absolute.distance(&PropertyValue::Integer(180), &PropertyValue::Integer(200));
//! assert_eq!(d, 20);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod asset;
mod distance;
mod location;
mod property;
mod request;
mod variant;

pub use asset::{AssetKey, RenditionKey, SourceAsset, SourceAssetBuilder, TenantId};
pub use distance::{Criterion, Distance, DistanceFn, DistanceRegistry, UNMATCHED};
pub use location::{encode_file_name, Location, LOCATION_PREFIX};
pub use property::{MediaProperty, PropertyError, PropertyMapping, PropertyValue};
pub use request::{MediaQuery, PropertyRequest};
pub use variant::{
    VariantDefinition, VariantId, PARAM_MAX_HEIGHT, PARAM_MAX_WIDTH, PARAM_MIME_TYPE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
