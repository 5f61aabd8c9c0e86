//! Adaptive Media Core
//!
//! Derives renditions of source assets and offers them back ranked by how
//! well they match a caller's requested properties:
//! - [`DerivationEngine`]: generate and store one rendition per variant
//! - [`ResolutionEngine`]: rank candidate renditions for a request
//! - [`AdaptiveMedia`]: both engines over one set of capabilities
//!
//! Image decoding, blob storage and variant configuration are supplied by
//! the caller through [`Processor`], [`Storage`] and [`VariantCatalogue`].
//!
//! # Example
//!
//! ```rust,ignore
//! use am_core::prelude::*;
//!
//! let media = AdaptiveMedia::new(processor, storage, catalogue);
//! media.process(&asset)?;
//!
//! let request = PropertyRequest::new().with(MediaProperty::Width, 150);
//! let best = media.get_media(&asset, &request);
//! if let Some(rendition) = best.first() {
//!     println!("{}", rendition.location());
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod capability;
pub mod derivation;
pub mod error;
pub mod media;
pub mod ranking;
pub mod rendition;
pub mod resolution;

pub use capability::{ContentStream, Processor, Storage, VariantCatalogue};
pub use derivation::DerivationEngine;
pub use error::{GenerationError, MediaError, StorageError};
pub use media::AdaptiveMedia;
pub use ranking::RankingComparator;
pub use rendition::{ContentSource, Rendition, Renditions};
pub use resolution::ResolutionEngine;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with adaptive media
    pub use crate::{
        AdaptiveMedia, ContentStream, MediaError, Processor, Rendition, Renditions, Storage,
        VariantCatalogue,
    };
    pub use am_media::{
        MediaProperty, MediaQuery, PropertyRequest, PropertyValue, SourceAsset, TenantId,
        VariantDefinition, VariantId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
