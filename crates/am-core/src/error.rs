//! Error types for adaptive media processing
//!
//! Provides error handling for:
//! - Rendition generation failures (processor)
//! - Persistence, read and delete failures (storage)
//!
//! An unsupported mime type is not an error: operations on such assets are
//! no-ops.

use am_media::{AssetKey, RenditionKey, VariantId};

/// Processor failed to produce rendition bytes
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// IO error while reading the source or writing the rendition
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Codec rejected the source or the parameters
    #[error("codec error: {0}")]
    Codec(String),
}

/// Storage backend failure
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error talking to the backend
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendition was never stored or has been deleted
    #[error("rendition not found: {0}")]
    NotFound(RenditionKey),

    /// Backend-specific failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Main adaptive media error type
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Generating one variant failed; later variants were not attempted
    #[error("failed to generate variant {variant} of asset {asset}: {source}")]
    Generation {
        asset: AssetKey,
        variant: VariantId,
        #[source]
        source: GenerationError,
    },

    /// Storage operation failed
    #[error("storage failed for asset {asset}{}: {source}", describe_variant(.variant))]
    Storage {
        asset: AssetKey,
        /// `None` for operations spanning every variant (delete)
        variant: Option<VariantId>,
        #[source]
        source: StorageError,
    },
}

fn describe_variant(variant: &Option<VariantId>) -> String {
    variant
        .as_ref()
        .map(|v| format!(" (variant {v})"))
        .unwrap_or_default()
}

impl MediaError {
    /// Asset the failure relates to
    #[inline]
    #[must_use]
    pub fn asset(&self) -> AssetKey {
        match self {
            Self::Generation { asset, .. } | Self::Storage { asset, .. } => *asset,
        }
    }

    /// Variant the failure relates to, if any
    #[inline]
    #[must_use]
    pub fn variant(&self) -> Option<&VariantId> {
        match self {
            Self::Generation { variant, .. } => Some(variant),
            Self::Storage { variant, .. } => variant.as_ref(),
        }
    }

    /// Check if retrying the operation may succeed
    ///
    /// IO and backend failures are transient; codec and missing-rendition
    /// failures are not.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Generation {
                source: GenerationError::Io(_),
                ..
            } | Self::Storage {
                source: StorageError::Io(_) | StorageError::Backend(_),
                ..
            }
        )
    }
}
