//! Rendition location identifiers
//!
//! Provides [`Location`], the stable relative path a rendition is served
//! and cached under:
//!
//! `/adaptive/{tenant}/{container}/{repository}/{content}/{version}/{variant}/{file}`
//!
//! The file name is percent-encoded from its UTF-8 bytes. Only
//! `A-Z a-z 0-9 . - * _` are left as is; a space becomes `%20`.

use crate::asset::SourceAsset;
use crate::variant::VariantId;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Leading segment of every location
pub const LOCATION_PREFIX: &str = "/adaptive";

// Form-encoding keeps `.`, `-`, `*` and `_`; everything else outside the
// alphanumerics is escaped.
const FILE_NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'*')
    .remove(b'_');

/// Relative location of a rendition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Build the location of `variant_id` for `asset`
    ///
    /// Total: an empty file name yields an empty last segment. Variant ids
    /// are checked when catalogues are loaded, not here.
    #[must_use]
    pub fn build(asset: &SourceAsset, variant_id: &VariantId) -> Self {
        Self(format!(
            "{}/{}/{}/{}/{}/{}/{}/{}",
            LOCATION_PREFIX,
            asset.tenant_id(),
            asset.container_id(),
            asset.repository_id(),
            asset.content_id(),
            asset.content_version_id(),
            variant_id,
            encode_file_name(asset.file_name())
        ))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments after the leading `/`
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.trim_start_matches('/').split('/')
    }

    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Percent-encode a file name for use as the last location segment
#[must_use]
pub fn encode_file_name(file_name: &str) -> String {
    utf8_percent_encode(file_name, FILE_NAME_ENCODE_SET).to_string()
}
