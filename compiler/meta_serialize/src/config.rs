//! Serializer configuration.

use crate::version::Version;

/// Metadata version written by default.
pub const DEFAULT_METADATA_VERSION: Version = Version::new(1, 0, 0);

/// Policies consulted by [`DefaultExtension`](crate::DefaultExtension).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Reference types by type-table id instead of inlining them.
    pub use_type_table: bool,

    /// Collapse source-only visibilities to portable ones.
    pub normalize_visibility: bool,

    /// Leave compiler-synthesized members out of class records.
    pub skip_synthetic_members: bool,

    /// Metadata format version reported to callers.
    pub metadata_version: Version,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            use_type_table: false,
            normalize_visibility: false,
            skip_synthetic_members: true,
            metadata_version: DEFAULT_METADATA_VERSION,
        }
    }
}

impl SerializerConfig {
    /// Create a config that references types through the type table.
    pub fn with_type_table() -> Self {
        Self {
            use_type_table: true,
            ..Default::default()
        }
    }

    /// Create a config that normalizes visibilities.
    pub fn with_normalized_visibility() -> Self {
        Self {
            normalize_visibility: true,
            ..Default::default()
        }
    }

    /// Create a config that keeps synthesized members.
    pub fn with_synthetic_members() -> Self {
        Self {
            skip_synthetic_members: false,
            ..Default::default()
        }
    }

    /// Create a config for the given metadata version.
    pub fn with_metadata_version(metadata_version: Version) -> Self {
        Self {
            metadata_version,
            ..Default::default()
        }
    }
}
