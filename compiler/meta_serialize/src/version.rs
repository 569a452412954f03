//! Versions and version requirements.
//!
//! Requirements come from `core/RequiresVersion` annotations. Extraction is
//! best-effort: an annotation whose version is missing or malformed yields
//! no requirement rather than an error.

use std::fmt;

use meta_ir::well_known::{self, requires_version};
use meta_ir::{Annotation, ConstValue, DeclarationTree};

use crate::records::{PackedVersion, VersionRequirementRecord};
use crate::tables::StringTable;
use crate::tags::{LevelTag, VersionKindTag};

/// A `major.minor.patch` version.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Compiler version that introduced inline classes.
const INLINE_CLASSES_SINCE: Version = Version::new(1, 3, 0);

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major[.minor[.patch]]`; missing components are 0.
    ///
    /// Components are decimal without leading zeros and must fit in `u32`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut components = [0u32; 3];
        let mut count = 0;
        for part in text.split('.') {
            let slot = components.get_mut(count)?;
            *slot = parse_component(part)?;
            count += 1;
        }
        let [major, minor, patch] = components;
        Some(Version::new(major, minor, patch))
    }

    /// Pack into one word, using the compact layout when every component
    /// fits (`major <= 7`, `minor <= 15`, `patch <= 127`).
    pub fn encode(self) -> PackedVersion {
        let Version {
            major,
            minor,
            patch,
        } = self;
        if major <= 7 && minor <= 15 && patch <= 127 {
            PackedVersion::Compact(major | (minor << 3) | (patch << 7))
        } else {
            PackedVersion::Full(major | (minor << 8) | (patch << 16))
        }
    }

    pub fn decode(packed: PackedVersion) -> Self {
        match packed {
            PackedVersion::Compact(v) => Version::new(v & 0x7, (v >> 3) & 0xF, (v >> 7) & 0x7F),
            PackedVersion::Full(v) => Version::new(v & 0xFF, (v >> 8) & 0xFF, (v >> 16) & 0xFF),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// `0` or `[1-9][0-9]*`, within `u32`.
fn parse_component(part: &str) -> Option<u32> {
    let bytes = part.as_bytes();
    let well_formed = match bytes {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        _ => bytes.iter().all(u8::is_ascii_digit),
    };
    if !well_formed {
        return None;
    }
    part.parse().ok()
}

fn argument<'a>(
    tree: &DeclarationTree,
    annotation: &'a Annotation,
    name: &str,
) -> Option<&'a ConstValue> {
    tree.find_name(name)
        .and_then(|name| annotation.argument(name))
}

fn enum_entry<'t>(tree: &'t DeclarationTree, annotation: &Annotation, name: &str) -> Option<&'t str> {
    match argument(tree, annotation, name)? {
        ConstValue::Enum { entry, .. } => Some(tree.lookup(*entry)),
        _ => None,
    }
}

/// Extract a version requirement from a `core/RequiresVersion` annotation.
///
/// Returns `None` for other annotations and for a missing, non-string or
/// malformed `version` argument. Unknown `level` and `versionKind` entries
/// fall back to their defaults; an `errorCode` of `-1` means absent.
pub fn requirement_from_annotation(
    tree: &DeclarationTree,
    annotation: &Annotation,
    strings: &mut dyn StringTable,
) -> Option<VersionRequirementRecord> {
    if tree.lookup(annotation.class) != well_known::REQUIRES_VERSION {
        return None;
    }

    let ConstValue::String(raw) = argument(tree, annotation, requires_version::VERSION)? else {
        tracing::debug!("dropping version requirement: version is not a string");
        return None;
    };
    let raw = tree.lookup(*raw);
    let Some(version) = Version::parse(raw) else {
        tracing::debug!(version = raw, "dropping version requirement: malformed version");
        return None;
    };

    let message = match argument(tree, annotation, requires_version::MESSAGE) {
        Some(ConstValue::String(message)) => Some(strings.string_index(tree.lookup(*message))),
        _ => None,
    };
    let level = enum_entry(tree, annotation, requires_version::LEVEL)
        .map_or(LevelTag::DEFAULT, LevelTag::from_entry_name);
    let version_kind = enum_entry(tree, annotation, requires_version::VERSION_KIND)
        .map_or(VersionKindTag::DEFAULT, VersionKindTag::from_entry_name);
    let error_code = match argument(tree, annotation, requires_version::ERROR_CODE) {
        Some(ConstValue::Int(code)) => i32::try_from(*code).ok().filter(|&code| code != -1),
        _ => None,
    };

    Some(VersionRequirementRecord {
        version: version.encode(),
        level: level.non_default(),
        version_kind: version_kind.non_default(),
        message,
        error_code,
    })
}

/// The requirement every inline class carries: compiler version 1.3.0.
pub fn inline_class_requirement() -> VersionRequirementRecord {
    VersionRequirementRecord {
        version: INLINE_CLASSES_SINCE.encode(),
        level: LevelTag::Error.non_default(),
        version_kind: VersionKindTag::CompilerVersion.non_default(),
        message: None,
        error_code: None,
    }
}
