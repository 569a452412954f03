//! Metadata encoder for resolved declarations.
//!
//! Walks a [`meta_ir::DeclarationTree`] and produces compact records:
//! strings, qualified names, types and version requirements are interned
//! into per-session tables and referenced by dense ids. Encoding the same
//! tree with fresh tables always produces the same records.
//!
//! # Sessions
//!
//! A session is an extension (owning the string table) plus a
//! [`TypeTable`] and a [`VersionRequirementTable`]. [`encode_class`] runs one
//! class against caller-supplied tables; [`encode_class_hierarchy`] and
//! [`encode_classes_parallel`] set sessions up themselves.
//!
//! # Policies
//!
//! Everything configurable goes through [`SerializerExtension`].
//! [`DefaultExtension`] implements it from a [`SerializerConfig`].
//!
//! # Logging
//!
//! Encoding emits `tracing` spans and events. Call [`init_tracing`] and set
//! `RUST_LOG=meta_serialize=debug` (or `trace` for every interned id).

mod config;
mod encoder;
mod error;
mod extension;
pub mod flags;
mod records;
mod stack;
mod tables;
mod tags;
mod version;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use config::{SerializerConfig, DEFAULT_METADATA_VERSION};
pub use encoder::{
    encode_class, encode_class_hierarchy, encode_classes_parallel, ElementEncoder, EncodedClass,
    EncodedSession,
};
pub use error::EncodeError;
pub use extension::{DefaultExtension, SerializerExtension};
pub use flags::TypeFlags;
pub use records::{
    ArgumentRecord, ClassRecord, ClassifierId, ClassifierLevel, ConstructorRecord,
    EnumEntryRecord, ExtensionEntry, FunctionRecord, PackedVersion, PropertyRecord,
    TypeAliasRecord, TypeParameterRecord, TypeParameterRef, TypeRecord, TypeRecordKind, TypeRef,
    TypeTableRecord, ValueParameterRecord, VersionRequirementRecord,
    VersionRequirementTableRecord,
};
pub use tables::{
    Interner, NameTable, NameTableRecord, StringTable, TypeTable, VersionRequirementTable,
};
pub use tags::{
    ClassKindTag, LevelTag, MemberKindTag, ModalityTag, ProjectionTag, VarianceTag,
    VersionKindTag, VisibilityTag,
};
pub use version::{inline_class_requirement, requirement_from_annotation, Version};

// Type references sit in every record; keep them two words.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::TypeRef;
    const _: () = assert!(std::mem::size_of::<TypeRef>() == 16);
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once, and
/// leaves an already-installed global subscriber in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
