//! The policy surface consulted by the encoder.
//!
//! Every method is required: an implementation states each policy
//! explicitly. [`DefaultExtension`] is the stock implementation driven by a
//! [`SerializerConfig`].
//!
//! Hooks receive records to annotate but never the encoder's type or
//! version-requirement tables. Extra class requirements are returned from
//! [`SerializerExtension::serialize_class`] and interned by the encoder.

use meta_ir::{ClassId, DeclarationTree, MemberId, MemberOrigin, Type, TypeKind, TypeParamId};

use crate::config::SerializerConfig;
use crate::flags::TypeFlags;
use crate::records::{
    ClassRecord, TypeParameterRecord, TypeRecord, TypeRecordKind, VersionRequirementRecord,
};
use crate::tables::{NameTable, StringTable};
use crate::version::Version;

pub trait SerializerExtension {
    /// The table strings and qualified names are interned into.
    fn string_table(&mut self) -> &mut dyn StringTable;

    fn metadata_version(&self) -> Version;

    /// Reference types by type-table id rather than inline.
    fn should_use_type_table(&self) -> bool;

    /// Collapse source-only visibilities before computing flags.
    fn should_use_normalized_visibility(&self) -> bool;

    /// Whether a nested class appears in its outer class's record.
    fn should_serialize_nested_class(&self, tree: &DeclarationTree, class: ClassId) -> bool;

    /// Whether a function or property gets a record.
    fn should_serialize_member(&self, tree: &DeclarationTree, member: MemberId) -> bool;

    /// Replacement for the class's declared callable members, in order.
    fn custom_class_members(&self, tree: &DeclarationTree, class: ClassId)
        -> Option<Vec<MemberId>>;

    /// Fill in the record of an unresolved type.
    fn serialize_error_type(&mut self, tree: &DeclarationTree, ty: &Type, record: &mut TypeRecord);

    /// Annotate both bounds of a flexible type before they are linked.
    fn serialize_flexible_type(
        &mut self,
        tree: &DeclarationTree,
        ty: &Type,
        lower: &mut TypeRecord,
        upper: &mut TypeRecord,
    );

    /// Mark a record produced by rewriting a suspend function type.
    fn mark_suspend_type(&self, record: &mut TypeRecord);

    /// Last look at every finished (non-error, non-flexible) type record.
    fn serialize_type(&mut self, tree: &DeclarationTree, ty: &Type, record: &mut TypeRecord);

    fn serialize_type_parameter(
        &mut self,
        tree: &DeclarationTree,
        param: TypeParamId,
        record: &mut TypeParameterRecord,
    );

    /// Last look at a class record; returns extra version requirements.
    fn serialize_class(
        &mut self,
        tree: &DeclarationTree,
        class: ClassId,
        record: &mut ClassRecord,
    ) -> Vec<VersionRequirementRecord>;
}

/// Stock extension: names go to an owned [`NameTable`], policies come from
/// a [`SerializerConfig`], and all annotation hooks are no-ops.
#[derive(Debug, Default)]
pub struct DefaultExtension {
    names: NameTable,
    config: SerializerConfig,
}

impl DefaultExtension {
    pub fn new(config: SerializerConfig) -> Self {
        DefaultExtension {
            names: NameTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn into_names(self) -> NameTable {
        self.names
    }
}

impl SerializerExtension for DefaultExtension {
    fn string_table(&mut self) -> &mut dyn StringTable {
        &mut self.names
    }

    fn metadata_version(&self) -> Version {
        self.config.metadata_version
    }

    fn should_use_type_table(&self) -> bool {
        self.config.use_type_table
    }

    fn should_use_normalized_visibility(&self) -> bool {
        self.config.normalize_visibility
    }

    fn should_serialize_nested_class(&self, _tree: &DeclarationTree, _class: ClassId) -> bool {
        true
    }

    fn should_serialize_member(&self, tree: &DeclarationTree, member: MemberId) -> bool {
        !(self.config.skip_synthetic_members
            && tree.member(member).origin == MemberOrigin::Synthesized)
    }

    fn custom_class_members(
        &self,
        _tree: &DeclarationTree,
        _class: ClassId,
    ) -> Option<Vec<MemberId>> {
        None
    }

    /// Records the resolver's message so readers can report it.
    fn serialize_error_type(&mut self, tree: &DeclarationTree, ty: &Type, record: &mut TypeRecord) {
        let message = match &ty.kind {
            TypeKind::Error { message } => Some(self.names.string_index(tree.lookup(*message))),
            _ => None,
        };
        record.kind = TypeRecordKind::Error {
            class_name: None,
            message,
        };
    }

    fn serialize_flexible_type(
        &mut self,
        _tree: &DeclarationTree,
        _ty: &Type,
        _lower: &mut TypeRecord,
        _upper: &mut TypeRecord,
    ) {
    }

    fn mark_suspend_type(&self, record: &mut TypeRecord) {
        let flags = TypeFlags::from_bits_retain(record.flags.unwrap_or(0)) | TypeFlags::SUSPEND;
        record.flags = Some(flags.bits());
    }

    fn serialize_type(&mut self, _tree: &DeclarationTree, _ty: &Type, _record: &mut TypeRecord) {}

    fn serialize_type_parameter(
        &mut self,
        _tree: &DeclarationTree,
        _param: TypeParamId,
        _record: &mut TypeParameterRecord,
    ) {
    }

    fn serialize_class(
        &mut self,
        _tree: &DeclarationTree,
        _class: ClassId,
        _record: &mut ClassRecord,
    ) -> Vec<VersionRequirementRecord> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests;
