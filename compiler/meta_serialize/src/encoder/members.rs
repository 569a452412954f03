//! Member, value-parameter and type-alias records.
//!
//! Each member is encoded by a child encoder whose containing declaration is
//! the member itself, so the member's own type parameters are referenced by
//! name and the class's by id.

use meta_ir::{
    Declaration, DeclRef, FunctionModifiers, MemberDecl, MemberId, MemberKind, PropertyModifiers,
    Type, TypeAliasId, ValueParam, Visibility,
};

use super::ElementEncoder;
use crate::extension::SerializerExtension;
use crate::flags::{
    constructor_flags, function_flags, non_default, property_flags, type_alias_flags,
    value_parameter_flags, DEFAULT_CONSTRUCTOR_FLAGS, DEFAULT_FUNCTION_FLAGS,
    DEFAULT_PROPERTY_FLAGS, DEFAULT_TYPE_ALIAS_FLAGS, DEFAULT_VALUE_PARAMETER_FLAGS,
};
use crate::records::{
    ClassRecord, ConstructorRecord, FunctionRecord, PropertyRecord, TypeAliasRecord,
    ValueParameterRecord,
};
use crate::tags::{MemberKindTag, ModalityTag, VisibilityTag};

impl<E: SerializerExtension + ?Sized> ElementEncoder<'_, '_, E> {
    fn visibility_tag(&self, visibility: Visibility) -> VisibilityTag {
        VisibilityTag::from_visibility(visibility, self.extension.should_use_normalized_visibility())
    }

    /// Functions and properties: the extension's custom list if it has one,
    /// otherwise every declared callable member in declaration order.
    pub(super) fn callable_members(&mut self, record: &mut ClassRecord) {
        let tree = self.tree;
        let class = self.class;
        let members = self
            .extension
            .custom_class_members(tree, class)
            .unwrap_or_else(|| {
                tree.class(class)
                    .declarations
                    .iter()
                    .filter_map(|declaration| match declaration {
                        Declaration::Member(member) if tree.member(*member).is_callable() => {
                            Some(*member)
                        }
                        _ => None,
                    })
                    .collect()
            });

        for member in members {
            if !self.extension.should_serialize_member(tree, member) {
                tracing::debug!(member = tree.lookup(tree.member(member).name), "skipping member");
                continue;
            }
            let decl = tree.member(member);
            match &decl.kind {
                MemberKind::Function {
                    params,
                    return_type,
                    modifiers,
                } => {
                    let function = self.function_record(member, decl, params, return_type, *modifiers);
                    record.functions.push(function);
                }
                MemberKind::Property {
                    return_type,
                    modifiers,
                } => {
                    let property = self.property_record(member, decl, return_type, *modifiers);
                    record.properties.push(property);
                }
                MemberKind::Constructor { .. } => {}
            }
        }
    }

    pub(super) fn constructor_record(&mut self, member: MemberId) -> ConstructorRecord {
        let tree = self.tree;
        let decl = tree.member(member);
        let MemberKind::Constructor { params, primary } = &decl.kind else {
            return ConstructorRecord::default();
        };
        let flags = constructor_flags(
            !decl.annotations.is_empty(),
            self.visibility_tag(decl.visibility),
            !*primary,
        );

        let mut local = self.child(DeclRef::Member(member));
        let value_parameters = params
            .iter()
            .map(|param| local.value_parameter_record(param))
            .collect();
        let version_requirements = local.annotation_requirements(&decl.annotations);

        ConstructorRecord {
            flags: non_default(flags, DEFAULT_CONSTRUCTOR_FLAGS),
            value_parameters,
            version_requirements,
        }
    }

    fn function_record(
        &mut self,
        member: MemberId,
        decl: &MemberDecl,
        params: &[ValueParam],
        return_type: &Type,
        modifiers: FunctionModifiers,
    ) -> FunctionRecord {
        let flags = function_flags(
            !decl.annotations.is_empty(),
            self.visibility_tag(decl.visibility),
            ModalityTag::from_modality(decl.modality),
            MemberKindTag::from_origin(decl.origin),
            modifiers,
        );
        let name = self.string_index(decl.name);

        let mut local = self.child(DeclRef::Member(member));
        let type_parameters = decl
            .type_params
            .iter()
            .map(|&param| local.type_parameter_record(param))
            .collect();
        let receiver = decl.receiver.as_ref().map(|receiver| local.type_ref(receiver));
        let return_type = Some(local.type_ref(return_type));
        let value_parameters = params
            .iter()
            .map(|param| local.value_parameter_record(param))
            .collect();
        let version_requirements = local.annotation_requirements(&decl.annotations);

        FunctionRecord {
            flags: non_default(flags, DEFAULT_FUNCTION_FLAGS),
            name,
            type_parameters,
            receiver,
            value_parameters,
            return_type,
            version_requirements,
        }
    }

    fn property_record(
        &mut self,
        member: MemberId,
        decl: &MemberDecl,
        return_type: &Type,
        modifiers: PropertyModifiers,
    ) -> PropertyRecord {
        let flags = property_flags(
            !decl.annotations.is_empty(),
            self.visibility_tag(decl.visibility),
            ModalityTag::from_modality(decl.modality),
            MemberKindTag::from_origin(decl.origin),
            modifiers,
        );
        let name = self.string_index(decl.name);

        let mut local = self.child(DeclRef::Member(member));
        let type_parameters = decl
            .type_params
            .iter()
            .map(|&param| local.type_parameter_record(param))
            .collect();
        let receiver = decl.receiver.as_ref().map(|receiver| local.type_ref(receiver));
        let return_type = Some(local.type_ref(return_type));
        let version_requirements = local.annotation_requirements(&decl.annotations);

        PropertyRecord {
            flags: non_default(flags, DEFAULT_PROPERTY_FLAGS),
            name,
            type_parameters,
            receiver,
            return_type,
            version_requirements,
        }
    }

    fn value_parameter_record(&mut self, param: &ValueParam) -> ValueParameterRecord {
        let flags = value_parameter_flags(!param.annotations.is_empty(), param.modifiers);
        ValueParameterRecord {
            flags: non_default(flags, DEFAULT_VALUE_PARAMETER_FLAGS),
            name: self.string_index(param.name),
            ty: Some(self.type_ref(&param.ty)),
            vararg_element: param.vararg_element.as_ref().map(|ty| self.type_ref(ty)),
        }
    }

    pub(super) fn type_alias_record(&mut self, alias: TypeAliasId) -> TypeAliasRecord {
        let tree = self.tree;
        let decl = tree.type_alias(alias);
        let flags = type_alias_flags(
            !decl.annotations.is_empty(),
            self.visibility_tag(decl.visibility),
        );
        let name = self.string_index(decl.name);

        let mut local = self.child(DeclRef::TypeAlias(alias));
        let type_parameters = decl
            .type_params
            .iter()
            .map(|&param| local.type_parameter_record(param))
            .collect();
        let underlying = Some(local.type_ref(&decl.underlying));
        let expanded = Some(local.type_ref(&decl.expanded));
        let version_requirements = local.annotation_requirements(&decl.annotations);

        TypeAliasRecord {
            flags: non_default(flags, DEFAULT_TYPE_ALIAS_FLAGS),
            name,
            type_parameters,
            underlying,
            expanded,
            version_requirements,
        }
    }
}
