//! Class records.

use meta_ir::{ClassKind, ClassModifiers, DeclRef, Declaration, Modality};

use super::ElementEncoder;
use crate::error::EncodeError;
use crate::extension::SerializerExtension;
use crate::flags::{class_flags, non_default, DEFAULT_CLASS_FLAGS};
use crate::records::{ClassRecord, EnumEntryRecord};
use crate::tags::{ClassKindTag, ModalityTag, VisibilityTag};
use crate::version::inline_class_requirement;

impl<E: SerializerExtension + ?Sized> ElementEncoder<'_, '_, E> {
    /// Encode the class this encoder was created for.
    ///
    /// Fails only when the session has no version-requirement table.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(class = self.tree.lookup(self.tree.class(self.class).fq_name))
    )]
    pub fn class_record(&mut self) -> Result<ClassRecord, EncodeError> {
        let tree = self.tree;
        let class = self.class;
        let decl = tree.class(class);
        debug_assert_eq!(self.containing, DeclRef::Class(class));

        let mut record = ClassRecord::default();

        let visibility = VisibilityTag::from_visibility(
            decl.visibility,
            self.extension.should_use_normalized_visibility(),
        );
        let flags = class_flags(
            !decl.annotations.is_empty(),
            visibility,
            ModalityTag::from_modality(decl.modality),
            ClassKindTag::from_kind(decl.kind, decl.is_companion()),
            decl.modifiers,
        );
        record.flags = non_default(flags, DEFAULT_CLASS_FLAGS);

        record.fq_name = self.qualified_name_index(decl.fq_name);

        for &param in &decl.type_params {
            let param = self.type_parameter_record(param);
            record.type_parameters.push(param);
        }

        if !tree.is_hierarchy_root(class) {
            for supertype in &decl.supertypes {
                let supertype = self.type_ref(supertype);
                record.supertypes.push(supertype);
            }
        }

        if decl.kind != ClassKind::EnumEntry {
            for member in decl.declarations.iter().filter_map(|declaration| match declaration {
                Declaration::Member(member) if tree.member(*member).is_constructor() => Some(*member),
                _ => None,
            }) {
                let constructor = self.constructor_record(member);
                record.constructors.push(constructor);
            }
        }

        self.callable_members(&mut record);
        self.nested_classifiers(&mut record);

        if decl.modality == Modality::Sealed {
            for declaration in &decl.declarations {
                if let Declaration::Class(nested) = *declaration {
                    let nested = tree.class(nested);
                    if nested.kind != ClassKind::EnumEntry {
                        let fq_name = self.qualified_name_index(nested.fq_name);
                        record.sealed_subclass_fq_names.push(fq_name);
                    }
                }
            }
        }

        if let Some(companion) = decl.companion {
            record.companion_object_name = Some(self.string_index(tree.class(companion).name));
        }

        record.type_table = self.type_table.serialize();

        if self.version_requirements.is_none() {
            return Err(EncodeError::MissingVersionRequirementTable {
                class: tree.lookup(decl.fq_name).to_string(),
            });
        }
        record.version_requirements = self.annotation_requirements(&decl.annotations);
        let additional = self.extension.serialize_class(tree, class, &mut record);
        if let Some(table) = self.version_requirements.as_deref_mut() {
            for requirement in additional {
                record.version_requirements.push(table.intern(requirement));
            }
            if decl.modifiers.contains(ClassModifiers::INLINE) {
                record
                    .version_requirements
                    .push(table.intern(inline_class_requirement()));
            }
            record.version_requirement_table = table.serialize();
        }

        tracing::debug!(
            type_parameters = record.type_parameters.len(),
            supertypes = record.supertypes.len(),
            functions = record.functions.len(),
            properties = record.properties.len(),
            "encoded class"
        );
        Ok(record)
    }

    /// Nested type aliases, nested classes and enum entries, in
    /// declaration order.
    fn nested_classifiers(&mut self, record: &mut ClassRecord) {
        let tree = self.tree;
        for declaration in &tree.class(self.class).declarations {
            match *declaration {
                Declaration::TypeAlias(alias) => {
                    let alias = self.type_alias_record(alias);
                    record.type_aliases.push(alias);
                }
                Declaration::Class(nested) => {
                    if !self.extension.should_serialize_nested_class(tree, nested) {
                        tracing::debug!(
                            nested = tree.lookup(tree.class(nested).fq_name),
                            "skipping nested class"
                        );
                        continue;
                    }
                    let nested = tree.class(nested);
                    let name = self.string_index(nested.name);
                    if nested.kind == ClassKind::EnumEntry {
                        record.enum_entries.push(EnumEntryRecord { name });
                    } else {
                        record.nested_class_names.push(name);
                    }
                }
                Declaration::Member(_) => {}
            }
        }
    }
}
