//! Element encoding.
//!
//! An [`ElementEncoder`] encodes one declaration (a class, or a member or
//! type alias inside one) against a session: the caller's extension, type
//! table and version-requirement table. Members and type aliases are
//! encoded by child encoders that share the session tables by mutable
//! borrow and layer their type-parameter interner over the parent's.
//!
//! # Type-parameter references
//!
//! A type-parameter reference names a parameter of the *containing*
//! declaration by its simple name; any other parameter (one of an enclosing
//! class, say) is referenced by an id interned in the layered type-parameter
//! interner, so ids stay unique along the whole declaration chain.

mod class;
mod driver;
mod members;
mod types;

use meta_ir::{Annotation, ClassId, DeclRef, DeclarationTree, Name, TypeParamId};

use crate::extension::SerializerExtension;
use crate::tables::{Interner, TypeTable, VersionRequirementTable};
use crate::version::requirement_from_annotation;

pub use driver::{
    encode_class, encode_class_hierarchy, encode_classes_parallel, EncodedClass, EncodedSession,
};

/// Encoder for one declaration and, through child encoders, its members.
pub struct ElementEncoder<'a, 'p, E: SerializerExtension + ?Sized> {
    tree: &'a DeclarationTree,
    extension: &'a mut E,
    type_parameters: Interner<'p, TypeParamId>,
    type_table: &'a mut TypeTable,
    version_requirements: Option<&'a mut VersionRequirementTable>,
    /// Class whose body is being encoded.
    class: ClassId,
    /// Declaration whose own type parameters are referenced by name.
    containing: DeclRef,
}

impl<'a, 'p, E: SerializerExtension + ?Sized> ElementEncoder<'a, 'p, E> {
    /// Encoder for a top-level class.
    pub fn new(
        tree: &'a DeclarationTree,
        extension: &'a mut E,
        type_table: &'a mut TypeTable,
        version_requirements: Option<&'a mut VersionRequirementTable>,
        class: ClassId,
    ) -> Self {
        ElementEncoder {
            tree,
            extension,
            type_parameters: Interner::new(),
            type_table,
            version_requirements,
            class,
            containing: DeclRef::Class(class),
        }
    }

    /// Encoder for a nested class whose outer class was encoded with the
    /// type-parameter interner `parent`.
    pub fn with_parent(
        tree: &'a DeclarationTree,
        extension: &'a mut E,
        type_table: &'a mut TypeTable,
        version_requirements: Option<&'a mut VersionRequirementTable>,
        parent: &'p Interner<'p, TypeParamId>,
        class: ClassId,
    ) -> Self {
        ElementEncoder {
            type_parameters: Interner::with_parent(parent),
            ..Self::new(tree, extension, type_table, version_requirements, class)
        }
    }

    /// Encoder for a member or type alias of the current class.
    fn child(&mut self, containing: DeclRef) -> ElementEncoder<'_, '_, E> {
        ElementEncoder {
            tree: self.tree,
            extension: &mut *self.extension,
            type_parameters: Interner::with_parent(&self.type_parameters),
            type_table: &mut *self.type_table,
            version_requirements: self.version_requirements.as_deref_mut(),
            class: self.class,
            containing,
        }
    }

    /// The type-parameter interner, for layering nested class encoders.
    pub fn into_type_parameters(self) -> Interner<'p, TypeParamId> {
        self.type_parameters
    }

    fn string_index(&mut self, name: Name) -> u32 {
        let text = self.tree.lookup(name);
        self.extension.string_table().string_index(text)
    }

    fn qualified_name_index(&mut self, fq_name: Name) -> u32 {
        let text = self.tree.lookup(fq_name);
        self.extension.string_table().qualified_name_index(text)
    }

    /// Ids of the requirements declared through annotations, one per
    /// recognized annotation. Empty when the session has no table.
    fn annotation_requirements(&mut self, annotations: &[Annotation]) -> Vec<u32> {
        let tree = self.tree;
        let Some(table) = self.version_requirements.as_deref_mut() else {
            return Vec::new();
        };
        let mut ids = Vec::new();
        for annotation in annotations {
            let strings = self.extension.string_table();
            if let Some(requirement) = requirement_from_annotation(tree, annotation, strings) {
                ids.push(table.intern(requirement));
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests;
