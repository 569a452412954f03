//! Shared test utilities for the encoder tests.
//!
//! Builds small declaration trees and runs encoders against fresh sessions.
//! Only compiled in test builds.

use meta_ir::{ClassDecl, ClassId, DeclarationTree, Type, TypeArg};

use crate::encoder::ElementEncoder;
use crate::extension::DefaultExtension;
use crate::records::{TypeRecord, TypeRef};
use crate::tables::{TypeTable, VersionRequirementTable};

/// Last segment of a qualified name: `pkg/Outer.Inner` -> `Inner`.
fn simple_name(fq_name: &str) -> &str {
    fq_name
        .rsplit(['/', '.'])
        .next()
        .unwrap_or(fq_name)
}

/// Add a public final top-level class.
pub(crate) fn add_class(tree: &mut DeclarationTree, fq_name: &str) -> ClassId {
    let decl = class_decl(tree, fq_name);
    tree.add_class(decl)
}

/// Build a class declaration named after its qualified name.
pub(crate) fn class_decl(tree: &mut DeclarationTree, fq_name: &str) -> ClassDecl {
    let name = tree.intern(simple_name(fq_name));
    let fq_name = tree.intern(fq_name);
    ClassDecl::new(name, fq_name)
}

/// A non-null type of a class declared outside the tree.
pub(crate) fn external(tree: &mut DeclarationTree, fq_name: &str, arguments: Vec<Type>) -> Type {
    let fq_name = tree.intern(fq_name);
    Type::external(fq_name, arguments.into_iter().map(TypeArg::invariant).collect())
}

/// One fresh session.
pub(crate) struct Session {
    pub(crate) extension: DefaultExtension,
    pub(crate) type_table: TypeTable,
    pub(crate) version_requirements: VersionRequirementTable,
}

impl Session {
    pub(crate) fn new(extension: DefaultExtension) -> Self {
        Session {
            extension,
            type_table: TypeTable::new(),
            version_requirements: VersionRequirementTable::new(),
        }
    }

    pub(crate) fn encoder<'s>(
        &'s mut self,
        tree: &'s DeclarationTree,
        class: ClassId,
    ) -> ElementEncoder<'s, 'static, DefaultExtension> {
        ElementEncoder::new(
            tree,
            &mut self.extension,
            &mut self.type_table,
            Some(&mut self.version_requirements),
            class,
        )
    }

    pub(crate) fn qualified_name(&self, id: u32) -> &str {
        self.extension.names().qualified_name(id).unwrap_or("<missing>")
    }

    pub(crate) fn string(&self, id: u32) -> &str {
        self.extension.names().string(id).unwrap_or("<missing>")
    }
}

/// The record behind an inline reference.
///
/// # Panics
/// Panics on a type-table id.
pub(crate) fn inline(ty: &TypeRef) -> &TypeRecord {
    ty.as_inline()
        .unwrap_or_else(|| panic!("expected an inline type, found {ty:?}"))
}
