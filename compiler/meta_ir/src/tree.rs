//! The declaration tree: arena storage for every declaration plus the string
//! interner that names them.
//!
//! The resolver builds a tree through the `add_*` methods; the encoder only
//! ever sees `&DeclarationTree`.

use crate::well_known;
use crate::{
    ClassDecl, ClassId, Classifier, DeclRef, Declaration, MemberDecl, MemberId, Name,
    StringInterner, StringLookup, Type, TypeAliasDecl, TypeAliasId, TypeKind, TypeParamDecl,
    TypeParamId, Variance,
};

/// Arena of resolved declarations.
#[derive(Default)]
pub struct DeclarationTree {
    interner: StringInterner,
    classes: Vec<ClassDecl>,
    members: Vec<MemberDecl>,
    type_params: Vec<TypeParamDecl>,
    type_aliases: Vec<TypeAliasDecl>,
}

/// Convert an arena length into the next raw id.
///
/// # Panics
/// Panics if the arena holds more than `u32::MAX` entries.
fn next_raw(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("declaration arena overflow: {len} entries"))
}

impl DeclarationTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Names ───────────────────────────────────────────────────────

    /// Intern a string into the tree's interner.
    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Look up an interned name.
    pub fn lookup(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    /// Find an already-interned name.
    pub fn find_name(&self, s: &str) -> Option<Name> {
        self.interner.get(s)
    }

    // ── Building ────────────────────────────────────────────────────

    /// Add a top-level class.
    pub fn add_class(&mut self, decl: ClassDecl) -> ClassId {
        let id = ClassId::new(next_raw(self.classes.len()));
        self.classes.push(decl);
        id
    }

    /// Add a class nested in `outer`, appending it to `outer`'s body.
    ///
    /// A class carrying the `COMPANION` modifier also becomes `outer`'s
    /// companion object.
    pub fn add_nested_class(&mut self, outer: ClassId, mut decl: ClassDecl) -> ClassId {
        decl.outer = Some(outer);
        let is_companion = decl.is_companion();
        let id = self.add_class(decl);
        let outer = self.class_mut(outer);
        outer.declarations.push(Declaration::Class(id));
        if is_companion {
            outer.companion = Some(id);
        }
        id
    }

    /// Add a type parameter to `owner`'s parameter list.
    pub fn add_type_param(
        &mut self,
        owner: DeclRef,
        name: Name,
        variance: Variance,
        reified: bool,
        bounds: Vec<Type>,
    ) -> TypeParamId {
        let id = TypeParamId::new(next_raw(self.type_params.len()));
        self.type_params.push(TypeParamDecl {
            name,
            owner,
            variance,
            reified,
            bounds,
        });
        match owner {
            DeclRef::Class(class) => self.class_mut(class).type_params.push(id),
            DeclRef::Member(member) => self.members[member.index()].type_params.push(id),
            DeclRef::TypeAlias(alias) => self.type_aliases[alias.index()].type_params.push(id),
        }
        id
    }

    /// Add a member to `owner`'s body.
    pub fn add_member(&mut self, owner: ClassId, mut decl: MemberDecl) -> MemberId {
        decl.owner = owner;
        let id = MemberId::new(next_raw(self.members.len()));
        self.members.push(decl);
        self.class_mut(owner)
            .declarations
            .push(Declaration::Member(id));
        id
    }

    /// Add a type alias to `owner`'s body.
    pub fn add_type_alias(&mut self, owner: ClassId, decl: TypeAliasDecl) -> TypeAliasId {
        let id = TypeAliasId::new(next_raw(self.type_aliases.len()));
        self.type_aliases.push(decl);
        self.class_mut(owner)
            .declarations
            .push(Declaration::TypeAlias(id));
        id
    }

    pub fn add_supertype(&mut self, class: ClassId, supertype: Type) {
        self.class_mut(class).supertypes.push(supertype);
    }

    // ── Access ──────────────────────────────────────────────────────

    pub fn class(&self, id: ClassId) -> &ClassDecl {
        &self.classes[id.index()]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut ClassDecl {
        &mut self.classes[id.index()]
    }

    pub fn member(&self, id: MemberId) -> &MemberDecl {
        &self.members[id.index()]
    }

    pub fn type_param(&self, id: TypeParamId) -> &TypeParamDecl {
        &self.type_params[id.index()]
    }

    pub fn type_alias(&self, id: TypeAliasId) -> &TypeAliasDecl {
        &self.type_aliases[id.index()]
    }

    /// All class ids in insertion order.
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(|i| ClassId::new(next_raw(i)))
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Qualified name of a classifier.
    pub fn classifier_fq_name(&self, classifier: Classifier) -> &str {
        match classifier {
            Classifier::Class(class) => self.lookup(self.class(class).fq_name),
            Classifier::Alias(alias) => self.lookup(self.type_alias(alias).fq_name),
            Classifier::External(fq_name) => self.lookup(fq_name),
        }
    }

    /// Whether `ty` is the implicit default upper bound `core/Any?`.
    ///
    /// Only the expanded form counts, so an alias of `Any?` is a default
    /// bound too.
    pub fn is_default_bound(&self, ty: &Type) -> bool {
        if !ty.nullable {
            return false;
        }
        match &ty.kind {
            TypeKind::Classifier {
                classifier,
                arguments,
            } => arguments.is_empty() && self.classifier_fq_name(*classifier) == well_known::ANY,
            _ => false,
        }
    }

    /// Whether `class` is one of the two hierarchy roots.
    pub fn is_hierarchy_root(&self, class: ClassId) -> bool {
        well_known::is_hierarchy_root(self.lookup(self.class(class).fq_name))
    }

    /// The implicit default upper bound `core/Any?`.
    pub fn default_bound(&mut self) -> Type {
        let any = self.intern(well_known::ANY);
        Type::external(any, Vec::new()).nullable()
    }
}

impl StringLookup for DeclarationTree {
    fn lookup(&self, name: Name) -> &str {
        DeclarationTree::lookup(self, name)
    }
}

#[cfg(test)]
mod tests;
