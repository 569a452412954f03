//! Declarations of the resolved program model.
//!
//! These are the read-only inputs of the metadata encoder. Every string is an
//! interned [`Name`]; qualified names use `/` between package segments and
//! `.` between nesting levels (`pkg/sub/Outer.Inner`).

use bitflags::bitflags;

use crate::{Annotation, ClassId, DeclRef, Declaration, Name, Type, TypeParamId};

/// Declared visibility, including levels that only exist in source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Internal,
    Private,
    Protected,
    #[default]
    Public,
    /// Private to the receiver instance; a refinement of `Private`.
    PrivateToThis,
    /// Local to a function body.
    Local,
    /// Visible within the declaring package only (foreign declarations).
    PackagePrivate,
    /// Visible to subclasses and to the declaring package (foreign declarations).
    ProtectedAndPackage,
}

/// Inheritance modality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    /// Closed hierarchy: direct subclasses are known at compile time.
    Sealed,
}

/// What sort of classifier a class declaration is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    /// Singleton object; companion objects carry [`ClassModifiers::COMPANION`].
    Object,
}

/// Declaration-site variance of a type parameter, also used for use-site
/// projections of type arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Variance {
    In,
    Out,
    #[default]
    Invariant,
}

/// How a member came to exist on its class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MemberOrigin {
    #[default]
    Declaration,
    FakeOverride,
    Delegation,
    /// Generated by the compiler (data-class `copy`, enum `values`, ...).
    Synthesized,
}

bitflags! {
    /// Boolean modifiers of a class declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassModifiers: u16 {
        const INNER = 1 << 0;
        const DATA = 1 << 1;
        const EXTERNAL = 1 << 2;
        const EXPECT = 1 << 3;
        /// Inline (value) class wrapping a single underlying value.
        const INLINE = 1 << 4;
        /// Functional interface.
        const FUN = 1 << 5;
        /// Object declared as the companion of its outer class.
        const COMPANION = 1 << 6;
    }
}

bitflags! {
    /// Boolean modifiers of a function declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FunctionModifiers: u16 {
        const OPERATOR = 1 << 0;
        const INFIX = 1 << 1;
        const INLINE = 1 << 2;
        const TAILREC = 1 << 3;
        const EXTERNAL = 1 << 4;
        const SUSPEND = 1 << 5;
        const EXPECT = 1 << 6;
    }
}

bitflags! {
    /// Boolean modifiers of a property declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct PropertyModifiers: u16 {
        const VAR = 1 << 0;
        const HAS_GETTER = 1 << 1;
        const HAS_SETTER = 1 << 2;
        const CONST = 1 << 3;
        const LATEINIT = 1 << 4;
        const EXTERNAL = 1 << 5;
        const DELEGATED = 1 << 6;
        const EXPECT = 1 << 7;
    }
}

impl Default for PropertyModifiers {
    /// A read-only property with a default getter.
    fn default() -> Self {
        Self::HAS_GETTER
    }
}

bitflags! {
    /// Boolean modifiers of a value parameter.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ParamModifiers: u8 {
        const DECLARES_DEFAULT = 1 << 0;
        const CROSSINLINE = 1 << 1;
        const NOINLINE = 1 << 2;
    }
}

/// A class-like declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    /// Simple name.
    pub name: Name,
    /// Fully qualified name, e.g. `pkg/Outer.Inner`.
    pub fq_name: Name,
    pub visibility: Visibility,
    pub modality: Modality,
    pub kind: ClassKind,
    pub modifiers: ClassModifiers,
    pub annotations: Vec<Annotation>,
    /// Own type parameters in declaration order.
    pub type_params: Vec<TypeParamId>,
    /// Supertypes in declaration order.
    pub supertypes: Vec<Type>,
    /// Body entries in declaration order.
    pub declarations: Vec<Declaration>,
    /// Lexically enclosing class, if nested.
    pub outer: Option<ClassId>,
    pub companion: Option<ClassId>,
}

impl ClassDecl {
    /// A public final class with no body.
    pub fn new(name: Name, fq_name: Name) -> Self {
        ClassDecl {
            name,
            fq_name,
            visibility: Visibility::Public,
            modality: Modality::Final,
            kind: ClassKind::Class,
            modifiers: ClassModifiers::empty(),
            annotations: Vec::new(),
            type_params: Vec::new(),
            supertypes: Vec::new(),
            declarations: Vec::new(),
            outer: None,
            companion: None,
        }
    }

    #[inline]
    pub fn is_inner(&self) -> bool {
        self.modifiers.contains(ClassModifiers::INNER)
    }

    #[inline]
    pub fn is_companion(&self) -> bool {
        self.modifiers.contains(ClassModifiers::COMPANION)
    }
}

/// A type parameter declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeParamDecl {
    pub name: Name,
    /// Declaration that introduced this parameter.
    pub owner: DeclRef,
    pub variance: Variance,
    pub reified: bool,
    /// Upper bounds in declaration order. The resolver always supplies at
    /// least the implicit default bound.
    pub bounds: Vec<Type>,
}

/// A value parameter of a function or constructor.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueParam {
    pub name: Name,
    pub ty: Type,
    /// Element type when declared `vararg`.
    pub vararg_element: Option<Type>,
    pub modifiers: ParamModifiers,
    pub annotations: Vec<Annotation>,
}

impl ValueParam {
    pub fn new(name: Name, ty: Type) -> Self {
        ValueParam {
            name,
            ty,
            vararg_element: None,
            modifiers: ParamModifiers::empty(),
            annotations: Vec::new(),
        }
    }
}

/// Kind-specific data of a member.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberKind {
    Constructor {
        params: Vec<ValueParam>,
        primary: bool,
    },
    Function {
        params: Vec<ValueParam>,
        return_type: Type,
        modifiers: FunctionModifiers,
    },
    Property {
        return_type: Type,
        modifiers: PropertyModifiers,
    },
}

/// A constructor, function or property declared on a class.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDecl {
    /// Simple name; `<init>` for constructors.
    pub name: Name,
    pub visibility: Visibility,
    pub modality: Modality,
    pub origin: MemberOrigin,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParamId>,
    /// Extension receiver type.
    pub receiver: Option<Type>,
    pub kind: MemberKind,
    /// Class the member is declared on.
    pub owner: ClassId,
}

impl MemberDecl {
    fn with_kind(name: Name, kind: MemberKind) -> Self {
        MemberDecl {
            name,
            visibility: Visibility::Public,
            modality: Modality::Final,
            origin: MemberOrigin::Declaration,
            annotations: Vec::new(),
            type_params: Vec::new(),
            receiver: None,
            kind,
            // Assigned by `DeclarationTree::add_member`.
            owner: ClassId::new(0),
        }
    }

    /// A public constructor.
    pub fn constructor(name: Name, params: Vec<ValueParam>, primary: bool) -> Self {
        Self::with_kind(name, MemberKind::Constructor { params, primary })
    }

    /// A public final function.
    pub fn function(name: Name, params: Vec<ValueParam>, return_type: Type) -> Self {
        Self::with_kind(
            name,
            MemberKind::Function {
                params,
                return_type,
                modifiers: FunctionModifiers::empty(),
            },
        )
    }

    /// A public final read-only property.
    pub fn property(name: Name, return_type: Type) -> Self {
        Self::with_kind(
            name,
            MemberKind::Property {
                return_type,
                modifiers: PropertyModifiers::default(),
            },
        )
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(
            self.kind,
            MemberKind::Function { .. } | MemberKind::Property { .. }
        )
    }

    #[inline]
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, MemberKind::Constructor { .. })
    }
}

/// A type alias declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeAliasDecl {
    pub name: Name,
    /// Fully qualified name, e.g. `pkg/Outer.Alias`.
    pub fq_name: Name,
    pub visibility: Visibility,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParamId>,
    /// Right-hand side as written.
    pub underlying: Type,
    /// Right-hand side with all aliases expanded.
    pub expanded: Type,
}

impl TypeAliasDecl {
    /// A public alias without type parameters.
    pub fn new(name: Name, fq_name: Name, underlying: Type, expanded: Type) -> Self {
        TypeAliasDecl {
            name,
            fq_name,
            visibility: Visibility::Public,
            annotations: Vec::new(),
            type_params: Vec::new(),
            underlying,
            expanded,
        }
    }
}
