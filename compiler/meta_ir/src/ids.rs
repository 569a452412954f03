//! Arena indices for declarations in a [`DeclarationTree`](crate::DeclarationTree).
//!
//! IDs are allocated sequentially starting from 0 by the tree that owns the
//! declaration, and are only meaningful for that tree.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an ID from a raw index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` (for indexing into `Vec`s).
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// A class, interface, object, enum class or enum entry.
    ClassId
);
define_id!(
    /// A constructor, function or property.
    MemberId
);
define_id!(
    /// A type parameter of a class, member or type alias.
    TypeParamId
);
define_id!(
    /// A type alias declaration.
    TypeAliasId
);

/// A declaration that can own type parameters.
///
/// Used to decide whether a type-parameter reference is local to the
/// declaration being encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclRef {
    Class(ClassId),
    Member(MemberId),
    TypeAlias(TypeAliasId),
}

/// An entry in a class body, in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Declaration {
    /// Constructor, function or property.
    Member(MemberId),
    /// Nested class, object, enum entry or companion.
    Class(ClassId),
    /// Nested type alias.
    TypeAlias(TypeAliasId),
}
