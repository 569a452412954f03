//! Resolved declaration tree for the metadata encoder.
//!
//! This crate holds the read-only program model that `meta_serialize`
//! encodes:
//! - `Name` and `StringInterner` for identifiers and qualified names
//! - Arena ids (`ClassId`, `MemberId`, `TypeParamId`, `TypeAliasId`)
//! - Declarations (classes, members, type parameters, type aliases)
//! - Resolved types and annotation applications
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings become `Name(u32)`
//! - **Flatten Everything**: declarations refer to each other by id, never by
//!   pointer, so the whole tree can be shared across threads by `&`
//! - **Closed Variants**: every kind of declaration or type is an enum variant
//!   matched exhaustively by the encoder

mod annotation;
mod decl;
mod ids;
mod interner;
mod name;
mod tree;
mod ty;
pub mod well_known;

pub use annotation::{Annotation, ConstValue};
pub use decl::{
    ClassDecl, ClassKind, ClassModifiers, FunctionModifiers, MemberDecl, MemberKind,
    MemberOrigin, Modality, ParamModifiers, PropertyModifiers, TypeAliasDecl, TypeParamDecl,
    ValueParam, Variance, Visibility,
};
pub use ids::{ClassId, DeclRef, Declaration, MemberId, TypeAliasId, TypeParamId};
pub use interner::{InternError, StringInterner, StringLookup};
pub use name::Name;
pub use tree::DeclarationTree;
pub use ty::{Classifier, Type, TypeArg, TypeKind};
