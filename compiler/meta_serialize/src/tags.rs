//! Wire tags for the enums the encoder writes.
//!
//! Each tag is a small integer with a fixed value; reorderings would change
//! the encoded output, so values are spelled out explicitly. Mapping from the
//! declaration model is total: values without a wire tag fall back to the
//! nearest safe tag instead of failing.

use meta_ir::{ClassKind, MemberOrigin, Modality, Variance, Visibility};

/// Declaration visibility (3 bits in flag words).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum VisibilityTag {
    Internal = 0,
    Private = 1,
    Protected = 2,
    Public = 3,
    PrivateToThis = 4,
    Local = 5,
}

impl VisibilityTag {
    /// Map a declared visibility, optionally normalizing source-only levels.
    ///
    /// Normalized: `PrivateToThis` becomes `Private` and both package levels
    /// become `Protected`. Unnormalized: `PrivateToThis` keeps its own tag and
    /// the package levels, which have no tag, become `Private`.
    pub const fn from_visibility(visibility: Visibility, normalize: bool) -> Self {
        match visibility {
            Visibility::Internal => Self::Internal,
            Visibility::Private => Self::Private,
            Visibility::Protected => Self::Protected,
            Visibility::Public => Self::Public,
            Visibility::Local => Self::Local,
            Visibility::PrivateToThis if normalize => Self::Private,
            Visibility::PrivateToThis => Self::PrivateToThis,
            Visibility::PackagePrivate | Visibility::ProtectedAndPackage if normalize => {
                Self::Protected
            }
            Visibility::PackagePrivate | Visibility::ProtectedAndPackage => Self::Private,
        }
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

/// Inheritance modality (2 bits in flag words).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ModalityTag {
    Final = 0,
    Open = 1,
    Abstract = 2,
    Sealed = 3,
}

impl ModalityTag {
    pub const fn from_modality(modality: Modality) -> Self {
        match modality {
            Modality::Final => Self::Final,
            Modality::Open => Self::Open,
            Modality::Abstract => Self::Abstract,
            Modality::Sealed => Self::Sealed,
        }
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

/// Classifier kind (3 bits in class flags).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ClassKindTag {
    Class = 0,
    Interface = 1,
    EnumClass = 2,
    EnumEntry = 3,
    AnnotationClass = 4,
    Object = 5,
    CompanionObject = 6,
}

impl ClassKindTag {
    /// Map a class kind; companion objects get their own tag.
    pub const fn from_kind(kind: ClassKind, is_companion: bool) -> Self {
        match kind {
            ClassKind::Class => Self::Class,
            ClassKind::Interface => Self::Interface,
            ClassKind::EnumClass => Self::EnumClass,
            ClassKind::EnumEntry => Self::EnumEntry,
            ClassKind::AnnotationClass => Self::AnnotationClass,
            ClassKind::Object if is_companion => Self::CompanionObject,
            ClassKind::Object => Self::Object,
        }
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

/// Member origin (2 bits in function and property flags).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum MemberKindTag {
    Declaration = 0,
    FakeOverride = 1,
    Delegation = 2,
    Synthesized = 3,
}

impl MemberKindTag {
    pub const fn from_origin(origin: MemberOrigin) -> Self {
        match origin {
            MemberOrigin::Declaration => Self::Declaration,
            MemberOrigin::FakeOverride => Self::FakeOverride,
            MemberOrigin::Delegation => Self::Delegation,
            MemberOrigin::Synthesized => Self::Synthesized,
        }
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

/// Declaration-site variance of a type parameter. Default: `Inv`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VarianceTag {
    In = 0,
    Out = 1,
    Inv = 2,
}

impl VarianceTag {
    pub const DEFAULT: Self = Self::Inv;

    pub const fn from_variance(variance: Variance) -> Self {
        match variance {
            Variance::In => Self::In,
            Variance::Out => Self::Out,
            Variance::Invariant => Self::Inv,
        }
    }

    /// `None` for the default tag, so records stay sparse.
    pub fn non_default(self) -> Option<Self> {
        (self != Self::DEFAULT).then_some(self)
    }
}

/// Use-site projection of a type argument. Default: `Inv`.
///
/// Star projections have no tag; they are written as
/// [`ArgumentRecord::Star`](crate::ArgumentRecord::Star).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ProjectionTag {
    In = 0,
    Out = 1,
    Inv = 2,
}

impl ProjectionTag {
    pub const DEFAULT: Self = Self::Inv;

    pub const fn from_variance(variance: Variance) -> Self {
        match variance {
            Variance::In => Self::In,
            Variance::Out => Self::Out,
            Variance::Invariant => Self::Inv,
        }
    }

    /// `None` for the default tag, so records stay sparse.
    pub fn non_default(self) -> Option<Self> {
        (self != Self::DEFAULT).then_some(self)
    }
}

/// Severity of a version requirement. Default: `Error`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LevelTag {
    Warning = 0,
    Error = 1,
    Hidden = 2,
}

impl LevelTag {
    pub const DEFAULT: Self = Self::Error;

    /// Map an enum entry name. Unknown names fall back to the default so
    /// that newer annotation values stay readable.
    pub fn from_entry_name(entry: &str) -> Self {
        match entry {
            "WARNING" => Self::Warning,
            "HIDDEN" => Self::Hidden,
            _ => Self::DEFAULT,
        }
    }

    pub fn non_default(self) -> Option<Self> {
        (self != Self::DEFAULT).then_some(self)
    }
}

/// What kind of version a requirement refers to. Default: `LanguageVersion`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VersionKindTag {
    LanguageVersion = 0,
    CompilerVersion = 1,
    ApiVersion = 2,
}

impl VersionKindTag {
    pub const DEFAULT: Self = Self::LanguageVersion;

    /// Map an enum entry name. Unknown names fall back to the default.
    pub fn from_entry_name(entry: &str) -> Self {
        match entry {
            "COMPILER_VERSION" => Self::CompilerVersion,
            "API_VERSION" => Self::ApiVersion,
            _ => Self::DEFAULT,
        }
    }

    pub fn non_default(self) -> Option<Self> {
        (self != Self::DEFAULT).then_some(self)
    }
}
