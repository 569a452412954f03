//! Packing of declaration modifiers into flag words.
//!
//! Each record kind has one `u32` flag word laid out as a sequence of fields.
//! Single-bit fields hold booleans; multi-bit fields hold the wire tags from
//! [`crate::tags`]. Records store `None` instead of a flag word equal to
//! the record kind's default, so the common case costs nothing.
//!
//! # Layouts
//!
//! | bits | class | function | property | constructor | type alias |
//! |------|-------|----------|----------|-------------|------------|
//! | 0    | annotations | annotations | annotations | annotations | annotations |
//! | 1-3  | visibility | visibility | visibility | visibility | visibility |
//! | 4-5  | modality | modality | modality | secondary (bit 4) | |
//! | 6-8  | kind | member kind (6-7) | member kind (6-7) | | |
//! | 9-   | inner, data, external, expect, inline, fun | operator, infix, inline, tailrec, external, suspend, expect (8-) | var, getter, setter, const, lateinit, external, delegated, expect (8-) | | |

use bitflags::bitflags;
use meta_ir::{ClassModifiers, FunctionModifiers, ParamModifiers, PropertyModifiers};

use crate::tags::{ClassKindTag, MemberKindTag, ModalityTag, VisibilityTag};

/// A bit range inside a flag word.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FlagField {
    offset: u32,
    bits: u32,
}

impl FlagField {
    const fn first(bits: u32) -> Self {
        FlagField { offset: 0, bits }
    }

    const fn after(previous: FlagField, bits: u32) -> Self {
        FlagField {
            offset: previous.offset + previous.bits,
            bits,
        }
    }

    const fn mask(self) -> u32 {
        ((1 << self.bits) - 1) << self.offset
    }

    /// Place `value` in this field. Values wider than the field are
    /// truncated to it.
    const fn put(self, value: u32) -> u32 {
        (value << self.offset) & self.mask()
    }

    const fn bool(self, value: bool) -> u32 {
        self.put(value as u32)
    }

    const fn get(self, flags: u32) -> u32 {
        (flags & self.mask()) >> self.offset
    }
}

// Shared prefix.
const HAS_ANNOTATIONS: FlagField = FlagField::first(1);
const VISIBILITY: FlagField = FlagField::after(HAS_ANNOTATIONS, 3);
const MODALITY: FlagField = FlagField::after(VISIBILITY, 2);

// Class.
const CLASS_KIND: FlagField = FlagField::after(MODALITY, 3);
const IS_INNER: FlagField = FlagField::after(CLASS_KIND, 1);
const IS_DATA: FlagField = FlagField::after(IS_INNER, 1);
const IS_EXTERNAL_CLASS: FlagField = FlagField::after(IS_DATA, 1);
const IS_EXPECT_CLASS: FlagField = FlagField::after(IS_EXTERNAL_CLASS, 1);
const IS_INLINE_CLASS: FlagField = FlagField::after(IS_EXPECT_CLASS, 1);
const IS_FUN_INTERFACE: FlagField = FlagField::after(IS_INLINE_CLASS, 1);

// Callables.
const MEMBER_KIND: FlagField = FlagField::after(MODALITY, 2);

const IS_OPERATOR: FlagField = FlagField::after(MEMBER_KIND, 1);
const IS_INFIX: FlagField = FlagField::after(IS_OPERATOR, 1);
const IS_INLINE: FlagField = FlagField::after(IS_INFIX, 1);
const IS_TAILREC: FlagField = FlagField::after(IS_INLINE, 1);
const IS_EXTERNAL_FUNCTION: FlagField = FlagField::after(IS_TAILREC, 1);
const IS_SUSPEND: FlagField = FlagField::after(IS_EXTERNAL_FUNCTION, 1);
const IS_EXPECT_FUNCTION: FlagField = FlagField::after(IS_SUSPEND, 1);

const IS_VAR: FlagField = FlagField::after(MEMBER_KIND, 1);
const HAS_GETTER: FlagField = FlagField::after(IS_VAR, 1);
const HAS_SETTER: FlagField = FlagField::after(HAS_GETTER, 1);
const IS_CONST: FlagField = FlagField::after(HAS_SETTER, 1);
const IS_LATEINIT: FlagField = FlagField::after(IS_CONST, 1);
const IS_EXTERNAL_PROPERTY: FlagField = FlagField::after(IS_LATEINIT, 1);
const IS_DELEGATED: FlagField = FlagField::after(IS_EXTERNAL_PROPERTY, 1);
const IS_EXPECT_PROPERTY: FlagField = FlagField::after(IS_DELEGATED, 1);

// Constructor.
const IS_SECONDARY: FlagField = FlagField::after(VISIBILITY, 1);

// Value parameter.
const DECLARES_DEFAULT_VALUE: FlagField = FlagField::after(HAS_ANNOTATIONS, 1);
const IS_CROSSINLINE: FlagField = FlagField::after(DECLARES_DEFAULT_VALUE, 1);
const IS_NOINLINE: FlagField = FlagField::after(IS_CROSSINLINE, 1);

/// Public final class, no annotations.
pub const DEFAULT_CLASS_FLAGS: u32 = VISIBILITY.put(VisibilityTag::Public.raw());
/// Public final declared function, no annotations.
pub const DEFAULT_FUNCTION_FLAGS: u32 = VISIBILITY.put(VisibilityTag::Public.raw());
/// Public final declared `val` with a default getter.
pub const DEFAULT_PROPERTY_FLAGS: u32 =
    VISIBILITY.put(VisibilityTag::Public.raw()) | HAS_GETTER.bool(true);
/// Public primary constructor.
pub const DEFAULT_CONSTRUCTOR_FLAGS: u32 = VISIBILITY.put(VisibilityTag::Public.raw());
/// Public alias, no annotations.
pub const DEFAULT_TYPE_ALIAS_FLAGS: u32 = VISIBILITY.put(VisibilityTag::Public.raw());
/// Plain parameter.
pub const DEFAULT_VALUE_PARAMETER_FLAGS: u32 = 0;

bitflags! {
    /// Flags of a type record. Empty by default.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        /// The record is the ordinary function-type form of a suspend
        /// function type.
        const SUSPEND = 1 << 0;
    }
}

/// `None` when `flags` equals `default`.
#[inline]
pub fn non_default(flags: u32, default: u32) -> Option<u32> {
    (flags != default).then_some(flags)
}

pub fn class_flags(
    has_annotations: bool,
    visibility: VisibilityTag,
    modality: ModalityTag,
    kind: ClassKindTag,
    modifiers: ClassModifiers,
) -> u32 {
    HAS_ANNOTATIONS.bool(has_annotations)
        | VISIBILITY.put(visibility.raw())
        | MODALITY.put(modality.raw())
        | CLASS_KIND.put(kind.raw())
        | IS_INNER.bool(modifiers.contains(ClassModifiers::INNER))
        | IS_DATA.bool(modifiers.contains(ClassModifiers::DATA))
        | IS_EXTERNAL_CLASS.bool(modifiers.contains(ClassModifiers::EXTERNAL))
        | IS_EXPECT_CLASS.bool(modifiers.contains(ClassModifiers::EXPECT))
        | IS_INLINE_CLASS.bool(modifiers.contains(ClassModifiers::INLINE))
        | IS_FUN_INTERFACE.bool(modifiers.contains(ClassModifiers::FUN))
}

pub fn function_flags(
    has_annotations: bool,
    visibility: VisibilityTag,
    modality: ModalityTag,
    member_kind: MemberKindTag,
    modifiers: FunctionModifiers,
) -> u32 {
    HAS_ANNOTATIONS.bool(has_annotations)
        | VISIBILITY.put(visibility.raw())
        | MODALITY.put(modality.raw())
        | MEMBER_KIND.put(member_kind.raw())
        | IS_OPERATOR.bool(modifiers.contains(FunctionModifiers::OPERATOR))
        | IS_INFIX.bool(modifiers.contains(FunctionModifiers::INFIX))
        | IS_INLINE.bool(modifiers.contains(FunctionModifiers::INLINE))
        | IS_TAILREC.bool(modifiers.contains(FunctionModifiers::TAILREC))
        | IS_EXTERNAL_FUNCTION.bool(modifiers.contains(FunctionModifiers::EXTERNAL))
        | IS_SUSPEND.bool(modifiers.contains(FunctionModifiers::SUSPEND))
        | IS_EXPECT_FUNCTION.bool(modifiers.contains(FunctionModifiers::EXPECT))
}

pub fn property_flags(
    has_annotations: bool,
    visibility: VisibilityTag,
    modality: ModalityTag,
    member_kind: MemberKindTag,
    modifiers: PropertyModifiers,
) -> u32 {
    HAS_ANNOTATIONS.bool(has_annotations)
        | VISIBILITY.put(visibility.raw())
        | MODALITY.put(modality.raw())
        | MEMBER_KIND.put(member_kind.raw())
        | IS_VAR.bool(modifiers.contains(PropertyModifiers::VAR))
        | HAS_GETTER.bool(modifiers.contains(PropertyModifiers::HAS_GETTER))
        | HAS_SETTER.bool(modifiers.contains(PropertyModifiers::HAS_SETTER))
        | IS_CONST.bool(modifiers.contains(PropertyModifiers::CONST))
        | IS_LATEINIT.bool(modifiers.contains(PropertyModifiers::LATEINIT))
        | IS_EXTERNAL_PROPERTY.bool(modifiers.contains(PropertyModifiers::EXTERNAL))
        | IS_DELEGATED.bool(modifiers.contains(PropertyModifiers::DELEGATED))
        | IS_EXPECT_PROPERTY.bool(modifiers.contains(PropertyModifiers::EXPECT))
}

pub fn constructor_flags(has_annotations: bool, visibility: VisibilityTag, secondary: bool) -> u32 {
    HAS_ANNOTATIONS.bool(has_annotations)
        | VISIBILITY.put(visibility.raw())
        | IS_SECONDARY.bool(secondary)
}

pub fn type_alias_flags(has_annotations: bool, visibility: VisibilityTag) -> u32 {
    HAS_ANNOTATIONS.bool(has_annotations) | VISIBILITY.put(visibility.raw())
}

pub fn value_parameter_flags(has_annotations: bool, modifiers: ParamModifiers) -> u32 {
    HAS_ANNOTATIONS.bool(has_annotations)
        | DECLARES_DEFAULT_VALUE.bool(modifiers.contains(ParamModifiers::DECLARES_DEFAULT))
        | IS_CROSSINLINE.bool(modifiers.contains(ParamModifiers::CROSSINLINE))
        | IS_NOINLINE.bool(modifiers.contains(ParamModifiers::NOINLINE))
}

/// Read accessors for class flag words, for readers and tests.
pub mod class {
    use super::{CLASS_KIND, HAS_ANNOTATIONS, IS_INLINE_CLASS, IS_INNER, MODALITY, VISIBILITY};

    pub fn has_annotations(flags: u32) -> bool {
        HAS_ANNOTATIONS.get(flags) != 0
    }

    pub fn visibility(flags: u32) -> u32 {
        VISIBILITY.get(flags)
    }

    pub fn modality(flags: u32) -> u32 {
        MODALITY.get(flags)
    }

    pub fn kind(flags: u32) -> u32 {
        CLASS_KIND.get(flags)
    }

    pub fn is_inner(flags: u32) -> bool {
        IS_INNER.get(flags) != 0
    }

    pub fn is_inline(flags: u32) -> bool {
        IS_INLINE_CLASS.get(flags) != 0
    }
}
