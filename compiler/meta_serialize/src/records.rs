//! Logical record shapes produced by the encoder.
//!
//! Records reference strings, qualified names, types and version
//! requirements by dense `u32` ids into the session's tables. Optional fields
//! are `None` when they would hold the schema default, so structurally equal
//! declarations always yield structurally equal records.

use smallvec::SmallVec;

use crate::flags::{
    DEFAULT_CLASS_FLAGS, DEFAULT_CONSTRUCTOR_FLAGS, DEFAULT_FUNCTION_FLAGS,
    DEFAULT_PROPERTY_FLAGS, DEFAULT_TYPE_ALIAS_FLAGS, DEFAULT_VALUE_PARAMETER_FLAGS,
};
use crate::tags::{LevelTag, ProjectionTag, VarianceTag, VersionKindTag};

/// A type reference: inline record or id into the type table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeRef {
    Inline(Box<TypeRecord>),
    Id(u32),
}

impl TypeRef {
    /// The inline record, if this reference is not a table id.
    pub fn as_inline(&self) -> Option<&TypeRecord> {
        match self {
            TypeRef::Inline(record) => Some(record),
            TypeRef::Id(_) => None,
        }
    }
}

/// Opaque data attached by a [`SerializerExtension`](crate::SerializerExtension).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtensionEntry {
    pub field: u32,
    pub value: i64,
}

/// Head of a simple type: a class or a type alias, by qualified-name id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassifierId {
    Class(u32),
    TypeAlias(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ArgumentRecord {
    Star,
    Type {
        /// `None` when invariant.
        projection: Option<ProjectionTag>,
        ty: TypeRef,
    },
}

/// One level of an `Outer<A>.Inner<B>` chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifierLevel {
    pub classifier: ClassifierId,
    pub arguments: Vec<ArgumentRecord>,
}

/// How a type-parameter reference names its parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeParameterRef {
    /// Parameter of the declaration being encoded, by name string id.
    Name(u32),
    /// Parameter of an enclosing declaration, by interned type-parameter id.
    Id(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeRecordKind {
    /// Classifier application, innermost level first.
    Simple {
        chain: SmallVec<[ClassifierLevel; 1]>,
    },
    Parameter(TypeParameterRef),
    Error {
        class_name: Option<u32>,
        message: Option<u32>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRecord {
    pub kind: TypeRecordKind,
    /// [`TypeFlags`](crate::TypeFlags) bits; `None` when empty.
    pub flags: Option<u32>,
    pub nullable: bool,
    pub flexible_upper_bound: Option<TypeRef>,
    pub abbreviation: Option<TypeRef>,
    pub extensions: Vec<ExtensionEntry>,
}

impl TypeRecord {
    pub fn new(kind: TypeRecordKind) -> Self {
        TypeRecord {
            kind,
            flags: None,
            nullable: false,
            flexible_upper_bound: None,
            abbreviation: None,
            extensions: Vec::new(),
        }
    }

    /// The innermost classifier of a simple type.
    pub fn classifier(&self) -> Option<ClassifierId> {
        match &self.kind {
            TypeRecordKind::Simple { chain } => chain.first().map(|level| level.classifier),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeParameterRecord {
    pub id: u32,
    pub name: u32,
    pub reified: bool,
    /// `None` when invariant.
    pub variance: Option<VarianceTag>,
    pub upper_bounds: Vec<TypeRef>,
    pub extensions: Vec<ExtensionEntry>,
}

/// A version packed into one word; see [`Version::encode`](crate::Version::encode).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum PackedVersion {
    Compact(u32),
    Full(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VersionRequirementRecord {
    pub version: PackedVersion,
    /// `None` when `Error`.
    pub level: Option<LevelTag>,
    /// `None` when `LanguageVersion`.
    pub version_kind: Option<VersionKindTag>,
    pub message: Option<u32>,
    pub error_code: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeTableRecord {
    pub types: Vec<TypeRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VersionRequirementTableRecord {
    pub requirements: Vec<VersionRequirementRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueParameterRecord {
    pub flags: Option<u32>,
    pub name: u32,
    pub ty: Option<TypeRef>,
    pub vararg_element: Option<TypeRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorRecord {
    pub flags: Option<u32>,
    pub value_parameters: Vec<ValueParameterRecord>,
    pub version_requirements: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionRecord {
    pub flags: Option<u32>,
    pub name: u32,
    pub type_parameters: Vec<TypeParameterRecord>,
    pub receiver: Option<TypeRef>,
    pub value_parameters: Vec<ValueParameterRecord>,
    pub return_type: Option<TypeRef>,
    pub version_requirements: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyRecord {
    pub flags: Option<u32>,
    pub name: u32,
    pub type_parameters: Vec<TypeParameterRecord>,
    pub receiver: Option<TypeRef>,
    pub return_type: Option<TypeRef>,
    pub version_requirements: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeAliasRecord {
    pub flags: Option<u32>,
    pub name: u32,
    pub type_parameters: Vec<TypeParameterRecord>,
    pub underlying: Option<TypeRef>,
    pub expanded: Option<TypeRef>,
    pub version_requirements: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumEntryRecord {
    pub name: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassRecord {
    pub flags: Option<u32>,
    pub fq_name: u32,
    pub type_parameters: Vec<TypeParameterRecord>,
    pub supertypes: Vec<TypeRef>,
    pub constructors: Vec<ConstructorRecord>,
    pub functions: Vec<FunctionRecord>,
    pub properties: Vec<PropertyRecord>,
    pub type_aliases: Vec<TypeAliasRecord>,
    pub enum_entries: Vec<EnumEntryRecord>,
    pub nested_class_names: Vec<u32>,
    pub sealed_subclass_fq_names: Vec<u32>,
    pub companion_object_name: Option<u32>,
    pub type_table: Option<TypeTableRecord>,
    pub version_requirements: Vec<u32>,
    pub version_requirement_table: Option<VersionRequirementTableRecord>,
    pub extensions: Vec<ExtensionEntry>,
}

macro_rules! effective_flags {
    ($($record:ident => $default:ident),* $(,)?) => {
        $(
            impl $record {
                /// The flag word with the omitted default filled back in.
                pub fn effective_flags(&self) -> u32 {
                    self.flags.unwrap_or($default)
                }
            }
        )*
    };
}

effective_flags! {
    ClassRecord => DEFAULT_CLASS_FLAGS,
    ConstructorRecord => DEFAULT_CONSTRUCTOR_FLAGS,
    FunctionRecord => DEFAULT_FUNCTION_FLAGS,
    PropertyRecord => DEFAULT_PROPERTY_FLAGS,
    TypeAliasRecord => DEFAULT_TYPE_ALIAS_FLAGS,
    ValueParameterRecord => DEFAULT_VALUE_PARAMETER_FLAGS,
}

#[cfg(feature = "cache")]
impl ClassRecord {
    /// Serialize with `bincode`. Equal records give equal bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
