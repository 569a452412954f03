//! Resolved types as produced by the type checker.
//!
//! Types are small trees: the encoder walks them recursively. Every variant
//! is already resolved; there are no inference variables left.

use crate::{ClassId, Name, TypeAliasId, TypeParamId, Variance};

/// Head of a classifier type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classifier {
    /// A class declared in this tree.
    Class(ClassId),
    /// A type alias declared in this tree.
    Alias(TypeAliasId),
    /// A top-level class declared outside this tree, by qualified name.
    External(Name),
}

/// A type argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArg {
    /// `*` projection.
    Star,
    /// A type with an optional use-site projection.
    Projected { variance: Variance, ty: Type },
}

impl TypeArg {
    /// An invariant argument.
    pub fn invariant(ty: Type) -> Self {
        TypeArg::Projected {
            variance: Variance::Invariant,
            ty,
        }
    }
}

/// Shape of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A class or type-alias application.
    ///
    /// For an inner class the arguments are flattened innermost first: the
    /// inner class's own arguments followed by the outer class's.
    Classifier {
        classifier: Classifier,
        arguments: Vec<TypeArg>,
    },
    /// Reference to a type parameter. Type parameters never take arguments.
    Parameter(TypeParamId),
    /// Platform type with distinct lower and upper bounds.
    Flexible { lower: Box<Type>, upper: Box<Type> },
    /// `suspend (P1, ..., Pn) -> R`, optionally with a receiver.
    SuspendFunction {
        receiver: Option<Box<Type>>,
        parameters: Vec<Type>,
        return_type: Box<Type>,
    },
    /// Unresolved type; the resolver already reported it.
    Error { message: Name },
}

/// A resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    pub kind: TypeKind,
    /// Marked nullable (`T?`).
    pub nullable: bool,
    /// The alias application this type was written as, if any. `kind` is
    /// always the expanded form.
    pub abbreviation: Option<Box<Type>>,
}

impl Type {
    fn from_kind(kind: TypeKind) -> Self {
        Type {
            kind,
            nullable: false,
            abbreviation: None,
        }
    }

    /// A class type declared in this tree.
    pub fn class(class: ClassId, arguments: Vec<TypeArg>) -> Self {
        Self::from_kind(TypeKind::Classifier {
            classifier: Classifier::Class(class),
            arguments,
        })
    }

    /// A class type declared outside this tree.
    pub fn external(fq_name: Name, arguments: Vec<TypeArg>) -> Self {
        Self::from_kind(TypeKind::Classifier {
            classifier: Classifier::External(fq_name),
            arguments,
        })
    }

    /// A type-alias application, unexpanded.
    pub fn alias(alias: TypeAliasId, arguments: Vec<TypeArg>) -> Self {
        Self::from_kind(TypeKind::Classifier {
            classifier: Classifier::Alias(alias),
            arguments,
        })
    }

    pub fn parameter(param: TypeParamId) -> Self {
        Self::from_kind(TypeKind::Parameter(param))
    }

    pub fn flexible(lower: Type, upper: Type) -> Self {
        Self::from_kind(TypeKind::Flexible {
            lower: Box::new(lower),
            upper: Box::new(upper),
        })
    }

    pub fn suspend_function(
        receiver: Option<Type>,
        parameters: Vec<Type>,
        return_type: Type,
    ) -> Self {
        Self::from_kind(TypeKind::SuspendFunction {
            receiver: receiver.map(Box::new),
            parameters,
            return_type: Box::new(return_type),
        })
    }

    pub fn error(message: Name) -> Self {
        Self::from_kind(TypeKind::Error { message })
    }

    /// Mark this type nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Attach the alias application this type was written as.
    #[must_use]
    pub fn with_abbreviation(mut self, abbreviation: Type) -> Self {
        self.abbreviation = Some(Box::new(abbreviation));
        self
    }

    /// The type arguments of a classifier type; empty for other shapes.
    pub fn arguments(&self) -> &[TypeArg] {
        match &self.kind {
            TypeKind::Classifier { arguments, .. } => arguments,
            _ => &[],
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TypeKind::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_default_to_non_null() {
        let ty = Type::parameter(TypeParamId::new(0));
        assert!(!ty.nullable);
        assert!(ty.abbreviation.is_none());
        assert!(ty.nullable().nullable);
    }

    #[test]
    fn arguments_only_for_classifiers() {
        let arg = Type::parameter(TypeParamId::new(0));
        let list = Type::class(ClassId::new(3), vec![TypeArg::invariant(arg.clone())]);
        assert_eq!(list.arguments().len(), 1);
        assert!(arg.arguments().is_empty());
        assert!(Type::error(Name::EMPTY).is_error());
    }
}
