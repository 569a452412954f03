//! Annotation applications with constant arguments.

use crate::Name;

/// Constant value of an annotation argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    String(Name),
    /// Enum entry reference, e.g. `DeprecationLevel.WARNING`.
    Enum { class: Name, entry: Name },
}

/// An annotation applied to a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Annotation {
    /// Qualified name of the annotation class.
    pub class: Name,
    /// Named arguments in source order.
    pub arguments: Vec<(Name, ConstValue)>,
}

impl Annotation {
    pub fn new(class: Name) -> Self {
        Annotation {
            class,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_argument(mut self, name: Name, value: ConstValue) -> Self {
        self.arguments.push((name, value));
        self
    }

    /// The value of the named argument, if supplied.
    pub fn argument(&self, name: Name) -> Option<&ConstValue> {
        self.arguments
            .iter()
            .find(|(arg, _)| *arg == name)
            .map(|(_, value)| value)
    }
}
