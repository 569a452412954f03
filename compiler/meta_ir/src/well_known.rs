//! Qualified names the encoder treats specially.

/// The universal supertype. Has no supertypes.
pub const ANY: &str = "core/Any";

/// The bottom type. Has no supertypes.
pub const NOTHING: &str = "core/Nothing";

/// Continuation parameter appended to rewritten suspend function types.
pub const CONTINUATION: &str = "core/coroutines/Continuation";

/// Annotation declaring a minimum version required to use a declaration.
pub const REQUIRES_VERSION: &str = "core/RequiresVersion";

/// Arguments of [`REQUIRES_VERSION`].
pub mod requires_version {
    pub const VERSION: &str = "version";
    pub const MESSAGE: &str = "message";
    pub const LEVEL: &str = "level";
    pub const VERSION_KIND: &str = "versionKind";
    pub const ERROR_CODE: &str = "errorCode";
}

/// Qualified name of the function-type class of the given arity.
pub fn function_class(arity: usize) -> String {
    format!("core/Function{arity}")
}

/// Whether `fq_name` is one of the two roots of the class hierarchy.
pub fn is_hierarchy_root(fq_name: &str) -> bool {
    fq_name == ANY || fq_name == NOTHING
}
