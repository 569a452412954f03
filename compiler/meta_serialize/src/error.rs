//! Encoding errors.

use thiserror::Error;

/// A fatal encoding failure.
///
/// Malformed input that the encoder can skip (such as a bad version
/// annotation) is logged and dropped instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A class needed a version requirement but the session has no
    /// version-requirement table.
    #[error("cannot encode version requirements of `{class}`: no version requirement table")]
    MissingVersionRequirementTable { class: String },
}
