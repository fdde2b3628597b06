//! Authorization error taxonomy.
//!
//! These errors only surface from *parsing* APIs. The evaluator itself never
//! returns them: a malformed or unresolvable input is logged and denied.

use thiserror::Error;

pub type AuthzResult<T> = Result<T, AuthzError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The identifier is not of the shape `RESOURCE.action`.
    #[error("malformed permission '{0}' (expected RESOURCE.action)")]
    MalformedPermission(String),

    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// A role name that has no entry in the role catalogue.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}
