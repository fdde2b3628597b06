//! Permission identifiers: `(Resource, Action)` pairs written `RESOURCE.action`.

use serde::{Deserialize, Serialize};

use crate::error::{AuthzError, AuthzResult};
use crate::{Action, Resource};

/// Separator between the resource and action halves of an identifier.
pub const SEPARATOR: char = '.';

/// Atomic unit of authorization.
///
/// Permissions are matched exactly; there is no wildcard resource or action.
///
/// ```rust
/// use shopfloor_auth::{Action, Permission, Resource};
///
/// let perm = Permission::parse("ORDERS.create").unwrap();
/// assert_eq!(perm, Permission::new(Resource::Orders, Action::Create));
/// assert_eq!(perm.to_string(), "ORDERS.create");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    /// Parse a `RESOURCE.action` identifier.
    ///
    /// # Errors
    /// [`AuthzError::MalformedPermission`] unless the string holds exactly one
    /// separator with a known resource on the left and a known action on the
    /// right.
    pub fn parse(value: &str) -> AuthzResult<Self> {
        let malformed = || AuthzError::MalformedPermission(value.to_string());

        let (resource, action) = value.split_once(SEPARATOR).ok_or_else(malformed)?;
        if action.contains(SEPARATOR) {
            return Err(malformed());
        }

        let resource = resource.parse::<Resource>().map_err(|_| malformed())?;
        let action = action.parse::<Action>().map_err(|_| malformed())?;
        Ok(Self::new(resource, action))
    }

    pub fn as_string(&self) -> String {
        format!("{}{}{}", self.resource.as_str(), SEPARATOR, self.action.as_str())
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.resource, SEPARATOR, self.action)
    }
}

impl std::str::FromStr for Permission {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Permission {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.as_string()
    }
}

/// Anything an authorization check can be asked about.
///
/// Implemented for typed [`Permission`]s and for raw identifier strings, so
/// route declarations can be checked without pre-parsing. Raw strings that do
/// not parse are denied by the evaluator.
pub trait ToPermission {
    fn to_permission(&self) -> AuthzResult<Permission>;
}

impl ToPermission for Permission {
    fn to_permission(&self) -> AuthzResult<Permission> {
        Ok(*self)
    }
}

impl ToPermission for str {
    fn to_permission(&self) -> AuthzResult<Permission> {
        Permission::parse(self)
    }
}

impl ToPermission for String {
    fn to_permission(&self) -> AuthzResult<Permission> {
        Permission::parse(self)
    }
}

impl<T: ToPermission + ?Sized> ToPermission for &T {
    fn to_permission(&self) -> AuthzResult<Permission> {
        (**self).to_permission()
    }
}
