//! Authorization evaluator.
//!
//! - No IO
//! - No panics
//! - Fail-closed: a missing identity or a malformed identifier denies

use serde::Serialize;
use tracing::debug;

use crate::matrix::{permissions_for, roles_granting};
use crate::{Action, Permission, Resource, Role, ToPermission};

fn granted<P: ToPermission>(role: Role, permission: &P) -> bool {
    match permission.to_permission() {
        Ok(permission) => permissions_for(role).contains(&permission),
        Err(err) => {
            debug!(role = %role, error = %err, "denying malformed permission");
            false
        }
    }
}

/// Permissions of the given identity; empty when there is none.
pub fn effective_permissions(role: impl Into<Option<Role>>) -> &'static [Permission] {
    match role.into() {
        Some(role) => permissions_for(role),
        None => &[],
    }
}

/// `true` iff `permission` is in the role's matrix entry.
///
/// ```rust
/// use shopfloor_auth::{can, Role};
///
/// assert!(can(Role::Worker, "DASHBOARD.view"));
/// assert!(!can(Role::Worker, "MACHINES.view"));
/// assert!(!can(None, "DASHBOARD.view"));
/// ```
pub fn can<P: ToPermission>(role: impl Into<Option<Role>>, permission: P) -> bool {
    let Some(role) = role.into() else {
        debug!("no identity; permission denied");
        return false;
    };

    let allowed = granted(role, &permission);
    if !allowed {
        debug!(role = %role, "permission denied");
    }
    allowed
}

/// OR-composition: at least one of `permissions` is granted.
///
/// An empty list is `false`. Callers that treat "no permissions configured"
/// as "no requirement" must check for emptiness themselves.
pub fn can_any<I>(role: impl Into<Option<Role>>, permissions: I) -> bool
where
    I: IntoIterator,
    I::Item: ToPermission,
{
    let Some(role) = role.into() else {
        debug!("no identity; any-of check denied");
        return false;
    };

    let allowed = permissions.into_iter().any(|p| granted(role, &p));
    if !allowed {
        debug!(role = %role, "none of the required permissions granted");
    }
    allowed
}

/// AND-composition: every one of `permissions` is granted.
///
/// An empty list is `true` for any identity (nothing to fail), but still
/// `false` without one.
pub fn can_all<I>(role: impl Into<Option<Role>>, permissions: I) -> bool
where
    I: IntoIterator,
    I::Item: ToPermission,
{
    let Some(role) = role.into() else {
        debug!("no identity; all-of check denied");
        return false;
    };

    let allowed = permissions.into_iter().all(|p| granted(role, &p));
    if !allowed {
        debug!(role = %role, "not every required permission granted");
    }
    allowed
}

/// Actions the role holds on one resource, in matrix order.
///
/// Lets UI code decide which action buttons to offer without rebuilding
/// identifier strings at each call site.
pub fn permissions_for_resource(role: impl Into<Option<Role>>, resource: Resource) -> Vec<Action> {
    effective_permissions(role)
        .iter()
        .filter(|p| p.resource == resource)
        .map(|p| p.action)
        .collect()
}

/// Role membership check; an empty `roles` list is `false`.
pub fn has_any_role(role: impl Into<Option<Role>>, roles: &[Role]) -> bool {
    match role.into() {
        Some(role) => {
            let allowed = roles.contains(&role);
            if !allowed {
                debug!(role = %role, required = ?roles, "role denied");
            }
            allowed
        }
        None => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Why a single permission check came out the way it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationExplanation {
    /// The identifier exactly as it was asked about.
    pub required_permission: String,
    pub granted: bool,
    pub reason: String,
    pub role: Option<Role>,
    pub effective_permissions: Vec<Permission>,
    pub denial: Option<DenialReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    /// Roles whose matrix entry would grant the permission.
    pub granting_roles: Vec<Role>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoIdentity,
    MalformedPermission,
    MissingPermission,
}

/// Explain the outcome of `can(role, permission)`.
///
/// `granted` always agrees with [`can`].
pub fn explain(
    role: impl Into<Option<Role>>,
    permission: impl ToPermission + std::fmt::Display,
) -> AuthorizationExplanation {
    let role = role.into();
    let required_permission = permission.to_string();
    let effective_permissions = effective_permissions(role).to_vec();

    let denied = |kind, message: String, granting_roles: Vec<Role>, suggestions| {
        AuthorizationExplanation {
            required_permission: required_permission.clone(),
            granted: false,
            reason: message.clone(),
            role,
            effective_permissions: effective_permissions.clone(),
            denial: Some(DenialReason {
                kind,
                message,
                granting_roles,
                suggestions,
            }),
        }
    };

    let parsed = match permission.to_permission() {
        Ok(parsed) => parsed,
        Err(err) => {
            return denied(
                DenialKind::MalformedPermission,
                err.to_string(),
                Vec::new(),
                vec!["Use a RESOURCE.action identifier from the permission catalog".to_string()],
            );
        }
    };

    let granting_roles = roles_granting(parsed);

    let Some(role) = role else {
        return denied(
            DenialKind::NoIdentity,
            "No authenticated identity".to_string(),
            granting_roles,
            vec!["Sign in before requesting this resource".to_string()],
        );
    };

    if effective_permissions.contains(&parsed) {
        return AuthorizationExplanation {
            required_permission: required_permission.clone(),
            granted: true,
            reason: format!("Role {role} is granted '{parsed}'"),
            role: Some(role),
            effective_permissions: effective_permissions.clone(),
            denial: None,
        };
    }

    let mut suggestions = Vec::new();
    if granting_roles.is_empty() {
        suggestions.push(format!("No role is granted '{parsed}'; check the role matrix"));
    } else {
        let names: Vec<&str> = granting_roles.iter().map(|r| r.as_str()).collect();
        suggestions.push(format!("Roles granting '{parsed}': {}", names.join(", ")));
    }

    denied(
        DenialKind::MissingPermission,
        format!("Role {role} is not granted '{parsed}'"),
        granting_roles,
        suggestions,
    )
}
