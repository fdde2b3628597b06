//! Guard primitives: authorization checks turned into render decisions.
//!
//! Guards never navigate or render. They return a decision for the
//! presentation layer and read nothing but the [`Session`] they are given, so
//! a decision is recomputed from scratch on every call.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use shopfloor_auth::{Role, Session};

use crate::config::GuardConfig;
use crate::route::RouteNode;

/// How a list of required permissions is combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementMode {
    /// Any one permission suffices.
    #[default]
    Any,
    /// Every permission is needed.
    All,
}

fn permissions_pass(session: &Session, permissions: &[String], mode: RequirementMode) -> bool {
    match mode {
        RequirementMode::Any => session.can_any(permissions),
        RequirementMode::All => session.can_all(permissions),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Guard
// ─────────────────────────────────────────────────────────────────────────────

/// Where a [`PathGuard`] evaluation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Unauthenticated,
    RoleDenied,
    PermissionDenied,
    Authorized,
}

/// What the presentation layer should do for a guarded location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathDecision<'a, F> {
    /// Send to the login page, then back to `return_to` afterwards.
    RedirectToLogin { to: &'a str, return_to: String },
    RedirectToUnauthorized { to: &'a str },
    RenderFallback(&'a F),
    RenderChildren,
}

/// Guard for a navigable destination.
///
/// Authentication is always checked first, then roles, then permissions.
///
/// ```rust
/// use shopfloor_auth::Session;
/// use shopfloor_navigation::{GuardConfig, PathDecision, PathGuard};
///
/// let guard = PathGuard::new().permissions(["ORDERS.view"]);
/// let config = GuardConfig::default();
///
/// let decision = guard.decide(&Session::anonymous(), &config, "/orders");
/// assert_eq!(
///     decision,
///     PathDecision::RedirectToLogin { to: "/login", return_to: "/orders".to_string() }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGuard<F = ()> {
    required_roles: Vec<Role>,
    required_permissions: Vec<String>,
    mode: RequirementMode,
    fallback: Option<F>,
}

impl PathGuard {
    /// A guard that only requires authentication.
    pub fn new() -> Self {
        Self {
            required_roles: Vec::new(),
            required_permissions: Vec::new(),
            mode: RequirementMode::Any,
            fallback: None,
        }
    }

    /// A guard built from a route node's own requirement (any-of semantics,
    /// matching navigation filtering).
    pub fn for_route(node: &RouteNode) -> Self {
        Self::new()
            .roles(node.roles.iter().copied())
            .permissions(node.permissions.iter().cloned())
    }
}

impl Default for PathGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> PathGuard<F> {
    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.required_roles.extend(roles);
        self
    }

    pub fn permissions<S: Into<String>>(mut self, permissions: impl IntoIterator<Item = S>) -> Self {
        self.required_permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn mode(mut self, mode: RequirementMode) -> Self {
        self.mode = mode;
        self
    }

    /// Render `fallback` instead of redirecting when access is denied.
    pub fn with_fallback<G>(self, fallback: G) -> PathGuard<G> {
        PathGuard {
            required_roles: self.required_roles,
            required_permissions: self.required_permissions,
            mode: self.mode,
            fallback: Some(fallback),
        }
    }

    pub fn evaluate(&self, session: &Session) -> GuardState {
        if !session.is_authenticated {
            return GuardState::Unauthenticated;
        }
        if !self.required_roles.is_empty() && !session.has_any_role(&self.required_roles) {
            return GuardState::RoleDenied;
        }
        if !self.required_permissions.is_empty()
            && !permissions_pass(session, &self.required_permissions, self.mode)
        {
            return GuardState::PermissionDenied;
        }
        GuardState::Authorized
    }

    /// Decide what to do for `location`, the originally requested path.
    pub fn decide<'a>(
        &'a self,
        session: &Session,
        config: &'a GuardConfig,
        location: &str,
    ) -> PathDecision<'a, F> {
        let span = debug_span!("path_guard", location, user_id = ?session.user_id);
        let _entered = span.enter();

        let state = self.evaluate(session);
        debug!(?state, role = ?session.effective_role(), "path guard evaluated");

        match state {
            GuardState::Authorized => PathDecision::RenderChildren,
            GuardState::Unauthenticated => PathDecision::RedirectToLogin {
                to: &config.login_path,
                return_to: location.to_string(),
            },
            GuardState::RoleDenied | GuardState::PermissionDenied => match &self.fallback {
                Some(fallback) => PathDecision::RenderFallback(fallback),
                None => PathDecision::RedirectToUnauthorized {
                    to: &config.unauthorized_path,
                },
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline gates
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of an inline gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision<'a, F> {
    RenderChildren,
    /// `None` means render nothing.
    RenderFallback(Option<&'a F>),
}

impl<F> GateDecision<'_, F> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::RenderChildren)
    }
}

fn gate<F>(allowed: bool, fallback: Option<&F>) -> GateDecision<'_, F> {
    if allowed {
        GateDecision::RenderChildren
    } else {
        GateDecision::RenderFallback(fallback)
    }
}

/// Inline permission check; never redirects.
///
/// An empty permission list declares no requirement and always renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGate<F = ()> {
    permissions: Vec<String>,
    mode: RequirementMode,
    fallback: Option<F>,
}

impl PermissionGate {
    pub fn new(permission: impl Into<String>) -> Self {
        Self::any_of([permission])
    }

    pub fn any_of<S: Into<String>>(permissions: impl IntoIterator<Item = S>) -> Self {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            mode: RequirementMode::Any,
            fallback: None,
        }
    }

    pub fn all_of<S: Into<String>>(permissions: impl IntoIterator<Item = S>) -> Self {
        Self::any_of(permissions).require_all(true)
    }
}

impl<F> PermissionGate<F> {
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.mode = if require_all {
            RequirementMode::All
        } else {
            RequirementMode::Any
        };
        self
    }

    pub fn with_fallback<G>(self, fallback: G) -> PermissionGate<G> {
        PermissionGate {
            permissions: self.permissions,
            mode: self.mode,
            fallback: Some(fallback),
        }
    }

    pub fn allows(&self, session: &Session) -> bool {
        self.permissions.is_empty() || permissions_pass(session, &self.permissions, self.mode)
    }

    pub fn decide(&self, session: &Session) -> GateDecision<'_, F> {
        gate(self.allows(session), self.fallback.as_ref())
    }
}

/// Inline role check; never redirects.
///
/// Admits a role listed explicitly, or any role at least as senior as the
/// [`RoleGate::at_least`] minimum. With neither configured it always renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate<F = ()> {
    roles: Vec<Role>,
    minimum: Option<Role>,
    fallback: Option<F>,
}

impl RoleGate {
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            minimum: None,
            fallback: None,
        }
    }

    pub fn at_least(minimum: Role) -> Self {
        Self {
            roles: Vec::new(),
            minimum: Some(minimum),
            fallback: None,
        }
    }
}

impl<F> RoleGate<F> {
    pub fn or_at_least(mut self, minimum: Role) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_fallback<G>(self, fallback: G) -> RoleGate<G> {
        RoleGate {
            roles: self.roles,
            minimum: self.minimum,
            fallback: Some(fallback),
        }
    }

    pub fn allows(&self, session: &Session) -> bool {
        if self.roles.is_empty() && self.minimum.is_none() {
            return true;
        }
        session.has_any_role(&self.roles)
            || self.minimum.is_some_and(|minimum| session.is_at_least(minimum))
    }

    pub fn decide(&self, session: &Session) -> GateDecision<'_, F> {
        gate(self.allows(session), self.fallback.as_ref())
    }
}
