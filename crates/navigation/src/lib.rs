//! `shopfloor-navigation` — route-tree filtering and render-time guards.
//!
//! # How it fits
//! The navigation data source hands in a [`RouteTree`]; the session provider
//! hands in a [`Session`](shopfloor_auth::Session). This crate answers two
//! questions with them:
//!
//! - which routes should the menu show? ([`RouteTree::navigation`])
//! - may this identity see this destination right now? ([`PathGuard`],
//!   [`PermissionGate`], [`RoleGate`])
//!
//! # Key invariants
//! - Every node is judged on its own requirement; pruning drops a subtree only
//!   when that subtree's root fails its check.
//! - Filtering is presentation only. Each independently reachable route must
//!   declare its own requirement and be guarded at the destination;
//!   [`RouteTree::audit`] reports the ones that do not when the declaration
//!   is loaded.
//! - Guards check authentication strictly before roles and permissions.

pub mod config;
pub mod error;
pub mod filter;
pub mod guard;
pub mod route;

pub use config::GuardConfig;
pub use error::{NavigationError, NavigationResult};
pub use filter::{authorize, visible_only};
pub use guard::{
    GateDecision, GuardState, PathDecision, PathGuard, PermissionGate, RequirementMode, RoleGate,
};
pub use route::{RouteAudit, RouteNode, RouteTree};
