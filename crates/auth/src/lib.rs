//! `shopfloor-auth` — role-based authorization core (pure, synchronous, no IO).
//!
//! - [`Resource`], [`Action`] and [`Permission`] form the closed permission catalog.
//! - [`matrix`] maps every [`Role`] to a hand-authored permission list.
//! - [`authorize`] evaluates single/any/all checks against that matrix.
//! - [`Session`] is the read-only identity snapshot callers pass in.
//!
//! Everything fails closed: no identity, a malformed identifier or an unknown
//! role all end in "denied", never in an error the caller has to handle.

pub mod action;
pub mod authorize;
pub mod error;
pub mod matrix;
pub mod permissions;
pub mod registry;
pub mod resource;
pub mod roles;
pub mod session;

pub use action::Action;
pub use authorize::{
    AuthorizationExplanation, DenialKind, DenialReason, can, can_all, can_any,
    effective_permissions, explain, has_any_role, permissions_for_resource,
};
pub use error::{AuthzError, AuthzResult};
pub use matrix::permissions_for;
pub use permissions::{Permission, ToPermission};
pub use registry::RbacRegistry;
pub use resource::Resource;
pub use roles::Role;
pub use session::{PersistedSession, Session, UnknownRolePolicy};
