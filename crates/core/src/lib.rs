//! `shopfloor-core` — identifiers and error model shared by every crate.
//!
//! Nothing in here knows about roles or permissions; it only names *who*
//! (user) acts *where* (tenant).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{TenantId, UserId};
