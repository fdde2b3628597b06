//! Role catalogue and seniority ranking.
//!
//! The ranking exists for "at least as senior as" comparisons in role-only
//! gates. It is never used to derive permissions; see [`crate::matrix`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::AuthzError;

/// Access tier assigned to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Operates the whole platform across tenants.
    SystemAdmin,
    /// Administers a single tenant.
    TenantAdmin,
    Manager,
    Supervisor,
    /// Line operator.
    Worker,
}

impl Role {
    /// Every role, most senior first.
    pub const ALL: [Role; 5] = [
        Role::SystemAdmin,
        Role::TenantAdmin,
        Role::Manager,
        Role::Supervisor,
        Role::Worker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SystemAdmin => "SYSTEM_ADMIN",
            Role::TenantAdmin => "TENANT_ADMIN",
            Role::Manager => "MANAGER",
            Role::Supervisor => "SUPERVISOR",
            Role::Worker => "WORKER",
        }
    }

    /// Numeric seniority; higher is more senior.
    pub fn rank(self) -> u8 {
        match self {
            Role::SystemAdmin => 5,
            Role::TenantAdmin => 4,
            Role::Manager => 3,
            Role::Supervisor => 2,
            Role::Worker => 1,
        }
    }

    /// `true` if `self` is at least as senior as `other`.
    pub fn is_at_least(self, other: Role) -> bool {
        self.rank() >= other.rank()
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| AuthzError::UnknownRole(value.to_string()))
    }
}
