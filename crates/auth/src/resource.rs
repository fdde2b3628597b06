//! Protectable resource categories.

use serde::{Deserialize, Serialize};

use crate::error::AuthzError;

/// A protectable category of domain objects.
///
/// Closed set: adding a member means adding the matching matrix entries too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resource {
    Dashboard,
    Machines,
    Orders,
    Schedule,
    Maintenance,
    Reports,
    Users,
    Settings,
    Tenants,
    Industries,
    /// Platform-wide settings shared by all tenants.
    Platform,
}

impl Resource {
    pub const ALL: [Resource; 11] = [
        Resource::Dashboard,
        Resource::Machines,
        Resource::Orders,
        Resource::Schedule,
        Resource::Maintenance,
        Resource::Reports,
        Resource::Users,
        Resource::Settings,
        Resource::Tenants,
        Resource::Industries,
        Resource::Platform,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Dashboard => "DASHBOARD",
            Resource::Machines => "MACHINES",
            Resource::Orders => "ORDERS",
            Resource::Schedule => "SCHEDULE",
            Resource::Maintenance => "MAINTENANCE",
            Resource::Reports => "REPORTS",
            Resource::Users => "USERS",
            Resource::Settings => "SETTINGS",
            Resource::Tenants => "TENANTS",
            Resource::Industries => "INDUSTRIES",
            Resource::Platform => "PLATFORM",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resource {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == value)
            .ok_or_else(|| AuthzError::UnknownResource(value.to_string()))
    }
}
