//! Read-only view of the whole role/permission model for audit and display.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::matrix::{permissions_for, roles_granting};
use crate::{Action, Permission, Resource, Role};

/// One role and what it is granted.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub rank: u8,
    pub description: &'static str,
    pub permissions: Vec<Permission>,
}

/// One granted permission and who holds it.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub permission: Permission,
    pub category: Resource,
    pub description: String,
    pub roles: Vec<Role>,
}

/// Registry of all roles and every permission granted to at least one role.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    /// Most senior first.
    pub roles: Vec<RoleDefinition>,
    pub permissions: BTreeMap<String, PermissionDefinition>,
}

impl RbacRegistry {
    pub fn build() -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| RoleDefinition {
                role,
                rank: role.rank(),
                description: role_description(role),
                permissions: permissions_for(role).to_vec(),
            })
            .collect();

        let mut permissions = BTreeMap::new();
        for role in Role::ALL {
            for permission in permissions_for(role) {
                permissions
                    .entry(permission.as_string())
                    .or_insert_with(|| PermissionDefinition {
                        permission: *permission,
                        category: permission.resource,
                        description: permission_description(*permission),
                        roles: roles_granting(*permission),
                    });
            }
        }

        Self { roles, permissions }
    }

    pub fn role(&self, role: Role) -> Option<&RoleDefinition> {
        self.roles.iter().find(|def| def.role == role)
    }

    pub fn permission(&self, identifier: &str) -> Option<&PermissionDefinition> {
        self.permissions.get(identifier)
    }
}

fn role_description(role: Role) -> &'static str {
    match role {
        Role::SystemAdmin => "Platform operator with access to every tenant and industry catalogue",
        Role::TenantAdmin => "Administers one tenant: users, settings and all plant resources",
        Role::Manager => "Runs plant operations: orders, schedule, machines and reports",
        Role::Supervisor => "Oversees a shift: schedule, machine status and maintenance requests",
        Role::Worker => "Line operator with read access to the dashboard and schedule",
    }
}

fn permission_description(permission: Permission) -> String {
    let verb = match permission.action {
        Action::View => "View",
        Action::Create => "Create",
        Action::Update => "Update",
        Action::Delete => "Delete",
        Action::Manage => "Fully manage",
    };
    format!("{verb} {}", permission.resource.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_role() {
        let registry = RbacRegistry::build();
        assert_eq!(registry.roles.len(), Role::ALL.len());
        for role in Role::ALL {
            let def = registry.role(role).unwrap();
            assert_eq!(def.permissions, permissions_for(role));
        }
    }

    #[test]
    fn permission_entries_list_granting_roles() {
        let registry = RbacRegistry::build();
        let dashboard = registry.permission("DASHBOARD.view").unwrap();
        assert_eq!(dashboard.roles, Role::ALL.to_vec());
        assert_eq!(dashboard.category, Resource::Dashboard);
        assert_eq!(dashboard.description, "View dashboard");

        let industries = registry.permission("INDUSTRIES.view").unwrap();
        assert_eq!(industries.roles, vec![Role::SystemAdmin]);
    }

    #[test]
    fn ungranted_permissions_are_absent() {
        let registry = RbacRegistry::build();
        assert!(registry.permission("INDUSTRIES.manage").is_none());
    }
}
