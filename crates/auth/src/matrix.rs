//! Role → permission matrix.
//!
//! Each list is authored by hand. Adjacent tiers are not supersets of each
//! other, so nothing here is derived from [`Role::rank`].

use crate::{Action, Permission, Resource, Role};

use crate::Action::{Create, Delete, Manage, Update, View};
use crate::Resource::{
    Dashboard, Industries, Machines, Maintenance, Orders, Platform, Reports, Schedule, Settings,
    Tenants, Users,
};

const fn p(resource: Resource, action: Action) -> Permission {
    Permission::new(resource, action)
}

const SYSTEM_ADMIN: &[Permission] = &[
    p(Dashboard, View),
    p(Machines, View),
    p(Machines, Create),
    p(Machines, Update),
    p(Machines, Delete),
    p(Machines, Manage),
    p(Orders, View),
    p(Orders, Create),
    p(Orders, Update),
    p(Orders, Delete),
    p(Orders, Manage),
    p(Schedule, View),
    p(Schedule, Create),
    p(Schedule, Update),
    p(Schedule, Delete),
    p(Maintenance, View),
    p(Maintenance, Create),
    p(Maintenance, Update),
    p(Maintenance, Delete),
    p(Reports, View),
    p(Reports, Create),
    p(Users, View),
    p(Users, Create),
    p(Users, Update),
    p(Users, Delete),
    p(Users, Manage),
    p(Settings, View),
    p(Settings, Update),
    p(Tenants, View),
    p(Tenants, Create),
    p(Tenants, Update),
    p(Tenants, Delete),
    p(Tenants, Manage),
    p(Industries, View),
    p(Industries, Create),
    p(Industries, Update),
    p(Industries, Delete),
    p(Platform, View),
    p(Platform, Update),
    p(Platform, Manage),
];

const TENANT_ADMIN: &[Permission] = &[
    p(Dashboard, View),
    p(Machines, View),
    p(Machines, Create),
    p(Machines, Update),
    p(Machines, Delete),
    p(Machines, Manage),
    p(Orders, View),
    p(Orders, Create),
    p(Orders, Update),
    p(Orders, Delete),
    p(Orders, Manage),
    p(Schedule, View),
    p(Schedule, Create),
    p(Schedule, Update),
    p(Schedule, Delete),
    p(Maintenance, View),
    p(Maintenance, Create),
    p(Maintenance, Update),
    p(Maintenance, Delete),
    p(Reports, View),
    p(Reports, Create),
    p(Users, View),
    p(Users, Create),
    p(Users, Update),
    p(Users, Delete),
    p(Users, Manage),
    p(Settings, View),
    p(Settings, Update),
    p(Settings, Manage),
];

const MANAGER: &[Permission] = &[
    p(Dashboard, View),
    p(Machines, View),
    p(Machines, Create),
    p(Machines, Update),
    p(Orders, View),
    p(Orders, Create),
    p(Orders, Update),
    p(Orders, Delete),
    p(Schedule, View),
    p(Schedule, Create),
    p(Schedule, Update),
    p(Schedule, Delete),
    p(Maintenance, View),
    p(Maintenance, Create),
    p(Maintenance, Update),
    p(Reports, View),
    p(Reports, Create),
    p(Users, View),
];

const SUPERVISOR: &[Permission] = &[
    p(Dashboard, View),
    p(Machines, View),
    p(Machines, Update),
    p(Orders, View),
    p(Orders, Update),
    p(Schedule, View),
    p(Schedule, Create),
    p(Schedule, Update),
    p(Maintenance, View),
    p(Maintenance, Create),
    p(Reports, View),
];

const WORKER: &[Permission] = &[p(Dashboard, View), p(Schedule, View)];

/// Permissions granted to `role`, in authored order.
///
/// Total over [`Role`]: every role resolves to a list, possibly empty.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::SystemAdmin => SYSTEM_ADMIN,
        Role::TenantAdmin => TENANT_ADMIN,
        Role::Manager => MANAGER,
        Role::Supervisor => SUPERVISOR,
        Role::Worker => WORKER,
    }
}

/// Roles whose list contains `permission`, most senior first.
pub fn roles_granting(permission: Permission) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| permissions_for(*role).contains(&permission))
        .collect()
}
