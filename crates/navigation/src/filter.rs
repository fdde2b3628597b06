//! Route-tree authorizer.
//!
//! Filtering is presentation only: it decides what navigation shows. Every
//! independently reachable route still needs its own
//! [`PathGuard`](crate::PathGuard) at the destination.

use tracing::debug;

use shopfloor_auth::{Role, Session};

use crate::route::{RouteNode, RouteTree};

/// Filter `routes` with injected predicates, depth-first.
///
/// For each node, in order:
/// 1. declared roles and `role_check(roles)` fails: drop node and subtree;
/// 2. else declared permissions and `permission_check(permissions)` fails
///    (any-of semantics is the predicate's job): drop node and subtree;
/// 3. else keep it and filter its children the same way.
///
/// Sibling order is preserved; nothing is re-sorted or deduplicated. A node
/// whose children all get dropped is still kept.
pub fn authorize<R, P>(routes: &[RouteNode], role_check: R, permission_check: P) -> Vec<RouteNode>
where
    R: Fn(&[Role]) -> bool,
    P: Fn(&[String]) -> bool,
{
    filter_nodes(routes, &role_check, &permission_check)
}

fn filter_nodes<R, P>(routes: &[RouteNode], role_check: &R, permission_check: &P) -> Vec<RouteNode>
where
    R: Fn(&[Role]) -> bool,
    P: Fn(&[String]) -> bool,
{
    routes
        .iter()
        .filter(|node| {
            if !node.roles.is_empty() && !role_check(&node.roles) {
                debug!(path = %node.path, "route dropped: role check failed");
                return false;
            }
            if !node.permissions.is_empty() && !permission_check(&node.permissions) {
                debug!(path = %node.path, "route dropped: permission check failed");
                return false;
            }
            true
        })
        .map(|node| RouteNode {
            children: filter_nodes(&node.children, role_check, permission_check),
            ..node.clone_without_children()
        })
        .collect()
}

impl RouteNode {
    fn clone_without_children(&self) -> RouteNode {
        RouteNode {
            path: self.path.clone(),
            label: self.label.clone(),
            permissions: self.permissions.clone(),
            roles: self.roles.clone(),
            children: Vec::new(),
            visible: self.visible,
        }
    }
}

/// Drop every node whose `visible` flag is off, together with its subtree.
pub fn visible_only(routes: &[RouteNode]) -> Vec<RouteNode> {
    routes
        .iter()
        .filter(|node| node.visible)
        .map(|node| RouteNode {
            children: visible_only(&node.children),
            ..node.clone_without_children()
        })
        .collect()
}

impl RouteTree {
    /// [`authorize`] over the whole tree.
    pub fn authorize<R, P>(&self, role_check: R, permission_check: P) -> RouteTree
    where
        R: Fn(&[Role]) -> bool,
        P: Fn(&[String]) -> bool,
    {
        RouteTree::new(authorize(self.routes(), role_check, permission_check))
    }

    /// [`authorize`] with predicates bound to the evaluator for `session`.
    pub fn authorize_for(&self, session: &Session) -> RouteTree {
        self.authorize(
            |roles| session.has_any_role(roles),
            |permissions| session.can_any(permissions),
        )
    }

    /// What the navigation menu shows for `session`: authorized routes that
    /// are also flagged visible.
    pub fn navigation(&self, session: &Session) -> RouteTree {
        let authorized = self.authorize_for(session);
        RouteTree::new(visible_only(authorized.routes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn system_tree() -> RouteTree {
        RouteTree::new(vec![
            RouteNode::new("/system")
                .role(Role::SystemAdmin)
                .child(RouteNode::new("/system/industries").permission("INDUSTRIES.view")),
        ])
    }

    fn paths(routes: &[RouteNode]) -> Vec<String> {
        routes.iter().map(|n| n.path.clone()).collect()
    }

    #[test]
    fn role_rejected_parent_drops_whole_subtree() {
        let filtered = system_tree().authorize_for(&Session::authenticated(Role::Supervisor));
        assert!(filtered.is_empty());
    }

    #[test]
    fn system_admin_keeps_both_levels() {
        let tree = system_tree();
        let filtered = tree.authorize_for(&Session::authenticated(Role::SystemAdmin));
        assert_eq!(filtered, tree);
    }

    #[test]
    fn unrequired_nodes_survive_even_when_children_do_not() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/reports").child(RouteNode::new("/reports/new").permission("REPORTS.create")),
        ]);
        let filtered = tree.authorize_for(&Session::authenticated(Role::Worker));
        assert_eq!(paths(filtered.routes()), vec!["/reports"]);
        assert!(filtered.routes()[0].children.is_empty());
    }

    #[test]
    fn children_are_judged_on_their_own_requirement() {
        // The parent check passes; one child fails its own check.
        let tree = RouteTree::new(vec![
            RouteNode::new("/plant")
                .permission("DASHBOARD.view")
                .child(RouteNode::new("/plant/schedule").permission("SCHEDULE.view"))
                .child(RouteNode::new("/plant/machines").permission("MACHINES.view")),
        ]);
        let filtered = tree.authorize_for(&Session::authenticated(Role::Worker));
        assert_eq!(paths(&filtered.routes()[0].children), vec!["/plant/schedule"]);
    }

    #[test]
    fn permission_lists_use_any_of_semantics() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/work")
                .permission("MACHINES.view")
                .permission("SCHEDULE.view"),
        ]);
        let filtered = tree.authorize_for(&Session::authenticated(Role::Worker));
        assert_eq!(paths(filtered.routes()), vec!["/work"]);
    }

    #[test]
    fn role_check_runs_before_permission_check() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/x").role(Role::Manager).permission("DASHBOARD.view"),
        ]);
        let filtered = tree.authorize(|_| false, |_| panic!("permission check must not run"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn anonymous_session_sees_only_unrequired_routes() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/help"),
            RouteNode::new("/dashboard").permission("DASHBOARD.view"),
        ]);
        let filtered = tree.authorize_for(&Session::anonymous());
        assert_eq!(paths(filtered.routes()), vec!["/help"]);
    }

    #[test]
    fn malformed_declarations_are_never_satisfied() {
        let tree = RouteTree::new(vec![RouteNode::new("/broken").permission("DASHBOARD")]);
        let filtered = tree.authorize_for(&Session::authenticated(Role::SystemAdmin));
        assert!(filtered.is_empty());
    }

    #[test]
    fn flawed_declaration_filters_the_same_on_every_render() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/plant")
                .permission("MACHINES.view")
                .child(RouteNode::new("/plant/overview"))
                .child(RouteNode::new("/plant/broken").permission("MACHINES")),
        ]);
        assert!(!tree.audit().is_clean());

        let session = Session::authenticated(Role::TenantAdmin);
        let first = tree.authorize_for(&session);
        let second = tree.authorize_for(&session);
        assert_eq!(first, second);
        let kept: Vec<&str> = first.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(kept, vec!["/plant", "/plant/overview"]);
    }

    #[test]
    fn navigation_hides_invisible_routes_after_authorization() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/dashboard").permission("DASHBOARD.view"),
            RouteNode::new("/orders/import").permission("ORDERS.create").hidden(),
            RouteNode::new("/orders")
                .permission("ORDERS.view")
                .child(RouteNode::new("/orders/archive").hidden()),
        ]);
        let nav = tree.navigation(&Session::authenticated(Role::Manager));
        assert_eq!(paths(nav.routes()), vec!["/dashboard", "/orders"]);
        assert!(nav.routes()[1].children.is_empty());

        // Hidden routes are still authorized, just not listed.
        let authorized = tree.authorize_for(&Session::authenticated(Role::Manager));
        assert_eq!(authorized.routes().len(), 3);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────

    fn any_node() -> impl Strategy<Value = RouteNode> {
        let leaf = (
            0u32..1000,
            prop::collection::vec(prop::sample::select(Role::ALL.to_vec()), 0..2),
            prop::collection::vec(
                prop::sample::select(vec!["DASHBOARD.view", "MACHINES.view", "ORDERS.update", "oops"]),
                0..2,
            ),
        )
            .prop_map(|(id, roles, perms)| RouteNode {
                path: format!("/n{id}"),
                label: None,
                permissions: perms.into_iter().map(String::from).collect(),
                roles,
                children: Vec::new(),
                visible: true,
            });

        leaf.prop_recursive(3, 24, 4, |inner| {
            (inner.clone(), prop::collection::vec(inner, 0..4)).prop_map(|(mut node, children)| {
                node.children = children;
                node
            })
        })
    }

    fn is_subsequence(sub: &[RouteNode], full: &[RouteNode]) -> bool {
        let mut rest = full.iter();
        sub.iter().all(|s| rest.any(|f| f.path == s.path && is_subsequence(&s.children, &f.children)))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        #[test]
        fn filtering_is_idempotent(
            routes in prop::collection::vec(any_node(), 0..5),
            role in prop::sample::select(Role::ALL.to_vec()),
        ) {
            let session = Session::authenticated(role);
            let tree = RouteTree::new(routes);
            let once = tree.authorize_for(&session);
            let twice = once.authorize_for(&session);
            prop_assert_eq!(once, twice);
        }

        /// Kept nodes appear in their original relative order at every level.
        #[test]
        fn filtering_preserves_order(
            routes in prop::collection::vec(any_node(), 0..5),
            role in prop::sample::select(Role::ALL.to_vec()),
        ) {
            let tree = RouteTree::new(routes);
            let filtered = tree.authorize_for(&Session::authenticated(role));
            prop_assert!(is_subsequence(filtered.routes(), tree.routes()));
        }

        #[test]
        fn unrequired_top_level_nodes_are_always_kept(
            routes in prop::collection::vec(any_node(), 0..5),
            role in prop::option::of(prop::sample::select(Role::ALL.to_vec())),
        ) {
            let session = match role {
                Some(role) => Session::authenticated(role),
                None => Session::anonymous(),
            };
            let tree = RouteTree::new(routes);
            let filtered = tree.authorize_for(&session);
            let expected = tree.routes().iter().filter(|n| !n.has_requirement()).count();
            let kept = filtered.routes().iter().filter(|n| !n.has_requirement()).count();
            prop_assert_eq!(kept, expected);
        }

        #[test]
        fn permissive_predicates_keep_everything(routes in prop::collection::vec(any_node(), 0..5)) {
            let tree = RouteTree::new(routes);
            prop_assert_eq!(tree.authorize(|_| true, |_| true), tree);
        }
    }
}
