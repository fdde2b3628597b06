//! Navigation route tree as supplied by the navigation data source.

use serde::{Deserialize, Serialize};
use tracing::warn;

use shopfloor_auth::{Permission, Role};

use crate::error::NavigationResult;

fn default_visible() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// One navigable destination.
///
/// Requirements are evaluated per node: a parent's requirement neither grants
/// nor denies its children. An empty `roles`/`permissions` list means "no
/// requirement declared".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Raw `RESOURCE.action` identifiers; any one suffices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Any one suffices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
    /// Navigational exposure only; has no bearing on authorization.
    #[serde(default = "default_visible", skip_serializing_if = "is_true")]
    pub visible: bool,
}

impl RouteNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: None,
            permissions: Vec::new(),
            roles: Vec::new(),
            children: Vec::new(),
            visible: true,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    pub fn child(mut self, child: RouteNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// `true` if the node declares a role or permission requirement.
    pub fn has_requirement(&self) -> bool {
        !self.roles.is_empty() || !self.permissions.is_empty()
    }
}

/// Problems found in a route declaration by [`RouteTree::audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteAudit {
    /// `(path, identifier)` pairs that can never be satisfied.
    pub malformed_permissions: Vec<(String, String)>,
    pub orphaned_routes: Vec<String>,
}

impl RouteAudit {
    pub fn is_clean(&self) -> bool {
        self.malformed_permissions.is_empty() && self.orphaned_routes.is_empty()
    }
}

/// Ordered list of top-level routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTree {
    routes: Vec<RouteNode>,
}

impl RouteTree {
    pub fn new(routes: Vec<RouteNode>) -> Self {
        Self { routes }
    }

    /// Parse the navigation declaration (a JSON array of route nodes).
    ///
    /// Runs [`RouteTree::audit`] once on the loaded declaration.
    pub fn from_json(json: &str) -> NavigationResult<Self> {
        let tree: RouteTree = serde_json::from_str(json)?;
        tree.audit();
        Ok(tree)
    }

    /// Check the declaration and log each problem at `warn`.
    ///
    /// Meant to run once when the declaration is loaded, not per render.
    pub fn audit(&self) -> RouteAudit {
        let malformed: Vec<(String, String)> = self
            .malformed_permissions()
            .into_iter()
            .map(|(path, raw)| (path.to_string(), raw.to_string()))
            .collect();
        let orphaned: Vec<String> = self
            .orphaned_routes()
            .into_iter()
            .map(str::to_string)
            .collect();

        for (path, raw) in &malformed {
            warn!(path, permission = raw, "route declares a malformed permission");
        }
        for path in &orphaned {
            warn!(path, "child route declares no requirement under a guarded parent");
        }

        RouteAudit {
            malformed_permissions: malformed,
            orphaned_routes: orphaned,
        }
    }

    pub fn routes(&self) -> &[RouteNode] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<RouteNode> {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Depth-first, pre-order walk over every node.
    pub fn iter(&self) -> impl Iterator<Item = &RouteNode> + '_ {
        let mut stack: Vec<&RouteNode> = self.routes.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// First node (pre-order) whose path equals `path`.
    ///
    /// Looks through the whole declaration, regardless of any filtering, so a
    /// directly entered location is judged by its own node's requirement.
    pub fn find(&self, path: &str) -> Option<&RouteNode> {
        self.iter().find(|node| node.path == path)
    }

    /// Child routes that declare no requirement while some ancestor does.
    ///
    /// Such a route is open to everyone when entered directly, even though it
    /// only ever appears in navigation under a guarded parent.
    pub fn orphaned_routes(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [RouteNode], guarded_ancestor: bool, out: &mut Vec<&'a str>) {
            for node in nodes {
                if guarded_ancestor && !node.has_requirement() {
                    out.push(node.path.as_str());
                }
                walk(&node.children, guarded_ancestor || node.has_requirement(), out);
            }
        }

        let mut out = Vec::new();
        walk(&self.routes, false, &mut out);
        out
    }

    /// `(path, identifier)` for every declared permission that does not parse.
    ///
    /// These can never be satisfied; the evaluator denies them.
    pub fn malformed_permissions(&self) -> Vec<(&str, &str)> {
        self.iter()
            .flat_map(|node| {
                node.permissions
                    .iter()
                    .filter(|raw| Permission::parse(raw).is_err())
                    .map(move |raw| (node.path.as_str(), raw.as_str()))
            })
            .collect()
    }
}

impl From<Vec<RouteNode>> for RouteTree {
    fn from(routes: Vec<RouteNode>) -> Self {
        Self::new(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RouteTree {
        RouteTree::new(vec![
            RouteNode::new("/dashboard").permission("DASHBOARD.view"),
            RouteNode::new("/plant")
                .permission("MACHINES.view")
                .child(RouteNode::new("/plant/machines").permission("MACHINES.view"))
                .child(RouteNode::new("/plant/overview")),
            RouteNode::new("/help").child(RouteNode::new("/help/faq")),
        ])
    }

    #[test]
    fn iter_is_depth_first_preorder() {
        let tree = sample();
        let paths: Vec<&str> = tree.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/dashboard",
                "/plant",
                "/plant/machines",
                "/plant/overview",
                "/help",
                "/help/faq",
            ]
        );
    }

    #[test]
    fn find_reaches_nested_routes() {
        let tree = sample();
        let node = tree.find("/plant/machines").unwrap();
        assert_eq!(node.permissions, vec!["MACHINES.view".to_string()]);
        assert!(tree.find("/nowhere").is_none());
    }

    #[test]
    fn orphans_are_unguarded_children_of_guarded_parents() {
        assert_eq!(sample().orphaned_routes(), vec!["/plant/overview"]);
    }

    #[test]
    fn malformed_permissions_are_reported_with_their_path() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/a").permission("MACHINES.view"),
            RouteNode::new("/b").child(RouteNode::new("/b/c").permission("MACHINES")),
        ]);
        assert_eq!(tree.malformed_permissions(), vec![("/b/c", "MACHINES")]);
    }

    #[test]
    fn audit_collects_declaration_problems() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/plant")
                .permission("MACHINES.view")
                .child(RouteNode::new("/plant/overview"))
                .child(RouteNode::new("/plant/broken").permission("MACHINES")),
        ]);
        let audit = tree.audit();
        assert!(!audit.is_clean());
        assert_eq!(audit.orphaned_routes, vec!["/plant/overview".to_string()]);
        assert_eq!(
            audit.malformed_permissions,
            vec![("/plant/broken".to_string(), "MACHINES".to_string())]
        );
    }

    #[test]
    fn audit_of_sound_declaration_is_clean() {
        let tree = RouteTree::new(vec![
            RouteNode::new("/dashboard").permission("DASHBOARD.view"),
            RouteNode::new("/help").child(RouteNode::new("/help/faq")),
        ]);
        assert_eq!(tree.audit(), RouteAudit::default());
    }

    #[test]
    fn json_declaration_defaults() {
        let tree = RouteTree::from_json(
            r#"[
                { "path": "/system", "roles": ["SYSTEM_ADMIN"], "children": [
                    { "path": "/system/industries", "permissions": ["INDUSTRIES.view"], "visible": false }
                ]}
            ]"#,
        )
        .unwrap();

        let system = &tree.routes()[0];
        assert_eq!(system.roles, vec![Role::SystemAdmin]);
        assert!(system.visible);
        assert!(system.permissions.is_empty());
        assert!(!system.children[0].visible);
    }

    #[test]
    fn json_rejects_unknown_roles() {
        assert!(RouteTree::from_json(r#"[{ "path": "/x", "roles": ["ROOT"] }]"#).is_err());
    }

    #[test]
    fn serialization_omits_defaults() {
        let json = serde_json::to_value(RouteTree::new(vec![RouteNode::new("/help")])).unwrap();
        assert_eq!(json, serde_json::json!([{ "path": "/help" }]));
    }
}
