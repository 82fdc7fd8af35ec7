use std::collections::HashMap;

use barberdesk_domain::{Capability, CapabilitySet, MenuId, PermissionMap};

use crate::MenuRecord;

/// Readable menu entry with its readable children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationNode {
    /// Menu identifier.
    pub menu_id: MenuId,
    /// Display name.
    pub name: String,
    /// Navigation path.
    pub path: String,
    /// Icon reference.
    pub icon: Option<String>,
    /// Effective capabilities of the caller on this menu.
    pub capabilities: CapabilitySet,
    /// Readable nested entries.
    pub children: Vec<NavigationNode>,
}

pub(super) fn build_tree(menus: Vec<MenuRecord>, permissions: &PermissionMap) -> Vec<NavigationNode> {
    let mut children_by_parent: HashMap<Option<MenuId>, Vec<MenuRecord>> = HashMap::new();
    for menu in menus {
        if !menu.is_active || !permissions.allows(menu.path.as_str(), Capability::Read) {
            continue;
        }
        children_by_parent
            .entry(menu.parent_id)
            .or_default()
            .push(menu);
    }

    build_level(None, &mut children_by_parent, permissions)
}

fn build_level(
    parent_id: Option<MenuId>,
    children_by_parent: &mut HashMap<Option<MenuId>, Vec<MenuRecord>>,
    permissions: &PermissionMap,
) -> Vec<NavigationNode> {
    let Some(mut level) = children_by_parent.remove(&parent_id) else {
        return Vec::new();
    };
    level.sort_by(|left, right| {
        left.sort_order
            .cmp(&right.sort_order)
            .then_with(|| left.name.cmp(&right.name))
    });

    level
        .into_iter()
        .map(|menu| {
            let children = build_level(Some(menu.id), children_by_parent, permissions);
            NavigationNode {
                capabilities: permissions.get(menu.path.as_str()).unwrap_or_default(),
                menu_id: menu.id,
                name: menu.name,
                path: menu.path,
                icon: menu.icon,
                children,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use barberdesk_domain::{CapabilitySet, MenuId, PermissionMap};

    use crate::MenuRecord;

    use super::build_tree;

    fn menu(name: &str, path: &str, parent_id: Option<MenuId>, sort_order: i32) -> MenuRecord {
        MenuRecord {
            id: MenuId::new(),
            name: name.to_owned(),
            path: path.to_owned(),
            icon: None,
            parent_id,
            sort_order,
            is_active: true,
        }
    }

    fn read_only() -> CapabilitySet {
        CapabilitySet::new(true, false, false, false)
    }

    #[test]
    fn tree_orders_siblings_and_nests_children() {
        let settings = menu("Settings", "/dashboard/settings", None, 2);
        let sales = menu("Sales", "/dashboard/sales", None, 1);
        let users = menu("Users", "/dashboard/settings/users", Some(settings.id), 0);

        let mut permissions = PermissionMap::new();
        permissions.grant("/dashboard/settings", read_only());
        permissions.grant("/dashboard/sales", read_only());
        permissions.grant("/dashboard/settings/users", CapabilitySet::full());

        let tree = build_tree(vec![users, settings, sales], &permissions);

        let names: Vec<&str> = tree.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, vec!["Sales", "Settings"]);
        assert_eq!(tree[1].children.len(), 1);
        assert_eq!(tree[1].children[0].capabilities, CapabilitySet::full());
    }

    #[test]
    fn child_of_unreadable_parent_is_dropped() {
        let settings = menu("Settings", "/dashboard/settings", None, 0);
        let users = menu("Users", "/dashboard/settings/users", Some(settings.id), 0);

        let mut permissions = PermissionMap::new();
        permissions.grant("/dashboard/settings/users", read_only());

        assert!(build_tree(vec![settings, users], &permissions).is_empty());
    }

    #[test]
    fn write_only_menu_is_not_navigable() {
        let products = menu("Products", "/dashboard/products", None, 0);

        let mut permissions = PermissionMap::new();
        permissions.grant(
            "/dashboard/products",
            CapabilitySet::new(false, true, false, false),
        );

        assert!(build_tree(vec![products], &permissions).is_empty());
    }
}
