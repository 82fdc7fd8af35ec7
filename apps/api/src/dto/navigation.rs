use barberdesk_application::NavigationNode;
use serde::Serialize;
use ts_rs::TS;

use super::MenuPermissionsResponse;

/// Readable navigation entry for the dashboard sidebar.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/navigation-node-response.ts"
)]
pub struct NavigationNodeResponse {
    pub menu_id: String,
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub permissions: MenuPermissionsResponse,
    pub children: Vec<NavigationNodeResponse>,
}

impl From<NavigationNode> for NavigationNodeResponse {
    fn from(node: NavigationNode) -> Self {
        Self {
            menu_id: node.menu_id.to_string(),
            name: node.name,
            path: node.path,
            icon: node.icon,
            permissions: node.capabilities.into(),
            children: node.children.into_iter().map(Self::from).collect(),
        }
    }
}
