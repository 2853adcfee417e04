//! Connection, template, registry and project messages

pub struct ConnectionMessages {
    pub connection_added: &'static str,
    pub connection_removed: &'static str,
    pub connection_updated: &'static str,
    pub connections_empty: &'static str,
    pub credentials_updated: &'static str,
    pub project_bound: &'static str,
    pub project_created: &'static str,
    pub project_removed: &'static str,
    pub registry_secret_added: &'static str,
    pub registry_secret_removed: &'static str,
    pub repo_added: &'static str,
    pub repo_removed: &'static str,
    pub repo_toggled: &'static str,
    pub templates_empty: &'static str,
}

pub const CONNECTION_MESSAGES: ConnectionMessages = ConnectionMessages {
    connection_added: "✅ Added connection '{label}' ({conid})",
    connection_removed: "✅ Removed connection {conid}",
    connection_updated: "✅ Updated connection {conid}",
    connections_empty: "No connections configured",
    credentials_updated: "✅ Stored credentials for {username} on {conid}",
    project_bound: "✅ Bound project '{name}' ({id})",
    project_created: "✅ Created project at {path}",
    project_removed: "✅ Removed project {id}",
    registry_secret_added: "✅ Added registry secret for {address}",
    registry_secret_removed: "✅ Removed registry secret for {address}",
    repo_added: "✅ Added template repository {url}",
    repo_removed: "✅ Removed template repository {url}",
    repo_toggled: "✅ Template repository {url} is now {state}",
    templates_empty: "No templates available",
};
