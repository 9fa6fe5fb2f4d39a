use serde::{Deserialize, Serialize};

/// One selectable row produced by a plugin for the current query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    /// Key of the command that produced the row.
    pub key: String,
    /// Owning plugin; filled in by the plugin manager.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plugin: String,
    pub icon: String,
    pub title: String,
    pub desc: String,
    /// Placeholder row standing for a command that has not been entered yet.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_warn: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}
