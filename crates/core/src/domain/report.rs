// Plugin Report Document
//
// Mirrors the JSON layout the Scope host expects from a reporter plugin.
// Field names are part of the wire contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level report returned from `/report`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Host")]
    pub host: Topology,
    #[serde(rename = "Plugins")]
    pub plugins: Vec<PluginSpec>,
}

/// Host topology: nodes plus rendering templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: BTreeMap<String, Node>,
    /// Always empty: this plugin exposes no controls
    pub controls: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata_templates: BTreeMap<String, MetadataTemplate>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub table_templates: BTreeMap<String, TableTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<BTreeMap<String, StringEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringEntry {
    pub timestamp: DateTime<Utc>,
    pub value: String,
}

/// Describes how the host renders a scalar field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataTemplate {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    /// If > 0, the host truncates the value to this length
    #[serde(default, skip_serializing_if = "is_zero")]
    pub truncate: u32,
    #[serde(rename = "dataType", default, skip_serializing_if = "String::is_empty")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub priority: f64,
    /// Where the host reads the value from on the node
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
}

/// Describes a multi-column table built from prefixed latest keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTemplate {
    pub id: String,
    pub label: String,
    pub prefix: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(rename = "dataType", default, skip_serializing_if = "String::is_empty")]
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub interfaces: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let tmpl = MetadataTemplate {
            id: "tps".to_string(),
            label: "tps".to_string(),
            truncate: 0,
            data_type: String::new(),
            priority: 1.0,
            from: "latest".to_string(),
        };

        let json = serde_json::to_value(&tmpl).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": "tps", "label": "tps", "priority": 1.0, "from": "latest"})
        );
    }

    #[test]
    fn test_node_without_latest_serializes_empty() {
        let json = serde_json::to_value(Node::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_table_template_type_key() {
        let tmpl = TableTemplate {
            id: "t-".to_string(),
            label: "T".to_string(),
            prefix: "t-".to_string(),
            kind: "multicolumn-table".to_string(),
            columns: vec![],
        };

        let json = serde_json::to_value(&tmpl).unwrap();
        assert_eq!(json["type"], "multicolumn-table");
        assert!(json.get("kind").is_none());
    }
}
