// Report Builder
// Assembles the host plugin report from one disk sample

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::constants::{
    HOST_NODE_SUFFIX, IOPS_TABLE_LABEL, IOPS_TABLE_PREFIX, LATEST_KEY_SEPARATOR,
    METADATA_FROM_LATEST, METADATA_PRIORITY, MULTICOLUMN_TABLE, PLUGIN_API_VERSION,
    PLUGIN_DESCRIPTION, PLUGIN_ID, PLUGIN_INTERFACE_REPORTER, PLUGIN_LABEL,
};
use crate::domain::{
    Column, DeviceIops, IopsColumn, MetadataTemplate, Node, PluginSpec, Report, StringEntry,
    TableTemplate, Topology,
};
use crate::port::TimeProvider;

/// Builds reports for a single host
pub struct ReportBuilder {
    host_id: String,
    time_provider: Arc<dyn TimeProvider>,
}

impl ReportBuilder {
    pub fn new(host_id: impl Into<String>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            host_id: host_id.into(),
            time_provider,
        }
    }

    /// Topology node id of this host (`<host_id>;<host>`)
    pub fn host_node_id(&self) -> String {
        format!("{}{}", self.host_id, HOST_NODE_SUFFIX)
    }

    /// Build a report; `None` or an empty sample leaves the node without latest values
    pub fn build(&self, devices: Option<&[DeviceIops]>) -> Report {
        let latest = devices
            .filter(|d| !d.is_empty())
            .map(|d| latest_entries(d, self.time_provider.now()));

        debug!(
            host_id = %self.host_id,
            entries = latest.as_ref().map_or(0, |l| l.len()),
            "Report built"
        );

        let mut nodes = BTreeMap::new();
        nodes.insert(self.host_node_id(), Node { latest });

        Report {
            host: Topology {
                nodes,
                controls: serde_json::Map::new(),
                metadata_templates: metadata_templates(),
                table_templates: table_templates(),
            },
            plugins: vec![plugin_spec()],
        }
    }
}

/// Latest key for one table cell; `row` is 1-based
pub fn latest_key(row: usize, column: IopsColumn) -> String {
    format!(
        "{}{}{}{}",
        IOPS_TABLE_PREFIX,
        row,
        LATEST_KEY_SEPARATOR,
        column.id()
    )
}

/// Flatten device rows into table cells sharing one timestamp
pub fn latest_entries(
    devices: &[DeviceIops],
    timestamp: DateTime<Utc>,
) -> BTreeMap<String, StringEntry> {
    devices
        .iter()
        .enumerate()
        .flat_map(|(idx, device)| {
            IopsColumn::ALL.iter().map(move |&column| {
                (
                    latest_key(idx + 1, column),
                    StringEntry {
                        timestamp,
                        value: device.value(column).to_string(),
                    },
                )
            })
        })
        .collect()
}

pub fn metadata_templates() -> BTreeMap<String, MetadataTemplate> {
    IopsColumn::ALL
        .iter()
        .map(|column| {
            (
                column.id().to_string(),
                MetadataTemplate {
                    id: column.id().to_string(),
                    label: column.label().to_string(),
                    truncate: 0,
                    data_type: String::new(),
                    priority: METADATA_PRIORITY,
                    from: METADATA_FROM_LATEST.to_string(),
                },
            )
        })
        .collect()
}

pub fn table_templates() -> BTreeMap<String, TableTemplate> {
    let columns = IopsColumn::ALL
        .iter()
        .map(|column| Column {
            id: column.id().to_string(),
            label: column.label().to_string(),
            data_type: String::new(),
        })
        .collect();

    let mut templates = BTreeMap::new();
    templates.insert(
        IOPS_TABLE_PREFIX.to_string(),
        TableTemplate {
            id: IOPS_TABLE_PREFIX.to_string(),
            label: IOPS_TABLE_LABEL.to_string(),
            prefix: IOPS_TABLE_PREFIX.to_string(),
            kind: MULTICOLUMN_TABLE.to_string(),
            columns,
        },
    );
    templates
}

pub fn plugin_spec() -> PluginSpec {
    PluginSpec {
        id: PLUGIN_ID.to_string(),
        label: PLUGIN_LABEL.to_string(),
        description: PLUGIN_DESCRIPTION.to_string(),
        interfaces: vec![PLUGIN_INTERFACE_REPORTER.to_string()],
        api_version: PLUGIN_API_VERSION.to_string(),
    }
}
