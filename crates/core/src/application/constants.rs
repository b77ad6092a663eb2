// Report constants (host plugin wire contract)

/// Prefix shared by every latest key that belongs to the IOPS table
pub const IOPS_TABLE_PREFIX: &str = "iops-table-";

/// Separator between the row prefix and the column id in latest keys
pub const LATEST_KEY_SEPARATOR: &str = "___";

pub const IOPS_TABLE_LABEL: &str = "Iops";

/// Table layout understood by the host UI
pub const MULTICOLUMN_TABLE: &str = "multicolumn-table";

/// Suffix that marks a node id as a host topology node
pub const HOST_NODE_SUFFIX: &str = ";<host>";

/// Metadata templates read their value from the node's latest map
pub const METADATA_FROM_LATEST: &str = "latest";

pub const METADATA_PRIORITY: f64 = 1.0;

pub const PLUGIN_ID: &str = "iops";
pub const PLUGIN_LABEL: &str = "iops";
pub const PLUGIN_DESCRIPTION: &str = "Adds a IOPS details to Host";
pub const PLUGIN_INTERFACE_REPORTER: &str = "reporter";
pub const PLUGIN_API_VERSION: &str = "1";
