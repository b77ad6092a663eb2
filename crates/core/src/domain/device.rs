// Device IOPS Domain Model

/// One device row from a disk statistics sample.
///
/// Values are kept verbatim as printed by the sampling tool so the host
/// renders exactly what `iostat` reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIops {
    pub device: String,
    pub tps: String,
    pub read_per_sec: String,
    pub write_per_sec: String,
}

impl DeviceIops {
    pub fn new(
        device: impl Into<String>,
        tps: impl Into<String>,
        read_per_sec: impl Into<String>,
        write_per_sec: impl Into<String>,
    ) -> Self {
        Self {
            device: device.into(),
            tps: tps.into(),
            read_per_sec: read_per_sec.into(),
            write_per_sec: write_per_sec.into(),
        }
    }

    /// Value of the given table column for this device
    pub fn value(&self, column: IopsColumn) -> &str {
        match column {
            IopsColumn::Device => &self.device,
            IopsColumn::Tps => &self.tps,
            IopsColumn::ReadPerSec => &self.read_per_sec,
            IopsColumn::WritePerSec => &self.write_per_sec,
        }
    }
}

/// Columns of the IOPS table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IopsColumn {
    Device,
    Tps,
    ReadPerSec,
    WritePerSec,
}

impl IopsColumn {
    pub const ALL: [IopsColumn; 4] = [
        IopsColumn::Device,
        IopsColumn::Tps,
        IopsColumn::ReadPerSec,
        IopsColumn::WritePerSec,
    ];

    /// Field id used in latest keys and templates
    pub fn id(self) -> &'static str {
        match self {
            IopsColumn::Device => "device",
            IopsColumn::Tps => "tps",
            IopsColumn::ReadPerSec => "readps",
            IopsColumn::WritePerSec => "writeps",
        }
    }

    /// Human-readable label, matching the iostat column headers
    pub fn label(self) -> &'static str {
        match self {
            IopsColumn::Device => "Device",
            IopsColumn::Tps => "tps",
            IopsColumn::ReadPerSec => "kB_read/s",
            IopsColumn::WritePerSec => "kB_wrtn/s",
        }
    }
}

impl std::fmt::Display for IopsColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_by_column() {
        let dev = DeviceIops::new("sda", "1.50", "2.00", "3.25");

        assert_eq!(dev.value(IopsColumn::Device), "sda");
        assert_eq!(dev.value(IopsColumn::Tps), "1.50");
        assert_eq!(dev.value(IopsColumn::ReadPerSec), "2.00");
        assert_eq!(dev.value(IopsColumn::WritePerSec), "3.25");
    }

    #[test]
    fn test_column_ids_are_unique() {
        let ids: std::collections::HashSet<_> = IopsColumn::ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), IopsColumn::ALL.len());
    }
}
