//! `iostat -d` output parser
//!
//! Expected layout:
//!
//! ```text
//! Linux 4.2.0-25-generic (a109563eab38)   04/01/16    _x86_64_    (4 CPU)
//!
//! Device             tps    kB_read/s    kB_wrtn/s    kB_read    kB_wrtn
//! sda               3.21        12.34        56.78     123456     654321
//! ```
//!
//! Only the first four columns are read. Rows end at the first blank line.

use crate::domain::error::{ParseError, Result};
use crate::domain::DeviceIops;

/// Minimum lines before a header can appear: banner, blank, header
const MIN_LINES: usize = 3;

/// device, tps, read/s, write/s
const REQUIRED_FIELDS: usize = 4;

/// Parse the device table printed by `iostat -d`
pub fn parse_iostat(output: &str) -> Result<Vec<DeviceIops>> {
    let lines: Vec<&str> = output.lines().collect();
    if lines.len() < MIN_LINES {
        return Err(ParseError::UnexpectedOutput(output.to_string()));
    }

    let header = lines
        .iter()
        .position(|line| is_header(line))
        .ok_or(ParseError::MissingHeader)?;

    let mut devices = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(header + 1) {
        if line.trim().is_empty() {
            break;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < REQUIRED_FIELDS {
            return Err(ParseError::MalformedRow {
                line: idx + 1,
                content: line.to_string(),
            });
        }

        devices.push(DeviceIops::new(fields[0], fields[1], fields[2], fields[3]));
    }

    if devices.is_empty() {
        return Err(ParseError::NoDevices);
    }

    Ok(devices)
}

// Older sysstat prints "Device:", newer prints "Device"
fn is_header(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|first| first.starts_with("Device"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Linux 4.2.0-25-generic (a109563eab38) \t04/01/16 \t_x86_64_\t(4 CPU)

Device             tps    kB_read/s    kB_wrtn/s    kB_dscd/s    kB_read    kB_wrtn    kB_dscd
sda               3.21        12.34        56.78         0.00     123456     654321          0
nvme0n1          10.00       100.50         0.25         0.00       1000         20          0

";

    #[test]
    fn test_parse_devices() {
        let devices = parse_iostat(SAMPLE).unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0], DeviceIops::new("sda", "3.21", "12.34", "56.78"));
        assert_eq!(
            devices[1],
            DeviceIops::new("nvme0n1", "10.00", "100.50", "0.25")
        );
    }

    #[test]
    fn test_parse_legacy_header_with_colon() {
        let output = "\
Linux 3.10.0 (host) \t01/01/20 \t_x86_64_\t(2 CPU)

Device:            tps    kB_read/s    kB_wrtn/s    kB_read    kB_wrtn
vda               0.52         1.90         4.11     300000     650000
";

        let devices = parse_iostat(output).unwrap();

        assert_eq!(devices, vec![DeviceIops::new("vda", "0.52", "1.90", "4.11")]);
    }

    #[test]
    fn test_rows_stop_at_first_blank_line() {
        let output = "\
Linux 5.15.0 (host) \t01/01/24 \t_x86_64_\t(8 CPU)

Device             tps    kB_read/s    kB_wrtn/s
sda               1.00         2.00         3.00

Device             tps    kB_read/s    kB_wrtn/s
sda               9.00         9.00         9.00
";

        let devices = parse_iostat(output).unwrap();

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].tps, "1.00");
    }

    #[test]
    fn test_too_few_lines() {
        let result = parse_iostat("Linux 5.15.0 (host)\n");
        assert!(matches!(result, Err(ParseError::UnexpectedOutput(_))));
    }

    #[test]
    fn test_missing_header() {
        let result = parse_iostat("banner\n\nsomething else\nsda 1 2 3\n");
        assert_eq!(result, Err(ParseError::MissingHeader));
    }

    #[test]
    fn test_header_without_devices() {
        let output = "Linux 5.15.0 (host)\n\nDevice tps kB_read/s kB_wrtn/s\n\n";
        assert_eq!(parse_iostat(output), Err(ParseError::NoDevices));
    }

    #[test]
    fn test_malformed_row() {
        let output = "Linux 5.15.0 (host)\n\nDevice tps kB_read/s kB_wrtn/s\nsda 1.00\n";

        let result = parse_iostat(output);

        assert_eq!(
            result,
            Err(ParseError::MalformedRow {
                line: 4,
                content: "sda 1.00".to_string()
            })
        );
    }
}
