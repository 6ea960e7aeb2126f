//! Human-readable data sizes using decimal (SI) units.
//!
//! `format_data_size(1_500_000, 1, UnitFormat::Short)` -> "1.5 MB".
//! Byte counts below 1 KB always print without decimals.

use std::fmt;
use std::str::FromStr;

/// Label style for units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitFormat {
    /// "B", "KB", "MB", ...
    Short,
    /// "bytes", "kilobytes", "megabytes", ...
    Long,
    /// "bytes" for plain bytes, short labels otherwise.
    #[default]
    Conventional,
}

impl FromStr for UnitFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(UnitFormat::Short),
            "long" => Ok(UnitFormat::Long),
            "conventional" => Ok(UnitFormat::Conventional),
            other => Err(format!("invalid unit format: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DataSizeUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
    Petabyte,
}

impl DataSizeUnit {
    /// Largest first.
    pub const DESCENDING: [DataSizeUnit; 6] = [
        DataSizeUnit::Petabyte,
        DataSizeUnit::Terabyte,
        DataSizeUnit::Gigabyte,
        DataSizeUnit::Megabyte,
        DataSizeUnit::Kilobyte,
        DataSizeUnit::Byte,
    ];

    pub const fn byte_count(self) -> u64 {
        match self {
            DataSizeUnit::Byte => 1,
            DataSizeUnit::Kilobyte => 1_000,
            DataSizeUnit::Megabyte => 1_000_000,
            DataSizeUnit::Gigabyte => 1_000_000_000,
            DataSizeUnit::Terabyte => 1_000_000_000_000,
            DataSizeUnit::Petabyte => 1_000_000_000_000_000,
        }
    }

    pub fn label(self, format: UnitFormat) -> &'static str {
        match (self, format) {
            (DataSizeUnit::Byte, UnitFormat::Short) => "B",
            (DataSizeUnit::Byte, _) => "bytes",
            (DataSizeUnit::Kilobyte, UnitFormat::Long) => "kilobytes",
            (DataSizeUnit::Kilobyte, _) => "KB",
            (DataSizeUnit::Megabyte, UnitFormat::Long) => "megabytes",
            (DataSizeUnit::Megabyte, _) => "MB",
            (DataSizeUnit::Gigabyte, UnitFormat::Long) => "gigabytes",
            (DataSizeUnit::Gigabyte, _) => "GB",
            (DataSizeUnit::Terabyte, UnitFormat::Long) => "terabytes",
            (DataSizeUnit::Terabyte, _) => "TB",
            (DataSizeUnit::Petabyte, UnitFormat::Long) => "petabytes",
            (DataSizeUnit::Petabyte, _) => "PB",
        }
    }

    /// Largest unit not exceeding `bytes` (Byte for 0).
    pub fn for_bytes(bytes: u64) -> Self {
        Self::DESCENDING
            .into_iter()
            .find(|u| bytes >= u.byte_count())
            .unwrap_or(DataSizeUnit::Byte)
    }
}

impl fmt::Display for DataSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(UnitFormat::Short))
    }
}

/// Format `bytes` in the largest fitting unit with `decimals` fraction digits.
pub fn format_data_size(bytes: u64, decimals: usize, format: UnitFormat) -> String {
    let unit = DataSizeUnit::for_bytes(bytes);
    let per = unit.byte_count();
    let value = (bytes / per) as f64 + (bytes % per) as f64 / per as f64;
    let decimals = if unit == DataSizeUnit::Byte { 0 } else { decimals };
    format!("{:.*} {}", decimals, value, unit.label(format))
}

/// Convenience on byte counts.
pub trait DataSize {
    fn data_size_string(&self, decimals: usize, format: UnitFormat) -> String;
}

impl DataSize for u64 {
    fn data_size_string(&self, decimals: usize, format: UnitFormat) -> String {
        format_data_size(*self, decimals, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_fitting_unit() {
        assert_eq!(DataSizeUnit::for_bytes(0), DataSizeUnit::Byte);
        assert_eq!(DataSizeUnit::for_bytes(999), DataSizeUnit::Byte);
        assert_eq!(DataSizeUnit::for_bytes(1_000), DataSizeUnit::Kilobyte);
        assert_eq!(DataSizeUnit::for_bytes(2_500_000_000), DataSizeUnit::Gigabyte);
        assert_eq!(DataSizeUnit::for_bytes(u64::MAX), DataSizeUnit::Petabyte);
    }

    #[test]
    fn formats() {
        assert_eq!(format_data_size(512, 2, UnitFormat::Conventional), "512 bytes");
        assert_eq!(format_data_size(512, 2, UnitFormat::Short), "512 B");
        assert_eq!(format_data_size(1_250_000, 2, UnitFormat::Short), "1.25 MB");
        assert_eq!(format_data_size(1_240_000, 1, UnitFormat::Long), "1.2 megabytes");
        assert_eq!(format_data_size(3_000, 0, UnitFormat::Conventional), "3 KB");
        assert_eq!(7_000_000_000_000u64.data_size_string(1, UnitFormat::Long), "7.0 terabytes");
    }

    #[test]
    fn parse_unit_format() {
        assert_eq!("LONG".parse::<UnitFormat>().unwrap(), UnitFormat::Long);
        assert!("huge".parse::<UnitFormat>().is_err());
    }
}
