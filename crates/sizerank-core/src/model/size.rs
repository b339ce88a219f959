/// Size units and formatting -- human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary, so unit choice can never change
/// how results are ranked.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display unit for byte counts (binary multiples of 1024).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeUnit {
    Bytes,
    #[default]
    KiB,
    MiB,
    GiB,
}

impl SizeUnit {
    /// Every unit, smallest first. Handy for populating selectors.
    pub const ALL: [SizeUnit; 4] = [Self::Bytes, Self::KiB, Self::MiB, Self::GiB];

    /// Number of bytes in one of this unit (`1024^k`).
    pub fn factor(self) -> u64 {
        match self {
            Self::Bytes => 1,
            Self::KiB => 1 << 10,
            Self::MiB => 1 << 20,
            Self::GiB => 1 << 30,
        }
    }

    /// Short suffix used in formatted output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bytes => "B",
            Self::KiB => "KiB",
            Self::MiB => "MiB",
            Self::GiB => "GiB",
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a unit name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown size unit `{0}` (expected B, KiB, MiB or GiB)")]
pub struct ParseUnitError(String);

impl FromStr for SizeUnit {
    type Err = ParseUnitError;

    /// Accepts binary (`KiB`) and common short (`KB`) spellings, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "byte" | "bytes" => Ok(Self::Bytes),
            "k" | "kb" | "kib" => Ok(Self::KiB),
            "m" | "mb" | "mib" => Ok(Self::MiB),
            "g" | "gb" | "gib" => Ok(Self::GiB),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

/// Convert a byte count into `unit`. No rounding is applied.
pub fn convert_size(bytes: u64, unit: SizeUnit) -> f64 {
    bytes as f64 / unit.factor() as f64
}

/// Format a byte count in `unit` with two decimals and thousands separators,
/// e.g. `1,234.50 KiB`.
pub fn format_size(bytes: u64, unit: SizeUnit) -> String {
    let fixed = format!("{:.2}", convert_size(bytes, unit));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}.{} {}", group_digits(int_part), frac_part, unit.label())
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    group_digits(&count.to_string())
}

/// Insert a comma every three digits, counting from the right.
fn group_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_exact_units() {
        assert_eq!(convert_size(1024, SizeUnit::KiB), 1.0);
        assert_eq!(convert_size(1024 * 1024, SizeUnit::MiB), 1.0);
        assert_eq!(convert_size(1 << 30, SizeUnit::GiB), 1.0);
        assert_eq!(convert_size(1536, SizeUnit::KiB), 1.5);
        assert_eq!(convert_size(777, SizeUnit::Bytes), 777.0);
    }

    #[test]
    fn test_convert_zero_any_unit() {
        for unit in SizeUnit::ALL {
            assert_eq!(convert_size(0, unit), 0.0);
        }
    }

    #[test]
    fn test_format_size_two_decimals() {
        assert_eq!(format_size(0, SizeUnit::KiB), "0.00 KiB");
        assert_eq!(format_size(512, SizeUnit::Bytes), "512.00 B");
        assert_eq!(format_size(1536, SizeUnit::KiB), "1.50 KiB");
        assert_eq!(format_size(1_048_576, SizeUnit::MiB), "1.00 MiB");
    }

    #[test]
    fn test_format_size_groups_thousands() {
        assert_eq!(format_size(1_234_567, SizeUnit::Bytes), "1,234,567.00 B");
        assert_eq!(format_size(1024 * 1234 + 512, SizeUnit::KiB), "1,234.50 KiB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("KiB".parse::<SizeUnit>(), Ok(SizeUnit::KiB));
        assert_eq!("mb".parse::<SizeUnit>(), Ok(SizeUnit::MiB));
        assert_eq!(" GB ".parse::<SizeUnit>(), Ok(SizeUnit::GiB));
        assert_eq!("bytes".parse::<SizeUnit>(), Ok(SizeUnit::Bytes));
        assert!("TB".parse::<SizeUnit>().is_err());
    }

    #[test]
    fn test_default_unit_is_kib() {
        assert_eq!(SizeUnit::default(), SizeUnit::KiB);
    }
}
