//! Period id parsing and validation.
//!
//! A period id identifies one game round: a `YYYYMMDDHHMMSS` base
//! timestamp followed by a zero-padded run number. Uniqueness is only
//! guaranteed within one source image; the commit coordinator offers
//! optional dedupe for downstreams that reject repeats.

use serde::{Deserialize, Serialize};

/// Minimum accepted length. 14 digits is a bare timestamp with no
/// run number.
pub const MIN_LEN: usize = 14;

/// Maximum accepted length (timestamp plus up to five run digits).
pub const MAX_LEN: usize = 19;

/// Components of a parsed period id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodParts {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Run number within the day; 0 when absent
    pub run: u32,
}

/// Parse a period id into its components.
///
/// Returns `None` when the string is not all digits, has an
/// implausible length, or any timestamp field is out of range.
pub fn parse_period_id(period_id: &str) -> Option<PeriodParts> {
    let cleaned: String = period_id.split_whitespace().collect();

    if cleaned.len() < MIN_LEN || cleaned.len() > MAX_LEN {
        return None;
    }
    if !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let field = |range: std::ops::Range<usize>| cleaned[range].parse::<u32>().ok();

    let parts = PeriodParts {
        year: field(0..4)? as u16,
        month: field(4..6)? as u8,
        day: field(6..8)? as u8,
        hour: field(8..10)? as u8,
        minute: field(10..12)? as u8,
        second: field(12..14)? as u8,
        run: if cleaned.len() > 14 {
            field(14..cleaned.len())?
        } else {
            0
        },
    };

    let plausible = (2000..=2100).contains(&parts.year)
        && (1..=12).contains(&parts.month)
        && (1..=31).contains(&parts.day)
        && parts.hour <= 23
        && parts.minute <= 59
        && parts.second <= 59;

    plausible.then_some(parts)
}

/// Check whether a string is a plausible period id.
pub fn is_valid_period_id(period_id: &str) -> bool {
    parse_period_id(period_id).is_some()
}

/// Format a period id for display: `YYYY-MM-DD HH:MM:SS #run`.
pub fn format_period_display(period_id: &str) -> Option<String> {
    let p = parse_period_id(period_id)?;
    Some(format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} #{}",
        p.year, p.month, p.day, p.hour, p.minute, p.second, p.run
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_period() {
        let parts = parse_period_id("20240105130200123").unwrap();
        assert_eq!(parts.year, 2024);
        assert_eq!(parts.month, 1);
        assert_eq!(parts.day, 5);
        assert_eq!(parts.hour, 13);
        assert_eq!(parts.minute, 2);
        assert_eq!(parts.second, 0);
        assert_eq!(parts.run, 123);
    }

    #[test]
    fn test_parse_bare_timestamp() {
        let parts = parse_period_id("20240105130200").unwrap();
        assert_eq!(parts.run, 0);
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(!is_valid_period_id("2024010513020x123"));
        assert!(!is_valid_period_id(""));
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(!is_valid_period_id("20240105"));
        assert!(!is_valid_period_id("20240105130200123456"));
    }

    #[test]
    fn test_rejects_implausible_fields() {
        // Month 13
        assert!(!is_valid_period_id("20241305130200123"));
        // Hour 25
        assert!(!is_valid_period_id("20240105250200123"));
        // Year 1999
        assert!(!is_valid_period_id("19990105130200123"));
    }

    #[test]
    fn test_ignores_whitespace() {
        assert!(is_valid_period_id("2024 0105 1302 00123"));
    }

    #[test]
    fn test_format_display() {
        assert_eq!(
            format_period_display("20240105130200123").as_deref(),
            Some("2024-01-05 13:02:00 #123")
        );
        assert!(format_period_display("garbage").is_none());
    }
}
