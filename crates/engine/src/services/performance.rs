use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, Result};

/// Attempt marks that count as a foul. Case-insensitive.
const FOUL_MARKERS: [&str; 2] = ["F", "X"];
/// Attempt marks that count as a pass. Case-insensitive.
const PASS_MARKERS: [&str; 2] = ["-", "P"];

/// Maximum attempts a jump/throw entrant gets in one round.
pub const MAX_ATTEMPTS: usize = 6;

/// Parses a `hours:minutes:seconds:hundredths` clock string into total
/// seconds. Malformed input is an error, never a silent zero: a corrupted
/// row must be rejected by the caller instead of ranking as a zero time.
pub fn parse_clock(raw: &str) -> Result<Decimal> {
    let fields: Vec<&str> = raw.trim().split(':').collect();
    if fields.len() != 4 {
        return Err(EngineError::Validation(format!(
            "Clock value '{}' must have the form hh:mm:ss:cc",
            raw.trim()
        )));
    }

    let mut parts = [0u64; 4];
    for (i, field) in fields.iter().enumerate() {
        parts[i] = field.parse::<u64>().map_err(|_| {
            EngineError::Validation(format!("Clock field '{}' in '{}' is not numeric", field, raw.trim()))
        })?;
    }

    let [hours, minutes, seconds, hundredths] = parts;
    if minutes >= 60 || seconds >= 60 {
        return Err(EngineError::Validation(format!(
            "Clock value '{}' has minutes or seconds outside 0-59",
            raw.trim()
        )));
    }
    if hundredths >= 100 {
        return Err(EngineError::Validation(format!(
            "Clock value '{}' has hundredths outside 0-99",
            raw.trim()
        )));
    }

    let whole = hours * 3600 + minutes * 60 + seconds;
    Ok(Decimal::from(whole) + Decimal::new(hundredths as i64, 2))
}

/// Canonical inverse of [`parse_clock`]: zero-padded `hh:mm:ss:cc`.
pub fn format_clock(value: Decimal) -> String {
    let total_hundredths = (value * Decimal::from(100u32))
        .round()
        .to_u64()
        .unwrap_or(0);
    let hours = total_hundredths / 360_000;
    let minutes = total_hundredths % 360_000 / 6_000;
    let seconds = total_hundredths % 6_000 / 100;
    let hundredths = total_hundredths % 100;
    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, hundredths)
}

/// Parses one jump/throw attempt: a decimal meters value, or a foul/pass
/// marker which yields `None` ("no valid attempt") rather than zero.
pub fn parse_distance(raw: &str) -> Result<Option<Decimal>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(
            "Empty distance mark".to_string(),
        ));
    }

    let upper = trimmed.to_uppercase();
    if FOUL_MARKERS.contains(&upper.as_str()) || PASS_MARKERS.contains(&upper.as_str()) {
        return Ok(None);
    }

    let value: Decimal = trimmed.parse().map_err(|_| {
        EngineError::Validation(format!("Distance mark '{}' is not a decimal meters value", trimmed))
    })?;
    if value.is_sign_negative() {
        return Err(EngineError::Validation(format!(
            "Distance mark '{}' must be non-negative",
            trimmed
        )));
    }

    Ok(Some(value.round_dp(2)))
}

/// Best of up to six attempts. All fouls/passes produce `None`: a six-foul
/// series has no comparable value and ranks below every valid distance.
pub fn best_attempt(attempts: &[String]) -> Result<Option<Decimal>> {
    if attempts.is_empty() {
        return Err(EngineError::Validation(
            "At least one attempt mark is required".to_string(),
        ));
    }
    if attempts.len() > MAX_ATTEMPTS {
        return Err(EngineError::Validation(format!(
            "At most {} attempts are allowed, got {}",
            MAX_ATTEMPTS,
            attempts.len()
        )));
    }

    let mut best: Option<Decimal> = None;
    for attempt in attempts {
        if let Some(distance) = parse_distance(attempt)? {
            best = Some(match best {
                Some(current) if current >= distance => current,
                _ => distance,
            });
        }
    }
    Ok(best)
}

/// Parses a combined-event score: a non-negative integer points total.
pub fn parse_points(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    let points = trimmed.parse::<u32>().map_err(|_| {
        EngineError::Validation(format!(
            "Points value '{}' is not a non-negative integer",
            trimmed
        ))
    })?;
    Ok(Decimal::from(points))
}

pub fn format_distance(value: Decimal) -> String {
    format!("{:.2}", value)
}

pub fn format_points(value: Decimal) -> String {
    value.trunc().to_u64().unwrap_or(0).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_to_total_seconds() {
        assert_eq!(parse_clock("00:00:10:50").unwrap(), Decimal::new(1050, 2));
        assert_eq!(parse_clock("00:00:10:80").unwrap(), Decimal::new(1080, 2));
        assert_eq!(
            parse_clock("01:02:03:04").unwrap(),
            Decimal::from(3723u32) + Decimal::new(4, 2)
        );
    }

    #[test]
    fn test_parse_clock_rejects_malformed_input() {
        assert!(parse_clock("00:10:50").is_err());
        assert!(parse_clock("aa:bb:cc:dd").is_err());
        assert!(parse_clock("00:00:75:00").is_err());
        assert!(parse_clock("00:61:00:00").is_err());
        assert!(parse_clock("00:00:10:120").is_err());
        assert!(parse_clock("").is_err());
    }

    #[test]
    fn test_format_clock_is_canonical_inverse() {
        let parsed = parse_clock("00:12:34:56").unwrap();
        assert_eq!(format_clock(parsed), "00:12:34:56");
        assert_eq!(format_clock(Decimal::new(1050, 2)), "00:00:10:50");
    }

    #[test]
    fn test_parse_distance_value() {
        assert_eq!(parse_distance("7.45").unwrap(), Some(Decimal::new(745, 2)));
        assert_eq!(parse_distance(" 6.1 ").unwrap(), Some(Decimal::new(610, 2)));
    }

    #[test]
    fn test_foul_and_pass_markers_are_no_attempt() {
        assert_eq!(parse_distance("F").unwrap(), None);
        assert_eq!(parse_distance("x").unwrap(), None);
        assert_eq!(parse_distance("-").unwrap(), None);
        assert_eq!(parse_distance("p").unwrap(), None);
    }

    #[test]
    fn test_parse_distance_rejects_garbage() {
        assert!(parse_distance("seven").is_err());
        assert!(parse_distance("-3.2").is_err());
        assert!(parse_distance("").is_err());
    }

    #[test]
    fn test_best_attempt_picks_maximum_valid() {
        let attempts: Vec<String> = ["6.90", "F", "7.45", "7.10"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(best_attempt(&attempts).unwrap(), Some(Decimal::new(745, 2)));
    }

    #[test]
    fn test_six_fouls_have_no_comparable_value() {
        let attempts = vec!["F".to_string(); 6];
        assert_eq!(best_attempt(&attempts).unwrap(), None);
    }

    #[test]
    fn test_best_attempt_bounds_attempt_count() {
        assert!(best_attempt(&[]).is_err());
        assert!(best_attempt(&vec!["7.00".to_string(); 7]).is_err());
    }

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_points("7450").unwrap(), Decimal::from(7450u32));
        assert!(parse_points("-10").is_err());
        assert!(parse_points("12.5").is_err());
    }
}
