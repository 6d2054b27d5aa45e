//! String to number and date conversion.
//!
//! Each helper accepts the resolved string for one key and reports failures
//! as an invalid value on that key. Surrounding whitespace is ignored; any
//! other trailing text is an error.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::schema::Key;
use crate::error::ConfigError;

/// Parses a finite floating point value.
///
/// # Errors
///
/// Returns an invalid-value error naming `key` if the text is empty, not a
/// number, or not finite.
pub fn float(key: Key, raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| key.invalid(raw, "expected a number"))?;
    if !value.is_finite() {
        return Err(key.invalid(raw, "expected a finite number"));
    }
    Ok(value)
}

/// Parses a signed integer.
///
/// # Errors
///
/// Returns an invalid-value error naming `key` if the text is not an
/// integer in `i32` range.
pub fn int(key: Key, raw: &str) -> Result<i32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| key.invalid(raw, "expected an integer"))
}

/// Parses an unsigned byte (`0..=255`).
///
/// # Errors
///
/// Returns an invalid-value error naming `key` if the text is not an
/// integer between 0 and 255.
pub fn byte(key: Key, raw: &str) -> Result<u8, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| key.invalid(raw, "expected an integer between 0 and 255"))
}

/// Parses a model date, `MM/DD/YYYY-HH` or `MM/DD/YYYY-HH:MM:SS`.
///
/// # Errors
///
/// Returns an invalid-value error naming `key` if the text does not follow
/// either layout or names an impossible calendar time.
pub fn date(key: Key, raw: &str) -> Result<NaiveDateTime, ConfigError> {
    let err = || key.invalid(raw, "expected a date as MM/DD/YYYY-HH or MM/DD/YYYY-HH:MM:SS");
    let text = raw.trim();
    let (day, clock) = text.split_once('-').ok_or_else(err)?;

    let day = NaiveDate::parse_from_str(day, "%m/%d/%Y").map_err(|_| err())?;

    let mut fields = clock.split(':');
    let mut next = |required: bool| -> Result<u32, ConfigError> {
        match fields.next() {
            Some(f) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => {
                f.parse().map_err(|_| err())
            }
            None if !required => Ok(0),
            _ => Err(err()),
        }
    };
    let hour = next(true)?;
    let minute = next(false)?;
    let second = next(false)?;
    if fields.next().is_some() || clock.matches(':').count() == 1 {
        return Err(err());
    }

    day.and_hms_opt(hour, minute, second).ok_or_else(err)
}

/// Returns the trimmed text, failing if nothing is left.
///
/// # Errors
///
/// Returns an invalid-value error naming `key` for empty or blank text.
pub fn non_empty(key: Key, raw: &str) -> Result<String, ConfigError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(key.invalid(raw, "a value is required"));
    }
    Ok(text.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_accepts_plain_and_exponent_forms() {
        assert_eq!(float(Key::GridSpacing, "90").unwrap(), 90.0);
        assert_eq!(float(Key::GridSpacing, " 2.5e1 ").unwrap(), 25.0);
        assert_eq!(float(Key::ExtremeNorth, "-12.75").unwrap(), -12.75);
    }

    #[test]
    fn test_float_rejects_garbage_and_non_finite() {
        for raw in ["", "abc", "10m", "inf", "NaN"] {
            let err = float(Key::GridSpacing, raw).unwrap_err();
            assert_eq!(err.key(), Some("GRID SPACING"), "input {raw:?}");
        }
    }

    #[test]
    fn test_int() {
        assert_eq!(int(Key::NumberOfRows, "  120").unwrap(), 120);
        assert!(int(Key::NumberOfRows, "12.5").is_err());
        assert!(int(Key::NumberOfRows, "").is_err());
    }

    #[test]
    fn test_byte_range() {
        assert_eq!(byte(Key::OutsideBasinValue, "0").unwrap(), 0);
        assert_eq!(byte(Key::OutsideBasinValue, "255").unwrap(), 255);
        assert!(byte(Key::OutsideBasinValue, "256").is_err());
        assert!(byte(Key::OutsideBasinValue, "-1").is_err());
    }

    #[test]
    fn test_date_hour_only() {
        let d = date(Key::ModelStart, "10/01/1996-00").unwrap();
        assert_eq!(d.to_string(), "1996-10-01 00:00:00");
    }

    #[test]
    fn test_date_with_minutes_and_seconds() {
        let d = date(Key::ModelEnd, "02/28/2001-23:30:15").unwrap();
        assert_eq!(d.to_string(), "2001-02-28 23:30:15");
    }

    #[test]
    fn test_date_rejects_bad_layouts() {
        for raw in [
            "",
            "1996-10-01",
            "10/01/1996",
            "13/01/1996-00",
            "02/30/2001-00",
            "10/01/1996-24",
            "10/01/1996-12:30",
            "10/01/1996-12:30:00:00",
            "10/01/1996-ab",
        ] {
            let err = date(Key::ModelStart, raw).unwrap_err();
            assert_eq!(err.key(), Some("MODEL START"), "input {raw:?}");
        }
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Key::CoordinateSystem, " UTM ").unwrap(), "UTM");
        assert!(non_empty(Key::CoordinateSystem, "   ").is_err());
    }
}
