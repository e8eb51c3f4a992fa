use chrono::{DateTime, Duration, Utc};

use crate::error::AppError;

/// Parses a duration string of the form `1y2mo3w4d5h6m7s`.
///
/// Every component is an integer followed by a unit; units may appear in any
/// order. A year counts as 365 days and a month as 30 days.
pub fn parse_duration(input: &str) -> Result<Duration, AppError> {
    let invalid = || AppError::InvalidDuration(input.to_string());

    if input.is_empty() {
        return Err(invalid());
    }

    let mut total = Duration::zero();
    let mut chars = input.chars().peekable();

    while chars.peek().is_some() {
        let mut number = String::new();
        while let Some(c) = chars.peek() {
            if c.is_ascii_digit() {
                number.push(*c);
                chars.next();
            } else {
                break;
            }
        }
        let amount: i64 = number.parse().map_err(|_| invalid())?;

        let mut unit = String::new();
        while let Some(c) = chars.peek() {
            if c.is_ascii_alphabetic() {
                unit.push(*c);
                chars.next();
            } else {
                break;
            }
        }

        let component = match unit.as_str() {
            "y" => Duration::days(amount * 365),
            "mo" => Duration::days(amount * 30),
            "w" => Duration::weeks(amount),
            "d" => Duration::days(amount),
            "h" => Duration::hours(amount),
            "m" => Duration::minutes(amount),
            "s" => Duration::seconds(amount),
            _ => return Err(invalid()),
        };
        total = total + component;
    }

    Ok(total)
}

/// Computes the cut-off timestamp for an `--older-than` flag value.
///
/// An empty value means "now": everything already in the cluster counts as
/// older.
pub fn cutoff(older_than: &str) -> Result<DateTime<Utc>, AppError> {
    if older_than.is_empty() {
        return Ok(Utc::now());
    }
    Ok(Utc::now() - parse_duration(older_than)?)
}
