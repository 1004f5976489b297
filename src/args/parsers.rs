use std::time::Duration;

use super::types::{PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

/// Parses a header given as `Key: Value` or `Key=Value`.
///
/// A bare `Key` without a delimiter uses the key as its own value.
///
/// # Errors
///
/// Returns an error when the input is blank or the name is empty.
pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyHeader);
    }

    let delimiter = trimmed.find([':', '=']);
    let (key, value) = match delimiter {
        Some(index) => {
            let (key, rest) = trimmed.split_at(index);
            let value = rest.get(1..).unwrap_or_default();
            (key.trim(), value.trim())
        }
        None => (trimmed, trimmed),
    };

    if key.is_empty() {
        return Err(ValidationError::EmptyHeaderName {
            value: s.to_owned(),
        });
    }
    Ok((key.to_owned(), value.to_owned()))
}

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

const NANOS_PER_SEC: u128 = 1_000_000_000;
/// Fraction digits past this are below one nanosecond for every unit.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses durations such as `250ms`, `1.5s` or `1h2m3s`.
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`, and each segment
/// may carry a decimal fraction. A bare number is seconds and `0` disables.
///
/// # Errors
///
/// Returns an error when the value is empty, malformed, uses an unknown
/// unit, or overflows.
pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let value = s.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::DurationEmpty));
    }

    if value.chars().all(is_number_char) {
        return nanos_to_duration(segment_nanos(value, value, NANOS_PER_SEC)?);
    }

    let mut total: u128 = 0;
    let mut rest = value;
    while !rest.is_empty() {
        let number_len = rest
            .find(|ch: char| !is_number_char(ch))
            .unwrap_or(rest.len());
        let (number, after_number) = rest.split_at(number_len);
        let unit_len = after_number.find(is_number_char).unwrap_or(after_number.len());
        let (unit, next) = after_number.split_at(unit_len);

        if number.is_empty() || unit.is_empty() {
            return Err(invalid_format(value));
        }
        let nanos = segment_nanos(value, number, unit_nanos(unit)?)?;
        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = next;
    }

    nanos_to_duration(total)
}

const fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn unit_nanos(unit: &str) -> AppResult<u128> {
    match unit {
        "ns" => Ok(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Ok(1_000),
        "ms" => Ok(1_000_000),
        "s" => Ok(NANOS_PER_SEC),
        "m" => Ok(60_000_000_000),
        "h" => Ok(3_600_000_000_000),
        _ => Err(AppError::validation(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        })),
    }
}

// `number` is `<digits>[.<digits>]` with at least one digit on either side.
fn segment_nanos(value: &str, number: &str, scale: u128) -> AppResult<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(invalid_format(value));
    }

    let whole_nanos = if whole.is_empty() {
        0
    } else {
        parse_digits(value, whole)?
            .checked_mul(scale)
            .ok_or_else(overflow)?
    };

    let fraction = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    let fraction_nanos = if fraction.is_empty() {
        0
    } else {
        let places = u32::try_from(fraction.len()).map_err(|_err| overflow())?;
        let divisor = 10u128.checked_pow(places).ok_or_else(overflow)?;
        parse_digits(value, fraction)?
            .checked_mul(scale)
            .and_then(|scaled| scaled.checked_div(divisor))
            .ok_or_else(overflow)?
    };

    whole_nanos.checked_add(fraction_nanos).ok_or_else(overflow)
}

fn parse_digits(value: &str, digits: &str) -> AppResult<u128> {
    digits.parse::<u128>().map_err(|err| {
        AppError::validation(ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
    })
}

fn nanos_to_duration(total: u128) -> AppResult<Duration> {
    let secs = total
        .checked_div(NANOS_PER_SEC)
        .and_then(|secs| u64::try_from(secs).ok())
        .ok_or_else(overflow)?;
    let nanos = total
        .checked_rem(NANOS_PER_SEC)
        .and_then(|nanos| u32::try_from(nanos).ok())
        .ok_or_else(overflow)?;
    Ok(Duration::new(secs, nanos))
}

fn invalid_format(value: &str) -> AppError {
    AppError::validation(ValidationError::InvalidDurationFormat {
        value: value.to_owned(),
    })
}

fn overflow() -> AppError {
    AppError::validation(ValidationError::DurationOverflow)
}
