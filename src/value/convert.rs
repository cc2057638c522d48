//! Generic value conversion.
//!
//! `convert` coerces an arbitrary runtime [`Value`] to a requested
//! [`TargetType`]. The rules are applied in a fixed order:
//!
//! 1. Null input converts to the target's default value (or stays null for
//!    nullable targets).
//! 2. A value already in the target's type family is returned as-is.
//! 3. Lossless coercions between families (int to float, bool to int,
//!    date to datetime, any scalar to text).
//! 4. Textual input is parsed per target family (bool, integer, byte,
//!    float, char, date, datetime, time, enum member).
//! 5. Anything else fails with a `ConversionError` naming the source value
//!    and the target type.
//!
//! Every input either converts or fails explicitly; there is no silent
//! truncation (float-to-int requires an integral value, byte parsing is
//! range-checked).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use super::{EnumType, TargetType, Value};

/// Result type for conversions.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Errors raised when a value cannot be coerced to a target type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// No conversion rule applies.
    #[error("cannot convert {kind} value '{value}' to {target}")]
    Unconvertible {
        kind: &'static str,
        value: String,
        target: String,
    },

    /// The value is numerically valid but outside the target's range.
    #[error("value '{value}' is out of range for {target}")]
    OutOfRange { value: String, target: String },

    /// The value names no member of the target enumeration.
    #[error("'{value}' is not a member of enum {ty}")]
    UnknownEnumMember { value: String, ty: String },
}

fn unconvertible(value: &Value, target: &TargetType) -> ConversionError {
    ConversionError::Unconvertible {
        kind: value.type_name(),
        value: value.to_string(),
        target: target.to_string(),
    }
}

/// Coerce `value` to `target`.
pub fn convert(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    // Unwrap nullability first: a null converts to null, anything else
    // converts against the underlying target.
    if let TargetType::Nullable(inner) = target {
        return match value {
            Value::Null => Ok(Value::Null),
            other => convert(other, inner),
        };
    }

    if value.is_null() {
        return Ok(target.default_value());
    }

    if target.accepts(value) {
        return Ok(value.clone());
    }

    match target {
        TargetType::Bool => convert_bool(value, target),
        TargetType::Int => convert_int(value, target),
        TargetType::Byte => convert_byte(value, target),
        TargetType::Char => convert_char(value, target),
        TargetType::Float | TargetType::Decimal => convert_float(value, target),
        TargetType::Text => Ok(Value::Text(value.to_string())),
        TargetType::Date => convert_date(value, target),
        TargetType::DateTime => convert_datetime(value, target),
        TargetType::Time => convert_time(value, target),
        TargetType::Enum(ty) => convert_enum(value, ty, target),
        TargetType::Nullable(_) => unreachable!("nullable unwrapped above"),
    }
}

fn convert_bool(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    match value {
        Value::Int(i) => Ok(Value::Bool(*i != 0)),
        Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(unconvertible(value, target)),
        },
        _ => Err(unconvertible(value, target)),
    }
}

fn convert_int(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    match value {
        // Passthrough so narrower targets (byte) can range-check the result.
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Bool(b) => Ok(Value::Int(*b as i64)),
        // Only integral floats convert; fractional values would truncate.
        Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(Value::Int(*f as i64)),
        Value::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| unconvertible(value, target)),
        _ => Err(unconvertible(value, target)),
    }
}

fn convert_byte(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    let converted = convert_int(value, target)?;
    match converted {
        Value::Int(i) if (0..=255).contains(&i) => Ok(Value::Int(i)),
        Value::Int(i) => Err(ConversionError::OutOfRange {
            value: i.to_string(),
            target: target.to_string(),
        }),
        _ => Err(unconvertible(value, target)),
    }
}

fn convert_char(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    match value {
        Value::Text(s) if s.chars().count() == 1 => Ok(Value::Text(s.clone())),
        _ => Err(unconvertible(value, target)),
    }
}

fn convert_float(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    match value {
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Bool(b) => Ok(Value::Float(*b as i64 as f64)),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| unconvertible(value, target)),
        _ => Err(unconvertible(value, target)),
    }
}

fn convert_date(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    match value {
        Value::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| unconvertible(value, target)),
        _ => Err(unconvertible(value, target)),
    }
}

fn convert_datetime(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    match value {
        // A bare date widens to midnight.
        Value::Date(d) => Ok(Value::DateTime(d.and_time(NaiveTime::default()))),
        Value::Text(s) => {
            let trimmed = s.trim();
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
                .map(Value::DateTime)
                .or_else(|_| {
                    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                        .map(|d| Value::DateTime(d.and_time(NaiveTime::default())))
                })
                .map_err(|_| unconvertible(value, target))
        }
        _ => Err(unconvertible(value, target)),
    }
}

fn convert_time(value: &Value, target: &TargetType) -> ConversionResult<Value> {
    match value {
        Value::Text(s) => {
            let trimmed = s.trim();
            NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
                .map(Value::Time)
                .map_err(|_| unconvertible(value, target))
        }
        _ => Err(unconvertible(value, target)),
    }
}

fn convert_enum(value: &Value, ty: &EnumType, target: &TargetType) -> ConversionResult<Value> {
    match value {
        // Case-sensitive exact match against the defined member names.
        Value::Text(s) => match ty.member(s) {
            Some(m) => Ok(Value::Enum {
                ty: ty.name.clone(),
                member: m.name.clone(),
            }),
            None => Err(ConversionError::UnknownEnumMember {
                value: s.clone(),
                ty: ty.name.clone(),
            }),
        },
        // Ordinal position, matching underlying-value enum casts.
        Value::Int(i) => {
            let index = usize::try_from(*i).ok();
            match index.and_then(|i| ty.members.get(i)) {
                Some(m) => Ok(Value::Enum {
                    ty: ty.name.clone(),
                    member: m.name.clone(),
                }),
                None => Err(ConversionError::UnknownEnumMember {
                    value: i.to_string(),
                    ty: ty.name.clone(),
                }),
            }
        }
        _ => Err(unconvertible(value, target)),
    }
}
