//! The standard function library

use super::function::{FunctionError, FunctionRegistry, FunctionResult};
use crate::model::Value;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Seconds between the NTP epoch (1900-01-01) and the Unix epoch.
const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

/// Register the standard library into the given registry.
pub fn register(registry: &mut FunctionRegistry) {
    registry.register("to_int", 1, to_int);
    registry.register("to_str", 1, to_str);
    registry.register("time_since_epoch", 3, time_since_epoch);
}

/// `to_int(v)`: integers pass through; strings must parse as a signed
/// decimal integer. Floats and float-shaped strings are refused, as is
/// anything beyond the i64 range.
fn to_int(args: &[Value]) -> FunctionResult<Value> {
    match &args[0] {
        Value::Integer(i) => Ok(Value::Integer(*i)),
        Value::String(s) => s.parse::<i64>().map(Value::Integer).map_err(|_| {
            FunctionError::InvalidArgument {
                name: "to_int".to_string(),
                message: format!("value `{s}` could not be cast to int"),
            }
        }),
        other => Err(FunctionError::InvalidArgument {
            name: "to_int".to_string(),
            message: format!("value `{other}` could not be cast to int"),
        }),
    }
}

/// `to_str(v)`: succeeds only when `v` is already a string.
fn to_str(args: &[Value]) -> FunctionResult<Value> {
    match &args[0] {
        Value::String(s) => Ok(Value::String(s.clone())),
        other => Err(FunctionError::InvalidArgument {
            name: "to_str".to_string(),
            message: format!("value `{other}` could not be cast to string"),
        }),
    }
}

/// `time_since_epoch(ts, format, units)`: interprets `ts` as a timestamp
/// in `format` and returns the time since the Unix epoch in the requested
/// units.
///
/// Format can be `"ntp"`, `"rfc3339"`, or any strftime layout understood
/// by chrono. Units can be `"s"`, `"ms"` or `"ns"`.
fn time_since_epoch(args: &[Value]) -> FunctionResult<Value> {
    let name = "time_since_epoch";
    let format = expect_string(name, &args[1], "format")?;
    let units = expect_string(name, &args[2], "units")?;
    let Value::String(timestamp) = &args[0] else {
        return Err(FunctionError::InvalidArgument {
            name: name.to_string(),
            message: format!(
                "requested {} to unix conversion, but `{}` is not a {} formatted string",
                format, args[0], format
            ),
        });
    };

    let instant: DateTime<Utc> = match format {
        "ntp" => parse_ntp(name, timestamp)?,
        "rfc3339" => DateTime::parse_from_rfc3339(timestamp)
            .map_err(|err| parse_failure(name, timestamp, format, err))?
            .with_timezone(&Utc),
        layout => NaiveDateTime::parse_from_str(timestamp, layout)
            .map_err(|err| parse_failure(name, timestamp, layout, err))?
            .and_utc(),
    };

    let since_epoch = match units {
        "s" => instant.timestamp(),
        "ms" => instant.timestamp_millis(),
        "ns" => instant
            .timestamp_nanos_opt()
            .ok_or_else(|| FunctionError::InvalidArgument {
                name: name.to_string(),
                message: format!("timestamp `{timestamp}` is out of range for nanosecond units"),
            })?,
        other => {
            return Err(FunctionError::InvalidArgument {
                name: name.to_string(),
                message: format!("unrecognised unit `{other}`"),
            });
        }
    };
    Ok(Value::Integer(since_epoch))
}

/// Parse a 64-bit NTP timestamp given as hex digits, optionally with
/// whitespace between bytes. The high 32 bits are seconds since
/// 1900-01-01, the low 32 bits a binary fraction of a second.
fn parse_ntp(name: &str, timestamp: &str) -> FunctionResult<DateTime<Utc>> {
    let digits: String = timestamp.chars().filter(|c| !c.is_whitespace()).collect();
    let ntp = u64::from_str_radix(&digits, 16).map_err(|_| FunctionError::InvalidArgument {
        name: name.to_string(),
        message: format!("`{timestamp}` is not a hex-encoded NTP timestamp"),
    })?;

    let seconds = (ntp >> 32) as i64 - NTP_UNIX_OFFSET;
    let fractional = ntp & 0xffff_ffff;
    let nanos = (fractional * 1_000_000_000) >> 32;

    DateTime::from_timestamp(seconds, nanos as u32).ok_or_else(|| FunctionError::InvalidArgument {
        name: name.to_string(),
        message: format!("NTP timestamp `{timestamp}` is out of range"),
    })
}

fn expect_string<'a>(name: &str, value: &'a Value, role: &str) -> FunctionResult<&'a str> {
    value.as_str().ok_or_else(|| FunctionError::InvalidArgument {
        name: name.to_string(),
        message: format!("{role} must be a string, got {}", value.type_name()),
    })
}

fn parse_failure(
    name: &str,
    timestamp: &str,
    format: &str,
    err: chrono::ParseError,
) -> FunctionError {
    FunctionError::InvalidArgument {
        name: name.to_string(),
        message: format!("error parsing timestamp `{timestamp}` of format `{format}`: {err}"),
    }
}
