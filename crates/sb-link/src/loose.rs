//! Wire fields whose JSON type varies between link producers.
//!
//! Ports and alter ids show up as `443`, `"443"`, `443.0` or not at all;
//! text fields sometimes arrive as numbers. Nothing here fails: anything
//! unusable collapses to zero, `false` or the empty string.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// A numeric field as it appeared on the wire. Absence is `Option::None`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    /// Native JSON number, integral or not.
    Number(Number),
    /// Quoted number, e.g. `"443"`.
    Text(String),
    /// Bool, array or object.
    Other(IgnoredAny),
}

impl LooseNumber {
    /// Integer value, if the field holds one that fits `i64`.
    ///
    /// Floats truncate toward zero; text must be a plain decimal integer
    /// with an optional sign.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|_| i64::MAX))
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
                }),
            Self::Text(s) => s.parse::<i64>().ok(),
            Self::Other(_) => None,
        }
    }
}

/// Coerce to `u16`; negative, out of range, unparseable or absent yields 0.
///
/// Used for ports: a value above 65535 is treated like an unparseable one
/// rather than kept, so the result is always a usable port number.
pub fn coerce_u16(v: Option<&LooseNumber>) -> u16 {
    v.and_then(LooseNumber::as_i64)
        .and_then(|n| u16::try_from(n).ok())
        .unwrap_or(0)
}

/// Coerce to `u32`; negative, out of range, unparseable or absent yields 0.
pub fn coerce_u32(v: Option<&LooseNumber>) -> u32 {
    v.and_then(LooseNumber::as_i64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

/// Text field: strings pass through, numbers and bools are rendered,
/// anything else (null, arrays, objects) is empty.
pub fn loose_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Flag field: `true`, `"true"` (any case), `"1"` and `1` are set.
pub fn loose_bool<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        Value::Number(n) => n.as_u64() == Some(1),
        _ => false,
    })
}

/// Any scalar rendered as text, used for the payload version.
pub fn loose_opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
