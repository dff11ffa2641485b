//! Forgiving numeric fields for data written by older clients.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Deserialize an amount the way a loosely typed writer meant it: numbers pass
/// through, numeric strings are parsed, and `null`, unparseable text, other
/// JSON types and non-finite values all read as `0.0`.
///
/// ```
/// #[derive(serde::Deserialize)]
/// struct Fill {
///     #[serde(default, deserialize_with = "fleetpulse_domain::number::lenient_f64")]
///     liters: f64,
/// }
///
/// let fill: Fill = serde_json::from_str(r#"{"liters":"32.5"}"#).unwrap();
/// assert_eq!(fill.liters, 32.5);
/// let fill: Fill = serde_json::from_str(r#"{"liters":null}"#).unwrap();
/// assert_eq!(fill.liters, 0.0);
/// ```
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<LooseNumber>::deserialize(deserializer)? {
        Some(LooseNumber::Number(n)) => n,
        Some(LooseNumber::Text(s)) => s.trim().parse().unwrap_or(0.0),
        Some(LooseNumber::Other(_)) | None => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}
