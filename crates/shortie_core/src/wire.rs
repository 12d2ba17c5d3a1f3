//! JSON contract of the remote shortening and analytics endpoints.
//!
//! Bodies are validated here and turned into typed results; anything that does
//! not match the contract becomes a [`WireError`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{DailyVisit, ShortenResult, StatsResult, TopIpEntry};

/// Value of the `status` field that marks a successful shorten.
pub const SHORTEN_STATUS_OK: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("malformed body: {0}")]
    Malformed(String),
    #[error("service rejected the request (status {status})")]
    Rejected { status: String },
    #[error("missing field `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, Serialize)]
struct ShortenRequestBody<'a> {
    #[serde(rename = "longUrl")]
    long_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ShortenResponseBody {
    #[serde(default)]
    status: Value,
    #[serde(rename = "shortUrl", default)]
    short_url: Option<String>,
    #[serde(rename = "secretUrl", default)]
    secret_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatsResponseBody {
    #[serde(rename = "dailyVisits", default)]
    daily_visits: Value,
    #[serde(rename = "topIps", default)]
    top_ips: Value,
}

#[derive(Debug, Deserialize)]
struct RawDailyVisit {
    date: String,
    count: RawCount,
}

#[derive(Debug, Deserialize)]
struct RawTopIp {
    ip: String,
    count: RawCount,
}

/// Counts arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCount {
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl RawCount {
    fn to_count(&self) -> Option<u64> {
        match self {
            RawCount::Unsigned(value) => Some(*value),
            RawCount::Float(value) => float_to_count(*value),
            RawCount::Text(text) => {
                let text = text.trim();
                text.parse::<u64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(float_to_count))
            }
        }
    }
}

fn float_to_count(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

fn array_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn parse_object<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, WireError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| WireError::Malformed(err.to_string()))?;
    if !value.is_object() {
        return Err(WireError::Malformed("expected a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|err| WireError::Malformed(err.to_string()))
}

/// Serializes the `{ "longUrl": ... }` request body.
pub fn encode_shorten_request(long_url: &str) -> Result<Vec<u8>, WireError> {
    serde_json::to_vec(&ShortenRequestBody { long_url })
        .map_err(|err| WireError::Malformed(err.to_string()))
}

/// Validates a shorten response body.
///
/// Success requires an object whose `status` is the number `0` and which
/// carries both `shortUrl` and `secretUrl`.
pub fn parse_shorten_response(body: &[u8]) -> Result<ShortenResult, WireError> {
    let parsed: ShortenResponseBody = parse_object(body)?;

    let status_ok = parsed.status.as_i64() == Some(SHORTEN_STATUS_OK)
        || parsed.status.as_f64() == Some(SHORTEN_STATUS_OK as f64);
    if !status_ok {
        return Err(WireError::Rejected {
            status: parsed.status.to_string(),
        });
    }

    let short_url = parsed
        .short_url
        .filter(|value| !value.is_empty())
        .ok_or(WireError::MissingField("shortUrl"))?;
    let stats_url = parsed
        .secret_url
        .filter(|value| !value.is_empty())
        .ok_or(WireError::MissingField("secretUrl"))?;

    Ok(ShortenResult {
        short_url,
        stats_url,
    })
}

/// Normalizes an analytics body into a [`StatsResult`].
///
/// Missing, `null` or non-array fields become empty sequences. Entries without a usable
/// label or with a count that is not a non-negative integer are dropped. Only
/// a body that is not a JSON object at all is an error.
pub fn parse_stats_payload(body: &[u8]) -> Result<StatsResult, WireError> {
    let parsed: StatsResponseBody = parse_object(body)?;

    let daily_visits = array_items(parsed.daily_visits)
        .into_iter()
        .filter_map(|value| serde_json::from_value::<RawDailyVisit>(value).ok())
        .filter_map(|raw| {
            raw.count.to_count().map(|count| DailyVisit {
                date: raw.date,
                count,
            })
        })
        .collect();

    let top_ips = array_items(parsed.top_ips)
        .into_iter()
        .filter_map(|value| serde_json::from_value::<RawTopIp>(value).ok())
        .filter_map(|raw| {
            raw.count
                .to_count()
                .map(|count| TopIpEntry { ip: raw.ip, count })
        })
        .collect();

    Ok(StatsResult {
        daily_visits,
        top_ips,
    })
}
