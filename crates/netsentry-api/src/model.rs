// Wire types for the analytics backend.
//
// The backend is loosely typed: any structured field may be missing or
// `null`. Every field therefore decodes through a default-filling path so a
// partial payload still yields a usable `Snapshot`.

use std::net::Ipv4Addr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One payload from `GET /get-data`.
///
/// Immutable once decoded; consumers share it behind an `Arc` and replace it
/// wholesale on the next successful poll.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    /// When the backend last ran its analysis (opaque display string).
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis_timestamp: String,

    /// Metric name → score in `[0, 1]`, in payload order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_performance: IndexMap<String, f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub anomaly_summary: AnomalySummary,
}

/// Aggregate anomaly statistics within a [`Snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnomalySummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_packets: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_anomalies: u64,

    /// Share of anomalous packets, 0–100.
    #[serde(default, deserialize_with = "null_as_default")]
    pub anomaly_percentage: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub last_anomaly_seen: String,

    /// Protocol code → packet count, in payload order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol_distribution: IndexMap<String, u64>,

    /// Anomaly type code → count, in payload order. Codes arrive as JSON
    /// object keys, so they stay strings here.
    #[serde(default, deserialize_with = "null_as_default")]
    pub anomalies_by_type: IndexMap<String, u64>,

    /// Source addresses as 32-bit integers, most significant first.
    #[serde(default, deserialize_with = "ipv4_sequence")]
    pub source_ips: Vec<u32>,

    #[serde(default, deserialize_with = "ipv4_sequence")]
    pub destination_ips: Vec<u32>,
}

/// Localized alert sentences from `GET /alert`, keyed by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AlertMessages(pub IndexMap<String, String>);

impl AlertMessages {
    /// Message for `lang`, if the backend provided one.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The backend's failure body: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

// ── Deserialization helpers ─────────────────────────────────────────

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reduce any integer to its low 32 bits, the same view of the value that
/// 32-bit shift arithmetic takes.
fn wrap_u32(n: i64) -> u32 {
    let reduced = n.rem_euclid(1_i64 << 32);
    u32::try_from(reduced).unwrap_or_default()
}

fn wrap_u64(n: u64) -> u32 {
    u32::try_from(n % (1_u64 << 32)).unwrap_or_default()
}

/// Floats are truncated toward zero before wrapping; NaN and infinities
/// become 0.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn wrap_f64(x: f64) -> u32 {
    if !x.is_finite() {
        return 0;
    }
    x.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// One element of an IP array. Numbers of any JSON shape wrap to 32 bits,
/// dotted-quad strings parse as addresses, and anything else reads as 0.
fn ipv4_element(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(wrap_u64)
            .or_else(|| n.as_i64().map(wrap_u32))
            .or_else(|| n.as_f64().map(wrap_f64))
            .unwrap_or_default(),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<Ipv4Addr>()
                .map(u32::from)
                .ok()
                .or_else(|| s.parse::<i64>().ok().map(wrap_u32))
                .unwrap_or_default()
        }
        _ => 0,
    }
}

fn ipv4_sequence<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().iter().map(ipv4_element).collect())
}
