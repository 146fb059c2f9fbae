//! Code → label mapping for anomaly types and protocols.

use strum::{Display, EnumIter};

/// Anomaly classes reported by the detector, keyed by numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AnomalyType {
    #[strum(to_string = "Port Scanning")]
    PortScanning,
    #[strum(to_string = "DOS")]
    Dos,
    #[strum(to_string = "Brute Force")]
    BruteForce,
    #[strum(to_string = "DNS Tunneling")]
    DnsTunneling,
    Other,
}

impl AnomalyType {
    /// Map a numeric code to its class. Unknown codes become [`Other`](Self::Other).
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::PortScanning,
            2 => Self::Dos,
            3 => Self::BruteForce,
            4 => Self::DnsTunneling,
            _ => Self::Other,
        }
    }

    /// Map a code as it appears in a JSON object key. Anything that does not
    /// parse as an unsigned integer is [`Other`](Self::Other).
    pub fn from_key(key: &str) -> Self {
        key.trim()
            .parse::<u32>()
            .map_or(Self::Other, Self::from_code)
    }
}

/// Display name for a protocol code: `0` is TCP, `1` is UDP, anything else
/// is shown as-is.
pub fn protocol_label(code: &str) -> String {
    match code.trim() {
        "0" => "TCP".into(),
        "1" => "UDP".into(),
        _ => code.to_owned(),
    }
}
