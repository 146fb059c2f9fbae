//! Static label tables for the supported UI languages.
//!
//! A [`Language`] only ever selects which table labels come from. It has no
//! influence on fetching or on any derived number.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::CoreError;
use crate::labels::AnomalyType;

/// Languages offered by the language selector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[strum(to_string = "en")]
    En,
    /// Kannada.
    #[strum(to_string = "kn")]
    Kn,
    /// Hindi.
    #[strum(to_string = "hi")]
    Hi,
}

impl Language {
    /// Two-letter code, also the key used by the backend's alert endpoint.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Kn => "kn",
            Self::Hi => "hi",
        }
    }

    /// Name of the language in its own script, for the selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Kn => "ಕನ್ನಡ",
            Self::Hi => "हिन्दी",
        }
    }

    /// Next language in selector order (wraps around).
    pub fn next(self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|&l| l == self).unwrap_or(0);
        all.get((idx + 1) % all.len()).copied().unwrap_or_default()
    }

    /// The label table for this language.
    pub fn labels(self) -> &'static LabelTable {
        match self {
            Self::En => &EN,
            Self::Kn => &KN,
            Self::Hi => &HI,
        }
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::iter()
            .find(|l| l.code() == code)
            .ok_or(CoreError::UnknownLanguage { code })
    }
}

/// Every static string the dashboard shows.
#[derive(Debug)]
pub struct LabelTable {
    pub title: &'static str,
    pub last_analysis: &'static str,
    pub loading: &'static str,
    pub no_data: &'static str,

    pub total_packets: &'static str,
    pub total_anomalies: &'static str,
    pub anomaly_pct: &'static str,
    pub last_anomaly: &'static str,

    pub model_performance: &'static str,
    pub protocol_distribution: &'static str,
    pub anomalies_by_type: &'static str,

    pub top_source_ips: &'static str,
    pub top_destination_ips: &'static str,

    pub port_scanning: &'static str,
    pub dos: &'static str,
    pub brute_force: &'static str,
    pub dns_tunneling: &'static str,
    pub other: &'static str,
}

impl LabelTable {
    /// Localized name of an anomaly class.
    pub fn anomaly_type(&self, kind: AnomalyType) -> &'static str {
        match kind {
            AnomalyType::PortScanning => self.port_scanning,
            AnomalyType::Dos => self.dos,
            AnomalyType::BruteForce => self.brute_force,
            AnomalyType::DnsTunneling => self.dns_tunneling,
            AnomalyType::Other => self.other,
        }
    }

    /// Localized label for an anomaly type code as it appears in the payload.
    pub fn anomaly_type_label(&self, code: &str) -> &'static str {
        self.anomaly_type(AnomalyType::from_key(code))
    }
}

// ── Tables ──────────────────────────────────────────────────────────

static EN: LabelTable = LabelTable {
    title: "Network Traffic Anomaly Dashboard",
    last_analysis: "Last Analysis",
    loading: "Loading network data...",
    no_data: "No data",
    total_packets: "Total Packets",
    total_anomalies: "Total Anomalies",
    anomaly_pct: "Anomaly %",
    last_anomaly: "Last Anomaly",
    model_performance: "Model Performance",
    protocol_distribution: "Protocol Distribution",
    anomalies_by_type: "Anomalies by Type",
    top_source_ips: "Top Source IPs",
    top_destination_ips: "Top Destination IPs",
    port_scanning: "Port Scanning",
    dos: "DOS",
    brute_force: "Brute Force",
    dns_tunneling: "DNS Tunneling",
    other: "Other",
};

static KN: LabelTable = LabelTable {
    title: "ನೆಟ್‌ವರ್ಕ್ ಟ್ರಾಫಿಕ್ ಅಸಂಗತತೆ ಡ್ಯಾಶ್‌ಬೋರ್ಡ್",
    last_analysis: "ಕೊನೆಯ ವಿಶ್ಲೇಷಣೆ",
    loading: "ನೆಟ್‌ವರ್ಕ್ ಡೇಟಾ ಲೋಡ್ ಆಗುತ್ತಿದೆ...",
    no_data: "ಡೇಟಾ ಇಲ್ಲ",
    total_packets: "ಒಟ್ಟು ಪ್ಯಾಕೆಟ್‌ಗಳು",
    total_anomalies: "ಒಟ್ಟು ಅಸಂಗತತೆಗಳು",
    anomaly_pct: "ಅಸಂಗತತೆ %",
    last_anomaly: "ಕೊನೆಯ ಅಸಂಗತತೆ",
    model_performance: "ಮಾದರಿ ಕಾರ್ಯಕ್ಷಮತೆ",
    protocol_distribution: "ಪ್ರೋಟೋಕಾಲ್ ವಿತರಣೆ",
    anomalies_by_type: "ಪ್ರಕಾರವಾರು ಅಸಂಗತತೆಗಳು",
    top_source_ips: "ಪ್ರಮುಖ ಮೂಲ IPಗಳು",
    top_destination_ips: "ಪ್ರಮುಖ ಗಮ್ಯಸ್ಥಾನ IPಗಳು",
    port_scanning: "ಪೋರ್ಟ್ ಸ್ಕ್ಯಾನಿಂಗ್",
    dos: "DOS",
    brute_force: "ಬ್ರೂಟ್ ಫೋರ್ಸ್",
    dns_tunneling: "DNS ಟನೆಲಿಂಗ್",
    other: "ಇತರೆ",
};

static HI: LabelTable = LabelTable {
    title: "नेटवर्क ट्रैफ़िक विसंगति डैशबोर्ड",
    last_analysis: "अंतिम विश्लेषण",
    loading: "नेटवर्क डेटा लोड हो रहा है...",
    no_data: "कोई डेटा नहीं",
    total_packets: "कुल पैकेट",
    total_anomalies: "कुल विसंगतियाँ",
    anomaly_pct: "विसंगति %",
    last_anomaly: "अंतिम विसंगति",
    model_performance: "मॉडल प्रदर्शन",
    protocol_distribution: "प्रोटोकॉल वितरण",
    anomalies_by_type: "प्रकार के अनुसार विसंगतियाँ",
    top_source_ips: "शीर्ष स्रोत IP",
    top_destination_ips: "शीर्ष गंतव्य IP",
    port_scanning: "पोर्ट स्कैनिंग",
    dos: "DOS",
    brute_force: "ब्रूट फ़ोर्स",
    dns_tunneling: "DNS टनलिंग",
    other: "अन्य",
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" KN ".parse::<Language>().unwrap(), Language::Kn);
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hi);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(CoreError::UnknownLanguage { code }) if code == "fr"
        ));
    }

    #[test]
    fn cycle_visits_every_language() {
        assert_eq!(Language::En.next(), Language::Kn);
        assert_eq!(Language::Kn.next(), Language::Hi);
        assert_eq!(Language::Hi.next(), Language::En);
    }

    #[test]
    fn display_matches_code() {
        for lang in Language::iter() {
            assert_eq!(lang.to_string(), lang.code());
        }
    }

    #[test]
    fn english_table_matches_type_names() {
        let en = Language::En.labels();
        for kind in AnomalyType::iter() {
            assert_eq!(en.anomaly_type(kind), kind.to_string());
        }
    }

    #[test]
    fn anomaly_codes_resolve_through_table() {
        let en = Language::En.labels();
        assert_eq!(en.anomaly_type_label("1"), "Port Scanning");
        assert_eq!(en.anomaly_type_label("4"), "DNS Tunneling");
        assert_eq!(en.anomaly_type_label("9"), "Other");
        assert_eq!(en.anomaly_type_label("x"), "Other");
        assert_eq!(Language::Hi.labels().anomaly_type_label("9"), "अन्य");
    }

    #[test]
    fn tables_differ_per_language() {
        assert_ne!(Language::En.labels().title, Language::Kn.labels().title);
        assert_ne!(Language::En.labels().title, Language::Hi.labels().title);
        assert_ne!(Language::Kn.labels().title, Language::Hi.labels().title);
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Kn).unwrap(), "\"kn\"");
        let lang: Language = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(lang, Language::Hi);
    }
}
