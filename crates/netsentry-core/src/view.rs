//! Dashboard view model: everything the UI shows, derived from the latest
//! snapshot and the selected language.
//!
//! [`DashboardView`] holds state (snapshot reference, language, alerts);
//! [`DashboardView::model`] turns it into plain display data. Rendering code
//! never looks at the raw [`Snapshot`].

use std::sync::Arc;

use netsentry_api::{AlertMessages, Snapshot};

use crate::format::{TOP_N, format_percentage, top_entries};
use crate::labels::protocol_label;
use crate::locale::{Language, LabelTable};

/// One of the four headline numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
}

/// A labeled value in a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint<T> {
    pub label: String,
    pub value: T,
}

/// A titled series of bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries<T> {
    pub title: &'static str,
    pub points: Vec<ChartPoint<T>>,
}

impl<T> BarSeries<T> {
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }
}

impl<T: Copy> BarSeries<T> {
    pub fn values(&self) -> Vec<T> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// One slice of a proportional (pie) chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: u64,
    /// `count / total`, in `[0, 1]`. Zero when the total is zero.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareChart {
    pub title: &'static str,
    pub shares: Vec<Share>,
}

/// A titled, ordered list of dotted-quad addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpList {
    pub title: &'static str,
    pub entries: Vec<String>,
}

/// Fully derived dashboard content for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    pub title: &'static str,
    pub last_analysis_label: &'static str,
    pub analysis_timestamp: String,
    /// Packets, anomalies, anomaly %, last anomaly, in that order.
    pub cards: [SummaryCard; 4],
    /// Scores in `[0, 1]`.
    pub performance: BarSeries<f64>,
    pub protocols: ShareChart,
    pub anomalies_by_type: BarSeries<u64>,
    pub source_ips: IpList,
    pub destination_ips: IpList,
    /// Localized alert sentence, present only while anomalies are reported.
    pub alert: Option<String>,
    /// Placeholder for empty charts and lists.
    pub no_data: &'static str,
}

/// What the dashboard should display right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    /// No snapshot yet: a loading indicator and nothing else.
    Loading { message: &'static str },
    Ready(Box<DashboardModel>),
}

/// Dashboard state: the latest snapshot and the selected language.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    snapshot: Option<Arc<Snapshot>>,
    language: Language,
    alerts: Option<Arc<AlertMessages>>,
}

impl DashboardView {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Swap in a newer snapshot. The previous one is dropped, not merged.
    pub fn replace_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        self.snapshot = Some(snapshot);
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    pub fn set_alerts(&mut self, alerts: Arc<AlertMessages>) {
        self.alerts = Some(alerts);
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Advance to the next language in selector order.
    pub fn cycle_language(&mut self) -> Language {
        self.language = self.language.next();
        self.language
    }

    pub fn labels(&self) -> &'static LabelTable {
        self.language.labels()
    }

    /// Derive the display model.
    pub fn model(&self) -> ViewModel {
        let labels = self.labels();
        match &self.snapshot {
            None => ViewModel::Loading {
                message: labels.loading,
            },
            Some(snap) => ViewModel::Ready(Box::new(self.derive(snap, labels))),
        }
    }

    fn derive(&self, snap: &Snapshot, labels: &'static LabelTable) -> DashboardModel {
        let summary = &snap.anomaly_summary;

        let cards = [
            SummaryCard {
                title: labels.total_packets,
                value: summary.total_packets.to_string(),
            },
            SummaryCard {
                title: labels.total_anomalies,
                value: summary.total_anomalies.to_string(),
            },
            SummaryCard {
                title: labels.anomaly_pct,
                value: format_percentage(summary.anomaly_percentage),
            },
            SummaryCard {
                title: labels.last_anomaly,
                value: summary.last_anomaly_seen.clone(),
            },
        ];

        let performance = BarSeries {
            title: labels.model_performance,
            points: snap
                .model_performance
                .iter()
                .map(|(name, &score)| ChartPoint {
                    label: name.clone(),
                    value: score,
                })
                .collect(),
        };

        let anomalies_by_type = BarSeries {
            title: labels.anomalies_by_type,
            points: summary
                .anomalies_by_type
                .iter()
                .map(|(code, &count)| ChartPoint {
                    label: labels.anomaly_type_label(code).to_owned(),
                    value: count,
                })
                .collect(),
        };

        let alert = if summary.total_anomalies > 0 {
            self.alerts.as_ref().and_then(|a| {
                a.get(self.language.code())
                    .or_else(|| a.get(Language::En.code()))
                    .map(str::to_owned)
            })
        } else {
            None
        };

        DashboardModel {
            title: labels.title,
            last_analysis_label: labels.last_analysis,
            analysis_timestamp: snap.analysis_timestamp.clone(),
            cards,
            performance,
            protocols: ShareChart {
                title: labels.protocol_distribution,
                shares: protocol_shares(summary.protocol_distribution.iter()),
            },
            anomalies_by_type,
            source_ips: IpList {
                title: labels.top_source_ips,
                entries: top_entries(&summary.source_ips, TOP_N),
            },
            destination_ips: IpList {
                title: labels.top_destination_ips,
                entries: top_entries(&summary.destination_ips, TOP_N),
            },
            alert,
            no_data: labels.no_data,
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn protocol_shares<'a>(dist: impl Iterator<Item = (&'a String, &'a u64)> + Clone) -> Vec<Share> {
    let total: u64 = dist.clone().map(|(_, &c)| c).sum();
    dist.map(|(code, &count)| Share {
        label: protocol_label(code),
        count,
        fraction: if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        },
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> Arc<Snapshot> {
        Arc::new(serde_json::from_value(value).unwrap())
    }

    fn ready(view: &DashboardView) -> DashboardModel {
        match view.model() {
            ViewModel::Ready(model) => *model,
            ViewModel::Loading { .. } => panic!("expected a ready model"),
        }
    }

    fn sample() -> Arc<Snapshot> {
        snapshot(json!({
            "analysis_timestamp": "2025-01-25 14:02:11",
            "model_performance": { "accuracy": 0.97, "precision": 0.91, "recall": 0.88 },
            "anomaly_summary": {
                "total_packets": 15230,
                "total_anomalies": 412,
                "anomaly_percentage": 12.345,
                "last_anomaly_seen": "2025-01-25 14:01:58",
                "protocol_distribution": { "0": 300, "1": 100, "2": 0 },
                "anomalies_by_type": { "1": 5, "9": 2 },
                "source_ips": [2_130_706_433, 16_909_060],
                "destination_ips": []
            }
        }))
    }

    #[test]
    fn loading_until_first_snapshot() {
        let view = DashboardView::new(Language::En);
        assert_eq!(
            view.model(),
            ViewModel::Loading {
                message: "Loading network data..."
            }
        );
    }

    #[test]
    fn cards_in_order() {
        let mut view = DashboardView::new(Language::En);
        view.replace_snapshot(sample());
        let model = ready(&view);

        let values: Vec<&str> = model.cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["15230", "412", "12.35", "2025-01-25 14:01:58"]);
        let titles: Vec<&str> = model.cards.iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            ["Total Packets", "Total Anomalies", "Anomaly %", "Last Anomaly"]
        );
        assert_eq!(model.analysis_timestamp, "2025-01-25 14:02:11");
    }

    #[test]
    fn anomaly_types_labeled_in_payload_order() {
        let mut view = DashboardView::new(Language::En);
        view.replace_snapshot(sample());
        let model = ready(&view);

        assert_eq!(model.anomalies_by_type.labels(), ["Port Scanning", "Other"]);
        assert_eq!(model.anomalies_by_type.values(), [5, 2]);
    }

    #[test]
    fn protocol_shares_and_labels() {
        let mut view = DashboardView::new(Language::En);
        view.replace_snapshot(sample());
        let model = ready(&view);

        let labels: Vec<&str> = model.protocols.shares.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["TCP", "UDP", "2"]);
        let fractions: Vec<f64> = model.protocols.shares.iter().map(|s| s.fraction).collect();
        assert_eq!(fractions, [0.75, 0.25, 0.0]);
    }

    #[test]
    fn zero_total_protocols_have_zero_fraction() {
        let mut view = DashboardView::new(Language::En);
        view.replace_snapshot(snapshot(json!({
            "anomaly_summary": { "protocol_distribution": { "0": 0 } }
        })));
        let model = ready(&view);
        assert_eq!(model.protocols.shares[0].fraction, 0.0);
    }

    #[test]
    fn ip_lists_formatted_and_empty_ok() {
        let mut view = DashboardView::new(Language::En);
        view.replace_snapshot(sample());
        let model = ready(&view);

        assert_eq!(model.source_ips.entries, ["127.0.0.1", "1.2.3.4"]);
        assert!(model.destination_ips.entries.is_empty());
    }

    #[test]
    fn ip_lists_capped_at_ten() {
        let ips: Vec<u32> = (1..=25).collect();
        let mut view = DashboardView::new(Language::En);
        view.replace_snapshot(snapshot(json!({
            "anomaly_summary": { "source_ips": ips }
        })));
        let model = ready(&view);

        assert_eq!(model.source_ips.entries.len(), 10);
        assert_eq!(model.source_ips.entries[0], "0.0.0.1");
        assert_eq!(model.source_ips.entries[9], "0.0.0.10");
    }

    #[test]
    fn language_switch_changes_labels_only() {
        let mut view = DashboardView::new(Language::En);
        view.replace_snapshot(sample());
        let before = ready(&view);

        view.set_language(Language::Hi);
        let after = ready(&view);

        assert_ne!(before.title, after.title);
        assert_ne!(before.cards[0].title, after.cards[0].title);
        assert_eq!(after.anomalies_by_type.labels(), ["पोर्ट स्कैनिंग", "अन्य"]);

        let card_values = |m: &DashboardModel| -> Vec<String> {
            m.cards.iter().map(|c| c.value.clone()).collect()
        };
        assert_eq!(card_values(&before), card_values(&after));
        assert_eq!(before.performance.points, after.performance.points);
        assert_eq!(before.anomalies_by_type.values(), after.anomalies_by_type.values());
        assert_eq!(before.protocols.shares, after.protocols.shares);
        assert_eq!(before.source_ips.entries, after.source_ips.entries);
        assert_eq!(before.destination_ips.entries, after.destination_ips.entries);
    }

    #[test]
    fn language_switch_while_loading() {
        let mut view = DashboardView::new(Language::En);
        assert_eq!(view.cycle_language(), Language::Kn);
        assert!(matches!(view.model(), ViewModel::Loading { message } if message == Language::Kn.labels().loading));
    }

    #[test]
    fn replacement_is_wholesale() {
        let mut view = DashboardView::new(Language::En);
        view.replace_snapshot(sample());
        view.replace_snapshot(snapshot(json!({ "analysis_timestamp": "later" })));
        let model = ready(&view);

        assert_eq!(model.analysis_timestamp, "later");
        assert!(model.performance.points.is_empty());
        assert!(model.source_ips.entries.is_empty());
    }

    #[test]
    fn alert_only_when_anomalies_present() {
        let alerts: AlertMessages = serde_json::from_value(json!({
            "en": "Potential threat detected.",
            "kn": "ಬೆದರಿಕೆ ಪತ್ತೆಯಾಗಿದೆ."
        }))
        .unwrap();

        let mut view = DashboardView::new(Language::Kn);
        view.set_alerts(Arc::new(alerts));
        view.replace_snapshot(sample());
        assert_eq!(ready(&view).alert.as_deref(), Some("ಬೆದರಿಕೆ ಪತ್ತೆಯಾಗಿದೆ."));

        // No Hindi text: fall back to English.
        view.set_language(Language::Hi);
        assert_eq!(ready(&view).alert.as_deref(), Some("Potential threat detected."));

        view.replace_snapshot(snapshot(json!({ "anomaly_summary": { "total_anomalies": 0 } })));
        assert_eq!(ready(&view).alert, None);
    }
}
