// netsentry-api: Async Rust client for the traffic-analysis backend

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::AnalyticsClient;
pub use error::Error;
pub use model::{AlertMessages, AnomalySummary, Snapshot};
pub use transport::TransportConfig;
