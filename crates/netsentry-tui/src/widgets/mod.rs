//! Reusable widgets and formatting helpers.

pub mod bars;
pub mod status;
