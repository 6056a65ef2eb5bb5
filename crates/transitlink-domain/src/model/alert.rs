//! Status alert types
//!
//! Alerts are derived from the vehicle collection on demand and never
//! persisted. Each derivation pass regenerates the whole list.

use serde::{Deserialize, Serialize};

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertKind {
    Critical,
    Warning,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::Critical => "CRITICAL",
            AlertKind::Warning => "WARNING",
        }
    }
}

/// A transient status notice for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Derived from the vehicle id and the alert kind
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    /// The vehicle's registration plate
    pub node: String,
    /// Display label, not a timestamp
    pub time: String,
}
