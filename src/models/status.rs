// Provider-side status report (GET /vram_watcher/status)

use serde::Serialize;

/// Accelerator memory block; serializes to the unprefixed response fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AcceleratorStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

/// System memory block; serializes to the `ram_`-prefixed response fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RamStatus {
    #[serde(rename = "ram_available")]
    pub available: bool,
    #[serde(rename = "ram_reason", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "ram_total_bytes", skip_serializing_if = "Option::is_none")]
    pub total_bytes: Option<u64>,
    #[serde(rename = "ram_used_bytes", skip_serializing_if = "Option::is_none")]
    pub used_bytes: Option<u64>,
    #[serde(rename = "ram_percent", skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

/// Flat JSON object with both resources plus a sample timestamp (unix seconds).
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub accelerator: AcceleratorStatus,
    #[serde(flatten)]
    pub ram: RamStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

/// Usage in percent of total; 0 when total is 0.
pub fn usage_percent(used: u64, total: u64) -> f64 {
    if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

impl AcceleratorStatus {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn measured(device_index: u32, device_name: String, used: u64, total: u64) -> Self {
        Self {
            available: true,
            reason: None,
            device_index: Some(device_index),
            device_name: Some(device_name),
            total_bytes: Some(total),
            used_bytes: Some(used),
            percent: Some(usage_percent(used, total)),
        }
    }
}

impl RamStatus {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn measured(used: u64, total: u64) -> Self {
        Self {
            available: true,
            reason: None,
            total_bytes: Some(total),
            used_bytes: Some(used),
            percent: Some(usage_percent(used, total)),
        }
    }
}
