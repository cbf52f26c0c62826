// Widget-side view of one status poll: a reading per tracked resource

use serde_json::{Map, Value};

/// Tracked resource. The accelerator is the primary bar, system memory the secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Vram,
    Ram,
}

impl Resource {
    /// Label prefix drawn on the bar.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Vram => "VRAM",
            Resource::Ram => "RAM",
        }
    }

    /// Prefix of this resource's fields in the status response ("" or "ram_").
    fn field_prefix(self) -> &'static str {
        match self {
            Resource::Vram => "",
            Resource::Ram => "ram_",
        }
    }
}

/// Last-known observation of one resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceReading {
    pub available: bool,
    pub used_bytes: u64,
    pub total_bytes: u64,
    /// Provider-reported, nominally 0..=100. Not reconciled with the byte counts.
    pub percent: f64,
    pub unavailable_reason: String,
}

impl ResourceReading {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable_reason: reason.into(),
            ..Default::default()
        }
    }

    /// Bar fill fraction: percent / 100 clamped to [0, 1].
    pub fn fill_ratio(&self) -> f64 {
        crate::color::clamp_ratio(self.percent / 100.0)
    }

    /// Read one resource's fields out of a status response object. Every field that is
    /// missing or has the wrong type falls back to its neutral default on its own.
    pub fn from_fields(fields: &Map<String, Value>, resource: Resource) -> Self {
        let prefix = resource.field_prefix();
        let get = |name: &str| fields.get(&format!("{prefix}{name}"));
        Self {
            available: get("available").and_then(Value::as_bool).unwrap_or(false),
            used_bytes: get("used_bytes").and_then(as_byte_count).unwrap_or(0),
            total_bytes: get("total_bytes").and_then(as_byte_count).unwrap_or(0),
            percent: get("percent")
                .and_then(Value::as_f64)
                .filter(|p| p.is_finite())
                .unwrap_or(0.0),
            unavailable_reason: get("reason")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Accept unsigned integers, plus non-negative whole floats some providers emit (e.g. 1.2e10).
fn as_byte_count(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| {
        v.as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

/// Both readings from one poll. Always replaced as a unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub vram: ResourceReading,
    pub ram: ResourceReading,
}

impl Observation {
    /// Parse a decoded status body. A non-object body yields all defaults.
    pub fn from_status_json(body: &Value) -> Self {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);
        Self {
            vram: ResourceReading::from_fields(fields, Resource::Vram),
            ram: ResourceReading::from_fields(fields, Resource::Ram),
        }
    }

    /// Result of a failed poll: both resources unavailable with the same reason.
    pub fn failed(reason: &str) -> Self {
        Self {
            vram: ResourceReading::unavailable(reason),
            ram: ResourceReading::unavailable(reason),
        }
    }

    pub fn reading(&self, resource: Resource) -> &ResourceReading {
        match resource {
            Resource::Vram => &self.vram,
            Resource::Ram => &self.ram,
        }
    }
}
