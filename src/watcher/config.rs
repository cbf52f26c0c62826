// Per-node user options, stored by the host as node properties

use serde_json::{Map, Value};

pub const PROP_INTERVAL: &str = "vram_interval_s";
pub const PROP_DISPLAY_MODE: &str = "vram_display_mode";
pub const PROP_BAR_ORDER: &str = "vram_bar_order";

pub const DEFAULT_INTERVAL_SECS: f64 = 5.0;
pub const MIN_INTERVAL_SECS: f64 = 0.5;
const FALLBACK_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Percent,
    MegabytesPair,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::Percent, DisplayMode::MegabytesPair];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Percent => "%",
            DisplayMode::MegabytesPair => "MB",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "%" => Some(DisplayMode::Percent),
            "MB" => Some(DisplayMode::MegabytesPair),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarOrder {
    /// VRAM bar on top.
    #[default]
    PrimaryFirst,
    /// RAM bar on top.
    SecondaryFirst,
}

impl BarOrder {
    pub const ALL: [BarOrder; 2] = [BarOrder::PrimaryFirst, BarOrder::SecondaryFirst];

    pub fn as_str(self) -> &'static str {
        match self {
            BarOrder::PrimaryFirst => "VRAM→RAM",
            BarOrder::SecondaryFirst => "RAM→VRAM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "VRAM→RAM" | "PRIMARY→SECONDARY" => Some(BarOrder::PrimaryFirst),
            "RAM→VRAM" | "SECONDARY→PRIMARY" => Some(BarOrder::SecondaryFirst),
            _ => None,
        }
    }
}

/// Effective options for one node. Built fresh from the properties every tick, so edits
/// apply on the next frame; anything unrecognized falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatcherConfig {
    pub interval_secs: f64,
    pub display_mode: DisplayMode,
    pub bar_order: BarOrder,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            display_mode: DisplayMode::default(),
            bar_order: BarOrder::default(),
        }
    }
}

impl WatcherConfig {
    pub fn from_properties(props: &Map<String, Value>) -> Self {
        Self {
            interval_secs: props
                .get(PROP_INTERVAL)
                .and_then(as_number)
                .unwrap_or(DEFAULT_INTERVAL_SECS),
            display_mode: props
                .get(PROP_DISPLAY_MODE)
                .and_then(Value::as_str)
                .and_then(DisplayMode::parse)
                .unwrap_or_default(),
            bar_order: props
                .get(PROP_BAR_ORDER)
                .and_then(Value::as_str)
                .and_then(BarOrder::parse)
                .unwrap_or_default(),
        }
    }

    /// Minimum spacing between completed polls: at least 0.5 s, 5 s when the
    /// configured value is not a finite positive number.
    pub fn interval_ms(&self) -> u64 {
        if self.interval_secs.is_finite() && self.interval_secs > 0.0 {
            (self.interval_secs.max(MIN_INTERVAL_SECS) * 1000.0).round() as u64
        } else {
            FALLBACK_INTERVAL_MS
        }
    }

    /// Fill in any property the host has not stored yet. Present values, valid or not,
    /// are left untouched; invalid ones fall back when read.
    pub fn ensure_defaults(props: &mut Map<String, Value>) {
        let defaults = Self::default();
        props
            .entry(PROP_INTERVAL)
            .or_insert_with(|| Value::from(defaults.interval_secs));
        props
            .entry(PROP_DISPLAY_MODE)
            .or_insert_with(|| Value::from(defaults.display_mode.as_str()));
        props
            .entry(PROP_BAR_ORDER)
            .or_insert_with(|| Value::from(defaults.bar_order.as_str()));
    }
}

/// Numbers, or strings that parse as one (number widgets sometimes hand back text).
fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Kind of editor the host should show for an option.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Number {
        min: f64,
        step: f64,
        precision: u32,
    },
    Combo {
        values: Vec<&'static str>,
    },
}

/// One user-editable option, described for the host's widget layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub label: &'static str,
    pub property: &'static str,
    pub kind: ControlKind,
    pub default: Value,
}

/// The three controls a watcher node exposes, in display order.
pub fn controls() -> Vec<Control> {
    let defaults = WatcherConfig::default();
    vec![
        Control {
            label: "Interval (s)",
            property: PROP_INTERVAL,
            kind: ControlKind::Number {
                min: MIN_INTERVAL_SECS,
                step: 0.5,
                precision: 1,
            },
            default: Value::from(defaults.interval_secs),
        },
        Control {
            label: "Display",
            property: PROP_DISPLAY_MODE,
            kind: ControlKind::Combo {
                values: DisplayMode::ALL.iter().map(|m| m.as_str()).collect(),
            },
            default: Value::from(defaults.display_mode.as_str()),
        },
        Control {
            label: "Order",
            property: PROP_BAR_ORDER,
            kind: ControlKind::Combo {
                values: BarOrder::ALL.iter().map(|o| o.as_str()).collect(),
            },
            default: Value::from(defaults.bar_order.as_str()),
        },
    ]
}

/// Store a value edited through one of [`controls`]. A non-numeric interval is
/// stored as the default; combo values are stored as given and validated on read.
/// Returns false for an unknown property.
pub fn apply_control(props: &mut Map<String, Value>, property: &str, value: Value) -> bool {
    match property {
        PROP_INTERVAL => {
            let secs = as_number(&value)
                .filter(|n| n.is_finite())
                .unwrap_or(DEFAULT_INTERVAL_SECS);
            props.insert(PROP_INTERVAL.into(), Value::from(secs));
            true
        }
        PROP_DISPLAY_MODE | PROP_BAR_ORDER => {
            props.insert(property.into(), value);
            true
        }
        _ => false,
    }
}
