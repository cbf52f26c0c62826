// Bar layout and label formatting

use super::config::{BarOrder, DisplayMode, WatcherConfig};
use crate::color::{Rgb, color_for};
use crate::host::{DrawSurface, Point, Rect, Size};
use crate::models::{Observation, Resource, ResourceReading};

pub const PADDING: f64 = 10.0;
pub const BAR_HEIGHT: f64 = 14.0;
/// Distance between the tops of the two bars (leaves room for the lower label).
pub const BAR_GAP: f64 = 28.0;
pub const LOWER_BAR_ALPHA: f64 = 0.7;

const BORDER_COLOR: Rgb = Rgb::new(0x66, 0x66, 0x66);
const TEXT_COLOR: Rgb = Rgb::new(0xdd, 0xdd, 0xdd);
const FONT: &str = "12px sans-serif";
const LABEL_OFFSET: f64 = 6.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// One bar as it will be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub resource: Resource,
    pub top: f64,
    pub ratio: f64,
    pub label: String,
    pub alpha: f64,
}

fn format_mb(bytes: u64) -> String {
    format!("{} MB", (bytes as f64 / BYTES_PER_MB).round() as u64)
}

/// Text shown above a resource's bar. `polled` is false until the first poll completes,
/// which turns the bare "unavailable" case into a "..." placeholder.
pub fn label_for(
    resource: Resource,
    reading: &ResourceReading,
    mode: DisplayMode,
    polled: bool,
) -> String {
    let name = resource.name();
    if reading.available {
        return match mode {
            DisplayMode::Percent => format!("{name} {:.1}%", reading.percent),
            DisplayMode::MegabytesPair => format!(
                "{name} {} / {}",
                format_mb(reading.used_bytes),
                format_mb(reading.total_bytes)
            ),
        };
    }
    if !reading.unavailable_reason.is_empty() {
        format!("{name}: unavailable ({})", reading.unavailable_reason)
    } else if polled {
        format!("{name}: unavailable")
    } else {
        format!("{name}: ...")
    }
}

/// Upper and lower bar for the given node size. The upper slot is opaque, the
/// lower one drawn at [`LOWER_BAR_ALPHA`].
pub fn layout(
    size: Size,
    observation: &Observation,
    config: &WatcherConfig,
    polled: bool,
) -> [BarSpec; 2] {
    let lower_top = size.height - PADDING - BAR_HEIGHT;
    let upper_top = lower_top - BAR_GAP;
    let (upper, lower) = match config.bar_order {
        BarOrder::PrimaryFirst => (Resource::Vram, Resource::Ram),
        BarOrder::SecondaryFirst => (Resource::Ram, Resource::Vram),
    };
    let bar = |resource: Resource, top: f64, alpha: f64| {
        let reading = observation.reading(resource);
        BarSpec {
            resource,
            top,
            ratio: reading.fill_ratio(),
            label: label_for(resource, reading, config.display_mode, polled),
            alpha,
        }
    };
    [
        bar(upper, upper_top, 1.0),
        bar(lower, lower_top, LOWER_BAR_ALPHA),
    ]
}

pub fn draw_bar(surface: &mut dyn DrawSurface, width: f64, bar: &BarSpec) {
    let x = PADDING;
    let bar_w = width - PADDING * 2.0;

    surface.stroke_rect(Rect::new(x, bar.top, bar_w, BAR_HEIGHT), BORDER_COLOR, 1.0);

    let fill_w = ((bar_w - 2.0) * bar.ratio).max(0.0);
    surface.fill_rect(
        Rect::new(x + 1.0, bar.top + 1.0, fill_w, BAR_HEIGHT - 2.0),
        color_for(bar.ratio),
        bar.alpha,
    );

    surface.draw_text(
        &bar.label,
        Point {
            x,
            y: bar.top - LABEL_OFFSET,
        },
        FONT,
        TEXT_COLOR,
    );
}
