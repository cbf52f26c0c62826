// Traffic-light color ramp: 0 -> green, 0.5 -> yellow, 1 -> red

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// CSS form, e.g. `rgb(76, 175, 80)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

pub const GREEN: Rgb = Rgb::new(76, 175, 80);
pub const YELLOW: Rgb = Rgb::new(255, 235, 59);
pub const RED: Rgb = Rgb::new(244, 67, 54);

/// Clamp to [0, 1]; NaN maps to 0.
pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// Map a utilization ratio to a color on the green/yellow/red ramp.
/// Out-of-range input is clamped first, so this never fails.
pub fn color_for(ratio: f64) -> Rgb {
    let t = clamp_ratio(ratio);
    if t <= 0.5 {
        lerp_rgb(GREEN, YELLOW, t / 0.5)
    } else {
        lerp_rgb(YELLOW, RED, (t - 0.5) / 0.5)
    }
}

fn lerp_rgb(a: Rgb, b: Rgb, k: f64) -> Rgb {
    Rgb {
        r: lerp_channel(a.r, b.r, k),
        g: lerp_channel(a.g, b.g, k),
        b: lerp_channel(a.b, b.b, k),
    }
}

fn lerp_channel(a: u8, b: u8, k: f64) -> u8 {
    let (a, b) = (a as f64, b as f64);
    (a + (b - a) * k).round().clamp(0.0, 255.0) as u8
}
