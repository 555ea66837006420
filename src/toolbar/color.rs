#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSB (hue in degrees, saturation and brightness in percent) to RGB.
pub(crate) fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> Rgb {
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let v = (brightness / 100.0).clamp(0.0, 1.0);
    let k = |n: f64| (n + hue / 60.0).rem_euclid(6.0);
    let f = |n: f64| {
        let k = k(n);
        v * (1.0 - s * k.min(4.0 - k).min(1.0).max(0.0))
    };
    let channel = |n: f64| (255.0 * f(n)).round() as u8;

    Rgb {
        r: channel(5.0),
        g: channel(3.0),
        b: channel(1.0),
    }
}

pub(crate) fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

pub(crate) fn hsb_to_hex(hue: f64, saturation: f64, brightness: f64) -> String {
    rgb_to_hex(hsb_to_rgb(hue, saturation, brightness))
}

/// Saturation and brightness picked at `(x, y)` inside a `width`x`height` square:
/// saturation grows to the right, brightness grows upwards.
pub(crate) fn square_pick(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let s = (x / width * 100.0).clamp(0.0, 100.0);
    let b = ((height - y) / height * 100.0).clamp(0.0, 100.0);
    (s, b)
}

/// Hue picked at `y` along a vertical strip of `height`.
pub(crate) fn hue_pick(y: f64, height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    (y / height * 360.0).clamp(0.0, 360.0)
}

pub(crate) const SWATCHES: &[&str] = &[
    "#000000", "#64748b", "#ef4444", "#f97316", "#eab308", "#22c55e", "#14b8a6", "#3b82f6",
    "#6366f1", "#8b5cf6", "#ec4899", "#f43f5e",
];
