//! Interpolation between property values.
//!
//! An [`Interpolator`] blends two endpoint values at an eased progress `t`.
//! Numbers interpolate linearly. Colors are CSS color strings (hex, named,
//! `rgb()` or `hsl()`); both endpoints are decoded to RGBA and each channel is
//! blended linearly. The result keeps the notation of the inputs when both
//! share one (`rgb()`/`rgba()` or `hsl()`/`hsla()`) and is hex otherwise, so
//! `"red"` and `"#0000ff"` can be mixed freely.
//!
//! Adding a new animatable value type means implementing [`Interpolator`]
//! for it.

use csscolorparser::Color as CssColor;
use log::warn;

/// Blends two values of type `T`.
pub trait Interpolator<T> {
    /// Interpolate between `start` and `end`.
    ///
    /// `t = 0.0` yields `start`, `t = 1.0` yields `end`. Overshooting easing
    /// curves may pass values outside `[0, 1]`.
    fn lerp(&self, start: &T, end: &T, t: f64) -> T;
}

/// Linear interpolation helper for f64 values.
#[inline]
pub fn lerp_f64(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// `start + (end - start) * t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberInterpolator;

impl Interpolator<f64> for NumberInterpolator {
    fn lerp(&self, start: &f64, end: &f64, t: f64) -> f64 {
        lerp_f64(*start, *end, t)
    }
}

/// Per-channel RGBA blend of CSS color strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorInterpolator;

impl Interpolator<String> for ColorInterpolator {
    fn lerp(&self, start: &String, end: &String, t: f64) -> String {
        match (parse_color(start), parse_color(end)) {
            (Some(from), Some(to)) => {
                let mixed = blend(&from, &to, t);
                match (Notation::of(start), Notation::of(end)) {
                    (Notation::Rgb, Notation::Rgb) => mixed.to_rgb_string(),
                    (Notation::Hsl, Notation::Hsl) => to_hsl_string(&mixed),
                    _ => mixed.to_hex_string(),
                }
            }
            _ => {
                warn!("cannot interpolate colors {start:?} -> {end:?}; holding start value");
                if t >= 1.0 { end.clone() } else { start.clone() }
            }
        }
    }
}

/// Decode a CSS color string (hex, named, `rgb()`, ...) to RGBA.
pub fn parse_color(value: &str) -> Option<CssColor> {
    csscolorparser::parse(value.trim()).ok()
}

/// How a color string was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Hex,
    Rgb,
    Hsl,
}

impl Notation {
    /// Named colors count as hex.
    fn of(value: &str) -> Self {
        let value = value.trim_start().to_ascii_lowercase();
        if value.starts_with("rgb(") || value.starts_with("rgba(") {
            Self::Rgb
        } else if value.starts_with("hsl(") || value.starts_with("hsla(") {
            Self::Hsl
        } else {
            Self::Hex
        }
    }
}

/// `hsl(h, s%, l%)`, or `hsla(...)` when translucent. Components are rounded.
fn to_hsl_string(color: &CssColor) -> String {
    let (h, s, l, a) = color.to_hsla();
    let h = h.round() % 360.0;
    let s = (s * 100.0).round();
    let l = (l * 100.0).round();
    if a < 1.0 {
        format!("hsla({h}, {s}%, {l}%, {a})")
    } else {
        format!("hsl({h}, {s}%, {l}%)")
    }
}

fn blend(from: &CssColor, to: &CssColor, t: f64) -> CssColor {
    let channel = |a: f64, b: f64| lerp_f64(a, b, t).clamp(0.0, 1.0);
    CssColor::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
        channel(from.a, to.a),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.0001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_number_interpolation() {
        let lerp = NumberInterpolator;
        assert!(approx_eq(lerp.lerp(&0.0, &100.0, 0.0), 0.0));
        assert!(approx_eq(lerp.lerp(&0.0, &100.0, 0.25), 25.0));
        assert!(approx_eq(lerp.lerp(&0.0, &100.0, 0.5), 50.0));
        assert!(approx_eq(lerp.lerp(&0.0, &100.0, 1.0), 100.0));
    }

    #[test]
    fn test_number_negative_interpolation() {
        let lerp = NumberInterpolator;
        assert!(approx_eq(lerp.lerp(&-50.0, &50.0, 0.5), 0.0));
        assert!(approx_eq(lerp.lerp(&50.0, &-50.0, 0.25), 25.0));
    }

    #[test]
    fn test_number_extrapolation() {
        // Back and elastic curves push t past the ends.
        let lerp = NumberInterpolator;
        assert!(approx_eq(lerp.lerp(&0.0, &100.0, 1.5), 150.0));
        assert!(approx_eq(lerp.lerp(&0.0, &100.0, -0.5), -50.0));
    }

    #[test]
    fn test_hex_color_interpolation() {
        let lerp = ColorInterpolator;
        let mid = lerp.lerp(&"#000000".to_string(), &"#ffffff".to_string(), 0.5);
        let color = parse_color(&mid).expect("valid rgba output");
        assert!((color.r - 0.5).abs() < 0.01);
        assert!((color.g - 0.5).abs() < 0.01);
        assert!((color.b - 0.5).abs() < 0.01);
        assert!(mid.starts_with('#'));
    }

    #[test]
    fn test_named_and_hex_mix() {
        let lerp = ColorInterpolator;
        let mid = lerp.lerp(&"red".to_string(), &"#0000ff".to_string(), 0.5);
        let color = parse_color(&mid).expect("valid rgba output");
        assert!((color.r - 0.5).abs() < 0.01);
        assert!(color.g.abs() < 0.01);
        assert!((color.b - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_color_endpoints() {
        let lerp = ColorInterpolator;
        assert_eq!(lerp.lerp(&"red".to_string(), &"blue".to_string(), 0.0), "#ff0000");
        assert_eq!(lerp.lerp(&"red".to_string(), &"blue".to_string(), 1.0), "#0000ff");
    }

    #[test]
    fn test_color_alpha_interpolation() {
        let lerp = ColorInterpolator;
        let mid = lerp.lerp(
            &"rgba(255, 255, 255, 1)".to_string(),
            &"rgba(255, 255, 255, 0)".to_string(),
            0.5,
        );
        let color = parse_color(&mid).expect("valid rgba output");
        assert!((color.a - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_rgb_inputs_stay_rgb() {
        let lerp = ColorInterpolator;
        let mid = lerp.lerp(&"rgb(0, 0, 0)".to_string(), &"rgb(255, 255, 255)".to_string(), 0.5);
        assert_eq!(mid, "rgb(128,128,128)");
    }

    #[test]
    fn test_rgba_inputs_stay_rgba() {
        let lerp = ColorInterpolator;
        let mid = lerp.lerp(
            &"rgba(255, 0, 0, 1)".to_string(),
            &"rgba(255, 0, 0, 0)".to_string(),
            0.5,
        );
        assert_eq!(mid, "rgba(255,0,0,0.5)");
    }

    #[test]
    fn test_hsl_inputs_stay_hsl() {
        let lerp = ColorInterpolator;
        let mid = lerp.lerp(
            &"hsl(0, 100%, 20%)".to_string(),
            &"hsl(0, 100%, 60%)".to_string(),
            0.5,
        );
        assert_eq!(mid, "hsl(0, 75%, 40%)");
        let color = parse_color(&mid).expect("valid hsl output");
        assert!((color.r - 0.7).abs() < 0.01);
        assert!((color.g - 0.1).abs() < 0.01);
    }

    #[test]
    fn test_hsla_inputs_stay_hsla() {
        let lerp = ColorInterpolator;
        let mid = lerp.lerp(
            &"hsla(120, 100%, 50%, 1)".to_string(),
            &"hsla(120, 100%, 50%, 0)".to_string(),
            0.5,
        );
        assert_eq!(mid, "hsla(120, 100%, 50%, 0.5)");
    }

    #[test]
    fn test_mixed_notation_falls_back_to_hex() {
        let lerp = ColorInterpolator;
        let mid = lerp.lerp(&"rgb(0, 0, 0)".to_string(), &"hsl(0, 0%, 100%)".to_string(), 0.5);
        assert_eq!(mid, "#808080");
        let named = lerp.lerp(&"black".to_string(), &"white".to_string(), 0.5);
        assert_eq!(named, "#808080");
    }

    #[test]
    fn test_color_overshoot_is_clamped() {
        let lerp = ColorInterpolator;
        let past = lerp.lerp(&"#000000".to_string(), &"#ffffff".to_string(), 1.3);
        assert_eq!(past, "#ffffff");
    }

    #[test]
    fn test_unparseable_color_holds_until_settled() {
        let lerp = ColorInterpolator;
        let start = "not-a-color".to_string();
        let end = "#00ff00".to_string();
        assert_eq!(lerp.lerp(&start, &end, 0.5), start);
        assert_eq!(lerp.lerp(&start, &end, 1.0), end);
    }
}
