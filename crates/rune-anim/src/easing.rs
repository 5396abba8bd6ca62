//! Easing functions for animation timing.
//!
//! Ten curve families, each available in three modes, give thirty Penner
//! easing curves:
//!
//! | Family      | Shape                                         |
//! |-------------|-----------------------------------------------|
//! | Linear      | constant rate                                 |
//! | Quadratic   | `t²`                                          |
//! | Cubic       | `t³`                                          |
//! | Quartic     | `t⁴`                                          |
//! | Quintic     | `t⁵`                                          |
//! | Circular    | quarter circle (`sqrt`)                       |
//! | Exponential | powers of two                                 |
//! | Back        | overshoots by `s` (default 1.70158)           |
//! | Bounce      | four decaying parabolic hops                  |
//! | Elastic     | damped sine, period `d * 0.3`                 |
//!
//! Every raw curve uses the classical `(t, b, c, d)` parameterization:
//! current time, base value, change in value, duration. The interpolation
//! layer only ever calls them normalized through [`ease`].
//!
//! # Usage
//!
//! ```
//! use rune_anim::easing::{ease, EasingFunction, EasingMode};
//!
//! let eased = ease(EasingFunction::Cubic, EasingMode::Out, 0.5);
//! assert!(eased > 0.5);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, Result};

/// Default overshoot for the back family.
pub const DEFAULT_OVERSHOOT: f64 = 1.70158;

/// Signature shared by every raw Penner curve: `(t, b, c, d) -> value`.
pub type PennerFn = fn(f64, f64, f64, f64) -> f64;

/// Curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    #[default]
    Linear,
    Back,
    Bounce,
    Circular,
    Cubic,
    Elastic,
    Exponential,
    Quadratic,
    Quartic,
    Quintic,
}

impl EasingFunction {
    pub const ALL: [EasingFunction; 10] = [
        Self::Linear,
        Self::Back,
        Self::Bounce,
        Self::Circular,
        Self::Cubic,
        Self::Elastic,
        Self::Exponential,
        Self::Quadratic,
        Self::Quartic,
        Self::Quintic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Back => "back",
            Self::Bounce => "bounce",
            Self::Circular => "circular",
            Self::Cubic => "cubic",
            Self::Elastic => "elastic",
            Self::Exponential => "exponential",
            Self::Quadratic => "quadratic",
            Self::Quartic => "quartic",
            Self::Quintic => "quintic",
        }
    }

    /// Look up the raw Penner curve for this family in the given mode.
    pub fn curve(self, mode: EasingMode) -> PennerFn {
        use EasingMode::*;
        match (self, mode) {
            // Linear has no acceleration, all three modes coincide.
            (Self::Linear, In | Out | InOut) => linear,
            (Self::Back, In) => back_in,
            (Self::Back, Out) => back_out,
            (Self::Back, InOut) => back_in_out,
            (Self::Bounce, In) => bounce_in,
            (Self::Bounce, Out) => bounce_out,
            (Self::Bounce, InOut) => bounce_in_out,
            (Self::Circular, In) => circ_in,
            (Self::Circular, Out) => circ_out,
            (Self::Circular, InOut) => circ_in_out,
            (Self::Cubic, In) => cubic_in,
            (Self::Cubic, Out) => cubic_out,
            (Self::Cubic, InOut) => cubic_in_out,
            (Self::Elastic, In) => elastic_in,
            (Self::Elastic, Out) => elastic_out,
            (Self::Elastic, InOut) => elastic_in_out,
            (Self::Exponential, In) => expo_in,
            (Self::Exponential, Out) => expo_out,
            (Self::Exponential, InOut) => expo_in_out,
            (Self::Quadratic, In) => quad_in,
            (Self::Quadratic, Out) => quad_out,
            (Self::Quadratic, InOut) => quad_in_out,
            (Self::Quartic, In) => quart_in,
            (Self::Quartic, Out) => quart_out,
            (Self::Quartic, InOut) => quart_in_out,
            (Self::Quintic, In) => quint_in,
            (Self::Quintic, Out) => quint_out,
            (Self::Quintic, InOut) => quint_in_out,
        }
    }
}

impl fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingFunction {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let function = match normalized.as_str() {
            "linear" => Self::Linear,
            "back" => Self::Back,
            "bounce" => Self::Bounce,
            "circ" | "circular" => Self::Circular,
            "cubic" => Self::Cubic,
            "elastic" => Self::Elastic,
            "expo" | "exponential" => Self::Exponential,
            "quad" | "quadratic" => Self::Quadratic,
            "quart" | "quartic" => Self::Quartic,
            "quint" | "quintic" => Self::Quintic,
            _ => {
                return Err(AnimError::UnsupportedEasing {
                    function: s.to_string(),
                    mode: String::new(),
                })
            }
        };
        Ok(function)
    }
}

/// Which end(s) of the curve are eased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    In,
    Out,
    #[default]
    InOut,
}

impl EasingMode {
    pub const ALL: [EasingMode; 3] = [Self::In, Self::Out, Self::InOut];

    pub fn name(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "in_out",
        }
    }
}

impl fmt::Display for EasingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingMode {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "in" | "easein" => Ok(Self::In),
            "out" | "easeout" => Ok(Self::Out),
            "inout" | "easeinout" => Ok(Self::InOut),
            _ => Err(AnimError::UnsupportedEasing {
                function: String::new(),
                mode: s.to_string(),
            }),
        }
    }
}

/// A (family, mode) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EasingCurve {
    pub function: EasingFunction,
    pub mode: EasingMode,
}

impl EasingCurve {
    pub fn new(function: EasingFunction, mode: EasingMode) -> Self {
        Self { function, mode }
    }

    /// Resolve a curve from its textual family and mode names.
    ///
    /// Fails with [`AnimError::UnsupportedEasing`] naming both halves when
    /// either one is not part of the curve table.
    pub fn parse(function: &str, mode: &str) -> Result<Self> {
        let unsupported = || AnimError::UnsupportedEasing {
            function: function.to_string(),
            mode: mode.to_string(),
        };
        let f = function.parse::<EasingFunction>().map_err(|_| unsupported())?;
        let m = mode.parse::<EasingMode>().map_err(|_| unsupported())?;
        Ok(Self::new(f, m))
    }

    /// Evaluate the curve at normalized progress `t`.
    pub fn evaluate(&self, t: f64) -> f64 {
        ease(self.function, self.mode, t)
    }
}

/// Evaluate an easing curve at normalized progress.
///
/// `t` is clamped to `[0, 1]` and the endpoints are exact: `ease(f, m, 0.0)`
/// is `0.0` and `ease(f, m, 1.0)` is `1.0` for every curve. Back and elastic
/// may leave `[0, 1]` in between.
pub fn ease(function: EasingFunction, mode: EasingMode, t: f64) -> f64 {
    if t.is_nan() || t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    function.curve(mode)(t, 0.0, 1.0, 1.0)
}

// ---------------------------------------------------------------------------
// Raw curves
// ---------------------------------------------------------------------------

pub fn linear(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * t / d + b
}

pub fn quad_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t + b
}

pub fn quad_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}

pub fn quad_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    let t = t - 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

pub fn cubic_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t + b
}

pub fn cubic_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * t + 1.0) + b
}

pub fn cubic_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t * t * t + 2.0) + b
}

pub fn quart_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t * t + b
}

pub fn quart_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    -c * (t * t * t * t - 1.0) + b
}

pub fn quart_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t * t + b;
    }
    let t = t - 2.0;
    -c / 2.0 * (t * t * t * t - 2.0) + b
}

pub fn quint_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t * t * t + b
}

pub fn quint_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * t * t * t + 1.0) + b
}

pub fn quint_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t * t * t + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t * t * t * t * t + 2.0) + b
}

pub fn circ_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * ((1.0 - t * t).max(0.0).sqrt() - 1.0) + b
}

pub fn circ_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (1.0 - t * t).max(0.0).sqrt() + b
}

pub fn circ_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return -c / 2.0 * ((1.0 - t * t).max(0.0).sqrt() - 1.0) + b;
    }
    let t = t - 2.0;
    c / 2.0 * ((1.0 - t * t).max(0.0).sqrt() + 1.0) + b
}

pub fn expo_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        b
    } else {
        c * 2f64.powf(10.0 * (t / d - 1.0)) + b
    }
}

pub fn expo_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == d {
        b + c
    } else {
        c * (1.0 - 2f64.powf(-10.0 * t / d)) + b
    }
}

pub fn expo_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    if t == d {
        return b + c;
    }
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * 2f64.powf(10.0 * (t - 1.0)) + b;
    }
    c / 2.0 * (2.0 - 2f64.powf(-10.0 * (t - 1.0))) + b
}

pub fn back_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    back_in_with(t, b, c, d, DEFAULT_OVERSHOOT)
}

pub fn back_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    back_out_with(t, b, c, d, DEFAULT_OVERSHOOT)
}

pub fn back_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    back_in_out_with(t, b, c, d, DEFAULT_OVERSHOOT)
}

pub fn back_in_with(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
    let t = t / d;
    c * t * t * ((s + 1.0) * t - s) + b
}

pub fn back_out_with(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * ((s + 1.0) * t + s) + 1.0) + b
}

pub fn back_in_out_with(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
    let s = s * 1.525;
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
}

pub fn bounce_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    if t < 1.0 / 2.75 {
        c * (7.5625 * t * t) + b
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        c * (7.5625 * t * t + 0.75) + b
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        c * (7.5625 * t * t + 0.9375) + b
    } else {
        let t = t - 2.625 / 2.75;
        c * (7.5625 * t * t + 0.984375) + b
    }
}

pub fn bounce_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c - bounce_out(d - t, 0.0, c, d) + b
}

pub fn bounce_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t < d / 2.0 {
        bounce_in(t * 2.0, 0.0, c, d) * 0.5 + b
    } else {
        bounce_out(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
    }
}

pub fn elastic_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let t = t / d;
    if t == 1.0 {
        return b + c;
    }
    let p = d * 0.3;
    let s = p / 4.0;
    let t = t - 1.0;
    -(c * 2f64.powf(10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin()) + b
}

pub fn elastic_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let t = t / d;
    if t == 1.0 {
        return b + c;
    }
    let p = d * 0.3;
    let s = p / 4.0;
    c * 2f64.powf(-10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin() + c + b
}

pub fn elastic_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let t = t / (d / 2.0);
    if t == 2.0 {
        return b + c;
    }
    let p = d * (0.3 * 1.5);
    let s = p / 4.0;
    let t = t - 1.0;
    if t < 0.0 {
        return -0.5 * (c * 2f64.powf(10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin()) + b;
    }
    c * 2f64.powf(-10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin() * 0.5 + c + b
}
