//! Color types and conversions.
//!
//! One logical color lives simultaneously in five representations that
//! must stay mutually consistent to integer rounding:
//!
//! - [`Rgba`] — the canonical value: u8 channels plus f64 alpha in [0, 1]
//! - hex strings — `#RGB` / `#RGBA` / `#RRGGBB` / `#RRGGBBAA`
//! - [`Hsl`] — hue in degrees, saturation/lightness in percent
//! - [`Cmyk`] — ink percentages, no alpha channel
//! - [`Hsv`] — hue/saturation/value, used for picker geometry
//!
//! All conversions are pure functions of the canonical RGBA value; the
//! other representations are derived eagerly, never maintained as
//! independently mutable state.

use crate::basics::{clamp_unit, iround, round_alpha};
use serde::{Deserialize, Serialize};

// ============================================================================
// Rgba — canonical representation
// ============================================================================

/// RGBA color: integer channels in [0, 255], alpha in [0, 1].
///
/// Serializes as `{r, g, b, a}` with alpha defaulting to 1, which is the
/// persisted palette layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: clamp_unit(a),
        }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a hex color string.
    ///
    /// Accepts 3, 4, 6, and 8 hex digits with or without a leading `#`.
    /// Shorthand forms duplicate each nibble to a byte; the trailing byte
    /// of the 4- and 8-digit forms is alpha, normalized to [0, 1] and
    /// rounded to two decimals. Any other length or any non-hex character
    /// yields `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| -> u8 {
            let b = digits.as_bytes()[i];
            (b as char).to_digit(16).unwrap_or(0) as u8
        };
        let wide = |i: usize| nibble(i) << 4 | nibble(i);
        let byte = |i: usize| nibble(i) << 4 | nibble(i + 1);
        match digits.len() {
            3 => Some(Self::opaque(wide(0), wide(1), wide(2))),
            4 => Some(Self::new(
                wide(0),
                wide(1),
                wide(2),
                round_alpha(wide(3) as f64 / 255.0),
            )),
            6 => Some(Self::opaque(byte(0), byte(2), byte(4))),
            8 => Some(Self::new(
                byte(0),
                byte(2),
                byte(4),
                round_alpha(byte(6) as f64 / 255.0),
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha not encoded).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Format as `#rrggbbaa` with alpha quantized to a byte.
    pub fn to_hex_alpha(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r,
            self.g,
            self.b,
            iround(self.a * 255.0).clamp(0, 255) as u8
        )
    }

    /// Convert to HSL. Achromatic input (max == min) yields hue 0 and
    /// saturation 0. Alpha is not part of the result; callers that need
    /// HSLA carry the RGBA alpha through unchanged.
    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let mut h = 0.0;
        let mut s = 0.0;
        if max != min {
            let d = max - min;
            s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            h = hue_sextant(r, g, b, max, d);
        }
        Hsl {
            h: iround(h * 360.0) as u16,
            s: iround(s * 100.0) as u8,
            l: iround(l * 100.0) as u8,
        }
    }

    /// Convert to CMYK. Pure black maps to C=M=Y=0, K=100 rather than
    /// dividing by zero.
    pub fn to_cmyk(&self) -> Cmyk {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let k = 1.0 - r.max(g).max(b);
        let (c, m, y) = if k == 1.0 {
            (0.0, 0.0, 0.0)
        } else {
            (
                (1.0 - r - k) / (1.0 - k),
                (1.0 - g - k) / (1.0 - k),
                (1.0 - b - k) / (1.0 - k),
            )
        };
        Cmyk {
            c: iround(c * 100.0) as u8,
            m: iround(m * 100.0) as u8,
            y: iround(y * 100.0) as u8,
            k: iround(k * 100.0) as u8,
        }
    }

    /// Convert to HSV (picker geometry: saturation = plane x, value =
    /// inverted plane y).
    pub fn to_hsv(&self) -> Hsv {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;
        let s = if max == 0.0 { 0.0 } else { d / max };
        let h = if max == min {
            0.0
        } else {
            hue_sextant(r, g, b, max, d)
        };
        Hsv {
            h: iround(h * 360.0) as u16,
            s: iround(s * 100.0) as u8,
            v: iround(max * 100.0) as u8,
        }
    }

    /// CSS display string, e.g. `rgba(30, 136, 229, 1)`.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Shared hue bucketing for HSL/HSV: which channel is max selects the
/// sextant of the piecewise formula. Result is in [0, 1).
fn hue_sextant(r: f64, g: f64, b: f64, max: f64, d: f64) -> f64 {
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h / 6.0
}

// ============================================================================
// Hsl
// ============================================================================

/// HSL color: hue in degrees [0, 360], saturation/lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    /// Convert to RGB. Alpha is supplied by the caller — the conversion
    /// itself never computes one.
    pub fn to_rgb(&self, alpha: f64) -> Rgba {
        let h = self.h as f64 / 360.0;
        let s = self.s as f64 / 100.0;
        let l = self.l as f64 / 100.0;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };
        Rgba::new(
            iround(r * 255.0) as u8,
            iround(g * 255.0) as u8,
            iround(b * 255.0) as u8,
            alpha,
        )
    }

    /// CSS display string, e.g. `hsl(210, 80%, 50%)`.
    pub fn css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }

    /// CSS display string with alpha, e.g. `hsla(210, 80%, 50%, 0.5)`.
    pub fn css_with_alpha(&self, alpha: f64) -> String {
        format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, alpha)
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// ============================================================================
// Cmyk
// ============================================================================

/// CMYK color: ink percentages in [0, 100]. Carries no alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl Cmyk {
    pub fn new(c: u8, m: u8, y: u8, k: u8) -> Self {
        Self { c, m, y, k }
    }

    /// Convert to RGB. Alpha is supplied by the caller.
    pub fn to_rgb(&self, alpha: f64) -> Rgba {
        let c = self.c as f64 / 100.0;
        let m = self.m as f64 / 100.0;
        let y = self.y as f64 / 100.0;
        let k = self.k as f64 / 100.0;
        Rgba::new(
            iround(255.0 * (1.0 - c) * (1.0 - k)) as u8,
            iround(255.0 * (1.0 - m) * (1.0 - k)) as u8,
            iround(255.0 * (1.0 - y) * (1.0 - k)) as u8,
            alpha,
        )
    }

    /// CSS-style display string, e.g. `cmyk(87%, 41%, 0%, 10%)`.
    pub fn css(&self) -> String {
        format!("cmyk({}%, {}%, {}%, {}%)", self.c, self.m, self.y, self.k)
    }
}

// ============================================================================
// Hsv
// ============================================================================

/// HSV color: hue in degrees, saturation/value in percent.
///
/// This is the picker's native geometry — the plane x axis is saturation,
/// the inverted y axis is value — and is otherwise only shown in the HSVA
/// display panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub fn new(h: u16, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Convert to RGB via the chroma sextant formula. Hue is reduced
    /// modulo 360 first so that 360 behaves as 0.
    pub fn to_rgb(&self, alpha: f64) -> Rgba {
        let h = (self.h % 360) as f64;
        let s = self.s as f64 / 100.0;
        let v = self.v as f64 / 100.0;
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };
        Rgba::new(
            iround((r + m) * 255.0) as u8,
            iround((g + m) * 255.0) as u8,
            iround((b + m) * 255.0) as u8,
            alpha,
        )
    }

    /// CSS-style display string with alpha, e.g. `hsva(210, 87%, 90%, 1)`.
    pub fn css_with_alpha(&self, alpha: f64) -> String {
        format!("hsva({}, {}%, {}%, {})", self.h, self.s, self.v, alpha)
    }
}

// ============================================================================
// Tests
// ============================================================================
