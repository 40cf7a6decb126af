//! Foundation helpers — rounding and channel clamping.
//!
//! The small numeric vocabulary every other module speaks:
//! half-away-from-zero rounding for the conversion math, and clamps for
//! the various channel ranges.

// ============================================================================
// Rounding
// ============================================================================

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Round a non-negative double to the nearest unsigned integer.
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

/// Round an alpha value to two decimal places.
///
/// Alpha is carried as an f64 in [0, 1] but every edit path quantizes it
/// to hundredths, so displayed and persisted values stay short.
#[inline]
pub fn round_alpha(a: f64) -> f64 {
    (a * 100.0).round() / 100.0
}

// ============================================================================
// Clamping
// ============================================================================

/// Clamp a double into [min, max].
#[inline]
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// Clamp a double into the unit interval [0, 1].
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    clamp(v, 0.0, 1.0)
}

/// Clamp and round a double into an integer channel range [0, max].
///
/// NaN is treated as zero, the same as any other unparseable numeric
/// field input; infinities clamp like ordinary out-of-range values.
#[inline]
pub fn clamp_channel(v: f64, max: u32) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= max as f64 {
        max
    } else {
        uround(v)
    }
}

// ============================================================================
// Tests
// ============================================================================
