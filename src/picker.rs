//! Interactive color picker state machine.
//!
//! One mutable record holds the current color in every representation plus
//! the picker geometry (hue, saturation/value plane position) and the
//! active drag target. Exactly one channel group is authoritative per edit
//! event; the rest are recomputed eagerly before the call returns, so at
//! any quiescent moment all five representations agree to rounding.
//!
//! The three drag axes of the widget — the 2D saturation/value plane, the
//! hue strip, and the alpha strip — are coordinated through a single
//! [`DragTarget`] so that two axes can never be dragged at once. Any
//! pointer-up clears the target.

use crate::basics::{clamp_unit, iround, round_alpha};
use crate::color::{Cmyk, Hsl, Hsv, Rgba};

/// Default color: the page-mount blue.
pub const DEFAULT_HEX: &str = "#1e88e5";

const DEFAULT_RGBA: Rgba = Rgba {
    r: 30,
    g: 136,
    b: 229,
    a: 1.0,
};

// ============================================================================
// Channel selectors and drag target
// ============================================================================

/// RGBA edit channels. `A` is orthogonal to chroma: editing it updates
/// only the alpha value and its hex encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbaChannel {
    R,
    G,
    B,
    A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HslChannel {
    H,
    S,
    L,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmykChannel {
    C,
    M,
    Y,
    K,
}

/// HSVA panel channels. `H`/`S`/`V` edit the picker geometry directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsvChannel {
    H,
    S,
    V,
    A,
}

/// The one axis currently being dragged, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    /// The 2D saturation/value plane.
    Plane,
    /// The horizontal hue strip.
    Hue,
    /// The horizontal alpha strip.
    Alpha,
}

/// Normalized position on the picker plane, both axes in [0, 1].
/// x maps to saturation, inverted y to value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanePosition {
    pub x: f64,
    pub y: f64,
}

// ============================================================================
// ColorPicker
// ============================================================================

/// Picker state: canonical RGBA plus derived representations and geometry.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    hex_text: String,
    rgba: Rgba,
    hsl: Hsl,
    cmyk: Cmyk,
    hue: u16,
    position: PlanePosition,
    drag: DragTarget,
}

impl ColorPicker {
    /// Create a picker showing the default color, with geometry derived
    /// from it so the consistency invariant holds from the first frame.
    pub fn new() -> Self {
        let mut picker = Self {
            hex_text: DEFAULT_HEX.to_owned(),
            rgba: DEFAULT_RGBA,
            hsl: DEFAULT_RGBA.to_hsl(),
            cmyk: DEFAULT_RGBA.to_cmyk(),
            hue: 0,
            position: PlanePosition::default(),
            drag: DragTarget::None,
        };
        picker.sync_geometry();
        picker
    }

    /// Restore the default color. Also cancels any drag in progress.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The hex field text, which may be a partial edit that does not
    /// currently parse.
    pub fn hex_text(&self) -> &str {
        &self.hex_text
    }

    pub fn rgba(&self) -> Rgba {
        self.rgba
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn cmyk(&self) -> Cmyk {
        self.cmyk
    }

    /// HSV as shown in the HSVA panel, derived from the picker geometry.
    pub fn hsv(&self) -> Hsv {
        Hsv::new(
            self.hue,
            iround(self.position.x * 100.0) as u8,
            iround((1.0 - self.position.y) * 100.0) as u8,
        )
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn position(&self) -> PlanePosition {
        self.position
    }

    pub fn alpha(&self) -> f64 {
        self.rgba.a
    }

    pub fn drag_target(&self) -> DragTarget {
        self.drag
    }

    // ------------------------------------------------------------------
    // Display strings (the copyable values)
    // ------------------------------------------------------------------

    pub fn rgba_css(&self) -> String {
        self.rgba.css()
    }

    pub fn hsl_css(&self) -> String {
        self.hsl.css()
    }

    pub fn hsla_css(&self) -> String {
        self.hsl.css_with_alpha(self.rgba.a)
    }

    pub fn cmyk_css(&self) -> String {
        self.cmyk.css()
    }

    pub fn hsva_css(&self) -> String {
        self.hsv().css_with_alpha(self.rgba.a)
    }

    // ------------------------------------------------------------------
    // Edit protocol — one authoritative channel group per call
    // ------------------------------------------------------------------

    /// Hex field edit. The raw text is retained for display even when it
    /// does not parse; derived channels update only once the digit count
    /// reaches one of the four valid lengths. Text longer than a full
    /// `#RRGGBBAA` is ignored outright.
    pub fn set_hex(&mut self, text: &str) {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() > 8 {
            return;
        }
        self.hex_text = if text.starts_with('#') {
            text.to_owned()
        } else {
            format!("#{text}")
        };
        if let Some(rgba) = Rgba::from_hex(digits) {
            self.rgba = rgba;
            self.derive_from_rgb();
        }
    }

    /// RGBA field edit. R/G/B clamp to [0, 255] and fan out to every
    /// other representation; A clamps to [0, 1], quantizes to hundredths,
    /// and touches only the hex alpha encoding.
    pub fn set_rgba(&mut self, channel: RgbaChannel, value: f64) {
        match channel {
            RgbaChannel::R => self.rgba.r = clamp_to_byte(value),
            RgbaChannel::G => self.rgba.g = clamp_to_byte(value),
            RgbaChannel::B => self.rgba.b = clamp_to_byte(value),
            RgbaChannel::A => {
                self.rgba.a = sanitize_alpha(value);
                self.hex_text = self.rgba.to_hex_alpha();
                return;
            }
        }
        self.hex_text = self.rgba.to_hex_alpha();
        self.hsl = self.rgba.to_hsl();
        self.cmyk = self.rgba.to_cmyk();
        self.sync_geometry();
    }

    /// HSL field edit. Alpha is preserved from the current RGBA.
    pub fn set_hsl(&mut self, channel: HslChannel, value: f64) {
        match channel {
            HslChannel::H => self.hsl.h = clamp_to(value, 360) as u16,
            HslChannel::S => self.hsl.s = clamp_to(value, 100) as u8,
            HslChannel::L => self.hsl.l = clamp_to(value, 100) as u8,
        }
        self.rgba = self.hsl.to_rgb(self.rgba.a);
        self.hex_text = self.rgba.to_hex_alpha();
        self.cmyk = self.rgba.to_cmyk();
        self.sync_geometry();
    }

    /// CMYK field edit. Alpha is preserved from the current RGBA.
    pub fn set_cmyk(&mut self, channel: CmykChannel, value: f64) {
        let v = clamp_to(value, 100) as u8;
        match channel {
            CmykChannel::C => self.cmyk.c = v,
            CmykChannel::M => self.cmyk.m = v,
            CmykChannel::Y => self.cmyk.y = v,
            CmykChannel::K => self.cmyk.k = v,
        }
        self.rgba = self.cmyk.to_rgb(self.rgba.a);
        self.hex_text = self.rgba.to_hex_alpha();
        self.hsl = self.rgba.to_hsl();
        self.sync_geometry();
    }

    /// HSVA panel edit. H/S/V mutate the picker geometry directly and
    /// stay authoritative (the edited axis is not re-derived from RGB);
    /// A follows the alpha path.
    pub fn set_hsv(&mut self, channel: HsvChannel, value: f64) {
        match channel {
            HsvChannel::H => self.hue = clamp_to(value, 360) as u16,
            HsvChannel::S => self.position.x = clamp_to(value, 100) as f64 / 100.0,
            HsvChannel::V => self.position.y = 1.0 - clamp_to(value, 100) as f64 / 100.0,
            HsvChannel::A => {
                self.set_rgba(RgbaChannel::A, value);
                return;
            }
        }
        self.derive_from_geometry();
    }

    /// Load a stored color: hex text and RGBA from the entry, everything
    /// else derived — the inverse of the hex edit path.
    pub fn load(&mut self, hex: &str, rgb: Rgba) {
        self.hex_text = hex.to_owned();
        self.rgba = rgb;
        self.derive_from_rgb();
    }

    // ------------------------------------------------------------------
    // Drag protocol
    // ------------------------------------------------------------------

    /// Begin a drag on one axis and process the initial pointer position
    /// (normalized to the target's bounds).
    pub fn pointer_down(&mut self, target: DragTarget, x: f64, y: f64) {
        if target == DragTarget::None {
            return;
        }
        self.drag = target;
        self.apply_drag(x, y);
    }

    /// Global pointer-move dispatch: updates whichever axis is being
    /// dragged, or does nothing when none is.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.drag != DragTarget::None {
            self.apply_drag(x, y);
        }
    }

    /// Any pointer-up anywhere ends the drag.
    pub fn pointer_up(&mut self) {
        self.drag = DragTarget::None;
    }

    fn apply_drag(&mut self, x: f64, y: f64) {
        let x = clamp_unit(x);
        let y = clamp_unit(y);
        match self.drag {
            DragTarget::None => {}
            DragTarget::Plane => {
                self.position = PlanePosition { x, y };
                self.derive_from_geometry();
            }
            DragTarget::Hue => {
                self.hue = iround(x * 360.0) as u16;
                self.derive_from_geometry();
            }
            DragTarget::Alpha => {
                self.rgba.a = round_alpha(x);
                self.hex_text = self.rgba.to_hex_alpha();
            }
        }
    }

    // ------------------------------------------------------------------
    // Fan-out recompute
    // ------------------------------------------------------------------

    /// RGBA is authoritative: derive HSL, CMYK, and the picker geometry.
    fn derive_from_rgb(&mut self) {
        self.hsl = self.rgba.to_hsl();
        self.cmyk = self.rgba.to_cmyk();
        self.sync_geometry();
    }

    /// Geometry (hue + plane position) is authoritative: derive RGB with
    /// alpha preserved, then hex, HSL, and CMYK. Hue and position are
    /// deliberately not re-derived, so the dragged axis never snaps.
    fn derive_from_geometry(&mut self) {
        self.rgba = self.hsv().to_rgb(self.rgba.a);
        self.hex_text = self.rgba.to_hex_alpha();
        self.hsl = self.rgba.to_hsl();
        self.cmyk = self.rgba.to_cmyk();
    }

    /// Re-derive hue and plane position from the canonical RGBA.
    fn sync_geometry(&mut self) {
        let hsv = self.rgba.to_hsv();
        self.hue = hsv.h;
        self.position = PlanePosition {
            x: hsv.s as f64 / 100.0,
            y: 1.0 - hsv.v as f64 / 100.0,
        };
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_to_byte(value: f64) -> u8 {
    crate::basics::clamp_channel(value, 255) as u8
}

fn clamp_to(value: f64, max: u32) -> u32 {
    crate::basics::clamp_channel(value, max)
}

fn sanitize_alpha(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        round_alpha(clamp_unit(value))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(p: &ColorPicker) {
        // Quiescent invariant: HSL and CMYK agree with the canonical RGBA.
        assert_eq!(p.hsl(), p.rgba().to_hsl());
        assert_eq!(p.cmyk(), p.rgba().to_cmyk());
    }

    #[test]
    fn test_default_state_is_consistent() {
        let p = ColorPicker::new();
        assert_eq!(p.hex_text(), "#1e88e5");
        assert_eq!(p.rgba(), Rgba::opaque(30, 136, 229));
        assert_eq!(p.hue(), 208);
        assert!((p.position().x - 0.87).abs() < 1e-9);
        assert!((p.position().y - 0.10).abs() < 1e-9);
        assert_consistent(&p);
    }

    #[test]
    fn test_hex_edit_valid() {
        let mut p = ColorPicker::new();
        p.set_hex("#ff0000");
        assert_eq!(p.rgba(), Rgba::opaque(255, 0, 0));
        assert_eq!(p.hue(), 0);
        assert!((p.position().x - 1.0).abs() < 1e-9);
        assert!(p.position().y.abs() < 1e-9);
        assert_consistent(&p);
    }

    #[test]
    fn test_hex_edit_partial_is_retained() {
        let mut p = ColorPicker::new();
        let before = p.rgba();
        p.set_hex("#ff00");
        // 4 digits parses (short RGBA form).
        assert_ne!(p.rgba(), before);

        p.set_hex("#ff00a");
        // 5 digits: text kept, channels untouched.
        assert_eq!(p.hex_text(), "#ff00a");
        let mid = p.rgba();
        p.set_hex("#ff00ab");
        assert_eq!(p.rgba(), Rgba::opaque(0xff, 0x00, 0xab));
        assert_ne!(p.rgba(), mid);
        assert_consistent(&p);
    }

    #[test]
    fn test_hex_edit_without_hash() {
        let mut p = ColorPicker::new();
        p.set_hex("00ff00");
        assert_eq!(p.hex_text(), "#00ff00");
        assert_eq!(p.rgba(), Rgba::opaque(0, 255, 0));
    }

    #[test]
    fn test_hex_edit_overlong_is_ignored() {
        let mut p = ColorPicker::new();
        p.set_hex("#123456789");
        assert_eq!(p.hex_text(), "#1e88e5");
    }

    #[test]
    fn test_hex_garbage_is_retained_without_update() {
        let mut p = ColorPicker::new();
        let before = p.rgba();
        p.set_hex("#zzzzzz");
        assert_eq!(p.hex_text(), "#zzzzzz");
        assert_eq!(p.rgba(), before);
    }

    #[test]
    fn test_rgb_edit_fans_out() {
        let mut p = ColorPicker::new();
        p.set_rgba(RgbaChannel::R, 255.0);
        assert_eq!(p.rgba().r, 255);
        assert_eq!(p.hex_text(), "#ff88e5ff");
        assert_consistent(&p);
        // Geometry resynced from the new color.
        assert_eq!(p.hue(), p.rgba().to_hsv().h);
    }

    #[test]
    fn test_rgb_edit_clamps() {
        let mut p = ColorPicker::new();
        p.set_rgba(RgbaChannel::G, 300.0);
        assert_eq!(p.rgba().g, 255);
        p.set_rgba(RgbaChannel::B, -4.0);
        assert_eq!(p.rgba().b, 0);
    }

    #[test]
    fn test_alpha_edit_is_orthogonal() {
        let mut p = ColorPicker::new();
        let hsl = p.hsl();
        let cmyk = p.cmyk();
        let hue = p.hue();
        let pos = p.position();

        p.set_rgba(RgbaChannel::A, 0.37);
        assert_eq!(p.alpha(), 0.37);
        assert_eq!(p.hex_text(), "#1e88e55e");
        assert_eq!(p.hsl(), hsl);
        assert_eq!(p.cmyk(), cmyk);
        assert_eq!(p.hue(), hue);
        assert_eq!(p.position(), pos);
    }

    #[test]
    fn test_alpha_quantized_to_hundredths() {
        let mut p = ColorPicker::new();
        p.set_rgba(RgbaChannel::A, 0.333333);
        assert_eq!(p.alpha(), 0.33);
        p.set_hsv(HsvChannel::A, 0.666666);
        assert_eq!(p.alpha(), 0.67);
    }

    #[test]
    fn test_alpha_edit_non_finite_input() {
        let mut p = ColorPicker::new();
        p.set_rgba(RgbaChannel::A, f64::NAN);
        assert_eq!(p.alpha(), 0.0);
        p.set_rgba(RgbaChannel::A, f64::INFINITY);
        assert_eq!(p.alpha(), 1.0);
        p.set_rgba(RgbaChannel::A, f64::NEG_INFINITY);
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn test_hsl_edit_preserves_alpha() {
        let mut p = ColorPicker::new();
        p.set_rgba(RgbaChannel::A, 0.5);
        p.set_hsl(HslChannel::H, 0.0);
        assert_eq!(p.alpha(), 0.5);
        assert_eq!(p.hsl().h, 0);
        assert_consistent(&p);
    }

    #[test]
    fn test_cmyk_edit_fans_out() {
        let mut p = ColorPicker::new();
        p.set_cmyk(CmykChannel::K, 100.0);
        assert_eq!(p.rgba(), Rgba::opaque(0, 0, 0));
        assert_eq!(p.hex_text(), "#000000ff");
        assert_eq!(p.hsl(), p.rgba().to_hsl());
        assert_eq!(p.hue(), 0);
        // The edited CMYK stays authoritative: K is applied on top of
        // the existing inks rather than snapping to black's derived
        // (0, 0, 0, 100).
        assert_eq!(p.cmyk(), Cmyk::new(87, 41, 0, 100));
    }

    #[test]
    fn test_hsv_field_edits_keep_edited_axis() {
        let mut p = ColorPicker::new();
        p.set_hsv(HsvChannel::S, 50.0);
        assert!((p.position().x - 0.5).abs() < 1e-9);
        p.set_hsv(HsvChannel::V, 75.0);
        assert!((p.position().y - 0.25).abs() < 1e-9);
        p.set_hsv(HsvChannel::H, 120.0);
        assert_eq!(p.hue(), 120);
        // The drag-consistency sample: hsv(120, 50, 75).
        assert_eq!(p.rgba(), Rgba::opaque(96, 191, 96));
        assert_consistent(&p);
    }

    #[test]
    fn test_plane_drag() {
        let mut p = ColorPicker::new();
        p.set_hsv(HsvChannel::H, 120.0);
        p.pointer_down(DragTarget::Plane, 0.5, 0.25);
        assert_eq!(p.drag_target(), DragTarget::Plane);
        assert_eq!(p.rgba(), crate::color::Hsv::new(120, 50, 75).to_rgb(1.0));
        assert_consistent(&p);
        p.pointer_up();
        assert_eq!(p.drag_target(), DragTarget::None);
    }

    #[test]
    fn test_hue_drag_keeps_plane_position() {
        let mut p = ColorPicker::new();
        p.pointer_down(DragTarget::Plane, 0.5, 0.25);
        p.pointer_up();
        p.pointer_down(DragTarget::Hue, 1.0 / 3.0, 0.0);
        assert_eq!(p.hue(), 120);
        assert!((p.position().x - 0.5).abs() < 1e-9);
        assert!((p.position().y - 0.25).abs() < 1e-9);
        assert_consistent(&p);
    }

    #[test]
    fn test_alpha_drag_updates_only_alpha() {
        let mut p = ColorPicker::new();
        let hsl = p.hsl();
        let hue = p.hue();
        p.pointer_down(DragTarget::Alpha, 0.25, 0.0);
        assert_eq!(p.alpha(), 0.25);
        assert_eq!(p.hsl(), hsl);
        assert_eq!(p.hue(), hue);
    }

    #[test]
    fn test_move_without_drag_is_noop() {
        let mut p = ColorPicker::new();
        let before = p.rgba();
        p.pointer_move(0.9, 0.9);
        assert_eq!(p.rgba(), before);
    }

    #[test]
    fn test_drag_coordinates_clamped() {
        let mut p = ColorPicker::new();
        p.pointer_down(DragTarget::Plane, 1.7, -0.3);
        assert_eq!(p.position(), PlanePosition { x: 1.0, y: 0.0 });
    }

    #[test]
    fn test_pointer_down_none_is_noop() {
        let mut p = ColorPicker::new();
        let before = p.rgba();
        p.pointer_down(DragTarget::None, 0.5, 0.5);
        assert_eq!(p.drag_target(), DragTarget::None);
        assert_eq!(p.rgba(), before);
    }

    #[test]
    fn test_reset() {
        let mut p = ColorPicker::new();
        p.set_hex("#000000");
        p.pointer_down(DragTarget::Hue, 0.5, 0.0);
        p.reset();
        assert_eq!(p.hex_text(), DEFAULT_HEX);
        assert_eq!(p.rgba(), Rgba::opaque(30, 136, 229));
        assert_eq!(p.drag_target(), DragTarget::None);
        assert_consistent(&p);
    }

    #[test]
    fn test_load() {
        let mut p = ColorPicker::new();
        p.load("#ff000080", Rgba::new(255, 0, 0, 0.5));
        assert_eq!(p.hex_text(), "#ff000080");
        assert_eq!(p.alpha(), 0.5);
        assert_eq!(p.hue(), 0);
        assert_consistent(&p);
    }

    #[test]
    fn test_css_display_strings() {
        let p = ColorPicker::new();
        assert_eq!(p.rgba_css(), "rgba(30, 136, 229, 1)");
        assert_eq!(p.hsl_css(), "hsl(208, 79%, 51%)");
        assert_eq!(p.hsla_css(), "hsla(208, 79%, 51%, 1)");
        assert_eq!(p.cmyk_css(), "cmyk(87%, 41%, 0%, 10%)");
        assert_eq!(p.hsva_css(), "hsva(208, 87%, 90%, 1)");
    }
}
