//! Freehand drawing board — stroke capture over a raster surface with
//! snapshot undo/redo.
//!
//! Pointer events arrive in display coordinates and are scaled to the
//! backing raster with independent X/Y factors (the ratio of raster size
//! to displayed size). A stroke is a run of line segments stamped with a
//! round brush footprint, rendered live as the pointer moves; when the
//! pointer lifts or leaves, the finished stroke is committed to the
//! history as one full-surface snapshot. Clearing the board is likewise a
//! single undoable step.

use crate::basics::iround;
use crate::color::Rgba;
use crate::history::History;
use crate::surface::Surface;

/// Brush size bounds, matching the tool panel's slider.
pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 20;

// ============================================================================
// Brush
// ============================================================================

/// Stroke appearance: opaque color bytes and a diameter in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub color: [u8; 4],
    pub size: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
            size: 2,
        }
    }
}

// ============================================================================
// DrawingBoard
// ============================================================================

/// Stroke state: idle, or mid-stroke with the last stamped raster point.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StrokeState {
    Idle,
    Stroking { last_x: f64, last_y: f64 },
}

/// The drawing engine: surface, brush, history, and the stroke state
/// machine.
#[derive(Debug)]
pub struct DrawingBoard {
    surface: Surface,
    brush: Brush,
    history: History,
    state: StrokeState,
    scale_x: f64,
    scale_y: f64,
}

impl DrawingBoard {
    /// Create a board with a transparent raster of the given size and a
    /// single initial history snapshot.
    pub fn new(width: u32, height: u32) -> Self {
        let surface = Surface::new(width, height);
        let history = History::new(surface.snapshot());
        Self {
            surface,
            brush: Brush::default(),
            history,
            state: StrokeState::Idle,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking { .. })
    }

    // ------------------------------------------------------------------
    // Tool panel
    // ------------------------------------------------------------------

    /// Set the brush color from a hex string. Invalid hex leaves the
    /// brush unchanged.
    pub fn set_brush_hex(&mut self, hex: &str) {
        if let Some(c) = Rgba::from_hex(hex) {
            self.brush.color = [c.r, c.g, c.b, 255];
        }
    }

    pub fn set_brush_color(&mut self, color: [u8; 4]) {
        self.brush.color = color;
    }

    /// Set the brush diameter, clamped to the slider's 1–20 range.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush.size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// Record the displayed size so pointer coordinates can be scaled to
    /// the raster. A degenerate (zero or negative) size keeps the
    /// current scale — the surface is not ready to be drawn on yet.
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.scale_x = self.surface.width() as f64 / width;
            self.scale_y = self.surface.height() as f64 / height;
        }
    }

    // ------------------------------------------------------------------
    // Stroke state machine
    // ------------------------------------------------------------------

    /// Begin a stroke at a display-space point. No ink is laid down
    /// until the pointer moves.
    pub fn pointer_down(&mut self, display_x: f64, display_y: f64) {
        let (x, y) = self.to_raster(display_x, display_y);
        self.state = StrokeState::Stroking { last_x: x, last_y: y };
    }

    /// Extend the stroke and render the new segment immediately. Ignored
    /// while idle.
    pub fn pointer_move(&mut self, display_x: f64, display_y: f64) {
        let StrokeState::Stroking { last_x, last_y } = self.state else {
            return;
        };
        let (x, y) = self.to_raster(display_x, display_y);
        self.stamp_segment(last_x, last_y, x, y);
        self.state = StrokeState::Stroking { last_x: x, last_y: y };
    }

    /// Finish the stroke and commit one history snapshot. A no-op while
    /// idle, so stray pointer-up/leave events cost nothing.
    pub fn pointer_up(&mut self) {
        if self.is_stroking() {
            self.state = StrokeState::Idle;
            self.history.commit(self.surface.snapshot());
        }
    }

    /// The pointer leaving the board ends the stroke the same way
    /// lifting does.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Blank the surface and commit the blank state as one undoable
    /// step. Cancels any stroke in progress.
    pub fn clear(&mut self) {
        self.state = StrokeState::Idle;
        self.surface.clear();
        self.history.commit(self.surface.snapshot());
    }

    // ------------------------------------------------------------------
    // Undo / redo
    // ------------------------------------------------------------------

    /// Step back one snapshot and restore it pixel-exact. A no-op at the
    /// start of history. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. A no-op at the tail.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn to_raster(&self, display_x: f64, display_y: f64) -> (f64, f64) {
        (display_x * self.scale_x, display_y * self.scale_y)
    }

    /// Stamp a round brush footprint along the segment, stepping one
    /// raster pixel at a time along the major axis.
    fn stamp_segment(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil() as i32;
        if steps == 0 {
            self.stamp_dot(x1, y1);
            return;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.stamp_dot(x0 + dx * t, y0 + dy * t);
        }
    }

    /// Fill a disc of the brush's radius around a raster point. A size-1
    /// brush paints a single pixel.
    fn stamp_dot(&mut self, cx: f64, cy: f64) {
        let cxi = iround(cx);
        let cyi = iround(cy);
        let color = self.brush.color;
        if self.brush.size <= 1 {
            self.surface.set_pixel(cxi, cyi, color);
            return;
        }
        let radius = self.brush.size as f64 / 2.0;
        let r = radius.ceil() as i32;
        let r2 = radius * radius;
        for oy in -r..=r {
            for ox in -r..=r {
                if (ox * ox + oy * oy) as f64 <= r2 {
                    self.surface.set_pixel(cxi + ox, cyi + oy, color);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
