//! # chromaboard
//!
//! The engine core of a browser dashboard's two interactive pages — a
//! color-format converter with a custom picker widget, and a freehand
//! drawing canvas with undo/redo and screen recording — extracted from
//! their UI and implemented as plain, synchronous state machines.
//!
//! Two independent subsystems:
//!
//! - **Color model** — one logical color held simultaneously in five
//!   representations (HEX, RGBA, HSL, CMYK, HSV) that stay mutually
//!   consistent through every edit and drag, plus a persisted palette of
//!   saved colors.
//! - **Canvas** — a raster surface painted by pointer strokes, a linear
//!   history of full-buffer snapshots with branch-discarding undo/redo,
//!   and an independent screen/audio capture lifecycle.
//!
//! Everything the host environment provides — key-value storage, capture
//! streams, download delivery — sits behind a trait, so the engines run
//! unchanged in a browser shell or a headless test.

// Shared foundation
pub mod basics;

// Color model engine
pub mod color;
pub mod palette;
pub mod picker;

// Canvas engine
pub mod capture;
pub mod draw;
pub mod history;
pub mod surface;

// Routing shell
pub mod gate;
