//! Raster surface — the drawing target and its snapshots.
//!
//! An owned RGBA8 pixel buffer with row-oriented access, plus
//! [`Snapshot`], a byte-exact capture of the whole buffer used by the
//! undo/redo history. Restoring a snapshot copies pixel bytes verbatim;
//! nothing is ever re-rendered from stroke data.

/// Bytes per pixel (RGBA8).
pub const PIXEL_BYTES: usize = 4;

// ============================================================================
// Surface
// ============================================================================

/// Owned width × height RGBA8 buffer, rows top-down, stride = width * 4.
/// A fresh surface is fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * PIXEL_BYTES],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.width as usize * PIXEL_BYTES
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn row_slice(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {} out of bounds (height={})", y, self.height);
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn row_slice_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row {} out of bounds (height={})", y, self.height);
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Read one pixel. Out-of-bounds coordinates read as transparent.
    pub fn pixel(&self, x: i32, y: i32) -> [u8; 4] {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return [0; 4];
        }
        let i = (y as usize * self.width as usize + x as usize) * PIXEL_BYTES;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Write one pixel. Out-of-bounds coordinates are silently skipped.
    pub fn set_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * PIXEL_BYTES;
        self.data[i..i + PIXEL_BYTES].copy_from_slice(&rgba);
    }

    /// Blank the whole buffer to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Capture the full pixel buffer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
        }
    }

    /// Restore a snapshot's bytes verbatim. A snapshot from a surface of
    /// different dimensions is ignored.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.width != self.width || snapshot.height != self.height {
            return;
        }
        self.data.copy_from_slice(&snapshot.data);
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// A full pixel-buffer capture of the surface at one history step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

// ============================================================================
// Tests
// ============================================================================
