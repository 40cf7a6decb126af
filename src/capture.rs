//! Screen/audio capture lifecycle.
//!
//! A small state machine — Idle → Requesting → Recording → Finalizing →
//! Idle — over traits that stand in for the host environment: a
//! [`CaptureSource`] that may grant or refuse a stream, the granted
//! [`CaptureStream`] whose device tracks must be released on every path
//! out of `Recording`, and a [`DownloadSink`] that receives the finished
//! media object (and owns any temporary URL it creates for it).
//!
//! Capture is deliberately independent of the drawing engine: an
//! acquisition failure is logged and swallowed, never surfaced into
//! drawing or history state.

use std::fmt;

/// MIME type of the produced artifact.
pub const CAPTURE_MIME: &str = "video/webm";

/// Download filename of the produced artifact.
pub const CAPTURE_FILENAME: &str = "tab-recording.webm";

// ============================================================================
// Environment seams
// ============================================================================

/// Why a capture stream could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The user or platform refused the permission prompt.
    PermissionDenied,
    /// No display/audio capture available in this environment.
    Unsupported(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::PermissionDenied => write!(f, "capture permission denied"),
            CaptureError::Unsupported(why) => write!(f, "capture unsupported: {why}"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Provider of display+audio capture streams. Acquisition may suspend
/// the caller on a permission prompt; drawing and undo/redo keep working
/// independently in the meantime.
pub trait CaptureSource {
    type Stream: CaptureStream;

    fn acquire(&mut self) -> Result<Self::Stream, CaptureError>;
}

/// A granted capture stream. Implementations must make `release_tracks`
/// idempotent; the recorder calls it on every exit path.
pub trait CaptureStream {
    fn release_tracks(&mut self);
}

/// Receiver of the finished media object. The sink owns the temporary
/// download URL end to end: it creates it, triggers the download, and
/// revokes it before returning.
pub trait DownloadSink {
    fn deliver(&mut self, media: &MediaObject);
}

/// The assembled artifact: all recorded chunks concatenated in arrival
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaObject {
    pub mime: &'static str,
    pub filename: &'static str,
    pub data: Vec<u8>,
}

// ============================================================================
// Recorder
// ============================================================================

/// Lifecycle phase of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePhase {
    #[default]
    Idle,
    /// Waiting on the environment's permission prompt.
    Requesting,
    Recording,
    /// Assembling and delivering the artifact.
    Finalizing,
}

/// Chunked screen/audio recorder.
#[derive(Debug)]
pub struct Recorder<S: CaptureStream> {
    phase: CapturePhase,
    stream: Option<S>,
    chunks: Vec<Vec<u8>>,
}

impl<S: CaptureStream> Recorder<S> {
    pub fn new() -> Self {
        Self {
            phase: CapturePhase::Idle,
            stream: None,
            chunks: Vec::new(),
        }
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn is_recording(&self) -> bool {
        self.phase == CapturePhase::Recording
    }

    /// Request a capture stream and start recording. Only valid while
    /// idle; otherwise a no-op. Acquisition failure is logged and leaves
    /// the recorder idle — recording never started, so nothing needs
    /// resetting.
    pub fn start<Src>(&mut self, source: &mut Src)
    where
        Src: CaptureSource<Stream = S>,
    {
        if self.phase != CapturePhase::Idle {
            return;
        }
        self.phase = CapturePhase::Requesting;
        match source.acquire() {
            Ok(stream) => {
                self.stream = Some(stream);
                self.chunks.clear();
                self.phase = CapturePhase::Recording;
                log::debug!("capture started");
            }
            Err(err) => {
                log::error!("error starting screen recording: {err}");
                self.phase = CapturePhase::Idle;
            }
        }
    }

    /// Accumulate one data chunk. Chunks arriving outside `Recording`
    /// are dropped.
    pub fn on_data(&mut self, chunk: Vec<u8>) {
        if self.phase == CapturePhase::Recording {
            self.chunks.push(chunk);
        }
    }

    /// Stop recording: concatenate the chunks in arrival order into one
    /// `video/webm` object, hand it to the sink, and release the device
    /// tracks — even if the recorder was mid-chunk. Only valid while
    /// recording; otherwise a no-op.
    pub fn stop(&mut self, sink: &mut impl DownloadSink) {
        if self.phase != CapturePhase::Recording {
            return;
        }
        self.phase = CapturePhase::Finalizing;

        let data: Vec<u8> = self.chunks.drain(..).flatten().collect();
        let media = MediaObject {
            mime: CAPTURE_MIME,
            filename: CAPTURE_FILENAME,
            data,
        };
        sink.deliver(&media);

        self.release();
        self.phase = CapturePhase::Idle;
        log::debug!("capture stopped, {} bytes delivered", media.data.len());
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release_tracks();
        }
    }
}

impl<S: CaptureStream> Drop for Recorder<S> {
    /// Tracks are released even if the recorder is dropped mid-recording.
    fn drop(&mut self) {
        self.release();
    }
}

// ============================================================================
// Tests
// ============================================================================
