// SPDX-License-Identifier: GPL-3.0-only

//! Capture backend abstraction
//!
//! The camera session talks to the platform through two narrow contracts:
//!
//! ```text
//! ┌──────────────────┐
//! │  CameraSession   │  ← Lifecycle state machine
//! └───────┬──────────┘
//!         │
//!    ┌────┴─────────────────┐
//!    ▼                      ▼
//! ┌──────────────────┐  ┌──────────────┐
//! │ CaptureProvider  │  │ RenderTarget │
//! │ (device grants)  │  │ (decoding)   │
//! └──────────────────┘  └──────────────┘
//! ```
//!
//! `CaptureProvider` hands out exclusively owned stream handles;
//! `RenderTarget` decodes an attached stream and reports when it can
//! produce frames. Both are object-safe so tests can substitute stubs.

pub mod types;
pub mod virtual_device;

pub use types::*;

use futures::future::BoxFuture;

/// A granted media stream
///
/// Exclusively owned by one `CameraSession`; at most one live handle exists
/// per session at any time. Dropping a handle without `stop_all_tracks` is a
/// leak of the underlying device, so the session always stops tracks
/// explicitly on release and on failed acquisition.
pub trait StreamHandle: Send {
    /// Stop all tracks of the underlying device resource
    fn stop_all_tracks(&mut self);

    /// Whether the stream still holds a live device resource
    fn is_live(&self) -> bool;

    /// Negotiated stream resolution
    fn frame_size(&self) -> (u32, u32);
}

/// Media-capture provider contract
///
/// Counterpart of the platform device API: one async operation that either
/// grants a stream matching the constraints or raises a `ProviderError`.
pub trait CaptureProvider: Send + Sync {
    /// Request a capture stream matching the given constraints
    fn request_stream(
        &self,
        constraints: StreamConstraints,
    ) -> BoxFuture<'_, ProviderResult<Box<dyn StreamHandle>>>;
}

/// Rendering/preview target contract
///
/// Accepts a stream to begin decoding, signals readiness once it has buffered
/// at least one decodable frame, and can snapshot the current frame into an
/// RGBA raster at native resolution.
pub trait RenderTarget: Send {
    /// Begin decoding the given stream
    fn attach(&mut self, stream: &dyn StreamHandle);

    /// Stop decoding and drop any buffered frames
    fn detach(&mut self);

    /// Resolve once the target has buffered at least one decodable frame
    ///
    /// Errors with a message if the target fails while decoding. The session
    /// races this future against its acquisition timeout.
    fn wait_ready(&mut self) -> BoxFuture<'_, Result<(), String>>;

    /// Current frame dimensions, (0, 0) when no frame is buffered
    fn frame_size(&self) -> (u32, u32);

    /// Snapshot the current frame into an RGBA raster
    fn snapshot(&self) -> Option<RasterFrame>;
}
