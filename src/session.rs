// SPDX-License-Identifier: GPL-3.0-only

//! Camera session lifecycle
//!
//! `CameraSession` owns acquisition and release of a single capture device
//! and exposes readiness state:
//!
//! ```text
//!           acquire                acquire ok
//!   Idle ───────────► Acquiring ───────────► Ready
//!    ▲                    │                    │
//!    │                    │ acquire failed     │ release
//!    │                    ▼                    │
//!    └───────────────── Failed ◄───────────────┘
//!          release
//! ```
//!
//! `Idle` is initial; there is no terminal state. The session is reusable
//! across repeated acquire/release cycles. At most one live stream handle
//! exists per session at any time, and none after release.

use crate::backends::{CaptureProvider, RasterFrame, RenderTarget, StreamHandle};
use crate::backends::types::{ProviderError, StreamConstraints};
use crate::config::CaptureConfig;
use crate::errors::{CameraError, CaptureError};
use crate::pipelines::still::{self, StillImage};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Session lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No device held
    Idle,
    /// Stream requested, waiting for grant and first frame
    Acquiring,
    /// Render target has buffered at least one decodable frame
    Ready,
    /// Acquisition failed; the reason is kept for the UI
    Failed(CameraError),
}

impl SessionState {
    /// Whether acquisition may start from this state
    fn can_acquire(&self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Failed(_))
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Acquiring => write!(f, "acquiring"),
            SessionState::Ready => write!(f, "ready"),
            SessionState::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Owns one capture device stream and the render target decoding it
pub struct CameraSession {
    provider: Arc<dyn CaptureProvider>,
    target: Box<dyn RenderTarget>,
    stream: Option<Box<dyn StreamHandle>>,
    state: SessionState,
}

impl CameraSession {
    /// Create a new idle session over the given collaborators
    pub fn new(provider: Arc<dyn CaptureProvider>, target: Box<dyn RenderTarget>) -> Self {
        Self {
            provider,
            target,
            stream: None,
            state: SessionState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether the session currently holds a live stream handle
    pub fn holds_stream(&self) -> bool {
        self.stream.as_ref().is_some_and(|s| s.is_live())
    }

    /// Current preview dimensions, (0, 0) unless `Ready`
    pub fn frame_size(&self) -> (u32, u32) {
        if self.state == SessionState::Ready {
            self.target.frame_size()
        } else {
            (0, 0)
        }
    }

    /// Acquire a capture device and wait for the render target to become ready
    ///
    /// Only legal from `Idle` or `Failed`; calls from other states are
    /// ignored, which guards against duplicate concurrent requests. `Ready`
    /// is only reached once the target has buffered at least one decodable
    /// frame, bounded by the configured timeout. On any failure the partially
    /// acquired stream is stopped before returning and the state carries the
    /// reason.
    pub async fn acquire(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        if !self.state.can_acquire() {
            warn!(state = %self.state, "Ignoring acquire outside Idle/Failed");
            return Ok(());
        }

        self.state = SessionState::Acquiring;
        let constraints = StreamConstraints::from(config);
        info!(%constraints, "Requesting capture stream");

        let stream = match self.provider.request_stream(constraints).await {
            Ok(stream) => stream,
            Err(err) => {
                let reason = map_provider_error(err);
                warn!(%reason, "Stream request failed");
                self.state = SessionState::Failed(reason.clone());
                return Err(reason);
            }
        };

        self.target.attach(stream.as_ref());
        self.stream = Some(stream);

        // Race the target's ready signal against the timeout. The loser's
        // future is dropped, so a late ready signal cannot transition state.
        let wait = self.target.wait_ready();
        let outcome = tokio::time::timeout(config.frame_ready_timeout(), wait).await;
        match outcome {
            Ok(Ok(())) => {
                info!("Render target ready");
                self.state = SessionState::Ready;
                Ok(())
            }
            Ok(Err(msg)) => {
                let reason = CameraError::RenderTargetError(msg);
                warn!(%reason, "Render target failed");
                self.drop_stream();
                self.state = SessionState::Failed(reason.clone());
                Err(reason)
            }
            Err(_elapsed) => {
                warn!(
                    timeout_ms = config.frame_ready_timeout_ms,
                    "Render target never became ready"
                );
                self.drop_stream();
                self.state = SessionState::Failed(CameraError::AcquisitionTimeout);
                Err(CameraError::AcquisitionTimeout)
            }
        }
    }

    /// Release the held device and return to `Idle`
    ///
    /// Idempotent and safe from any state, including when no resource is
    /// held or the owning consumer has already torn down.
    pub fn release(&mut self) {
        if self.stream.is_some() {
            debug!("Releasing capture stream");
        }
        self.drop_stream();
        self.state = SessionState::Idle;
    }

    /// Extract a still image from the current frame
    ///
    /// Only legal from `Ready`; never touches the raster otherwise. Does not
    /// release the session, so the consumer can keep previewing afterwards.
    pub async fn capture_still(&mut self) -> Result<StillImage, CaptureError> {
        if self.state != SessionState::Ready {
            return Err(CaptureError::NotReady);
        }

        let (width, height) = self.target.frame_size();
        if width == 0 || height == 0 {
            return Err(CaptureError::NoFrameAvailable);
        }

        let frame: RasterFrame = self
            .target
            .snapshot()
            .ok_or(CaptureError::NoFrameAvailable)?;

        still::encode(frame).await
    }

    /// Stop tracks and detach, without touching lifecycle state
    fn drop_stream(&mut self) {
        self.target.detach();
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all_tracks();
        }
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("state", &self.state)
            .field("holds_stream", &self.holds_stream())
            .finish()
    }
}

/// Map a provider failure to its session-level reason
fn map_provider_error(err: ProviderError) -> CameraError {
    match err {
        ProviderError::PermissionDenied => CameraError::PermissionDenied,
        ProviderError::NotFound => CameraError::NoDevice,
        ProviderError::InUse => CameraError::DeviceBusy,
        ProviderError::Overconstrained(msg) => CameraError::ConstraintsUnsatisfiable(msg),
    }
}
