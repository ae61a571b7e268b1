// SPDX-License-Identifier: GPL-3.0-only

//! Capture controller
//!
//! Sequences `CameraSession` calls in response to navigation events and
//! guards against operating on a session whose owning view has since been
//! torn down. The view layer only renders the `CaptureStatus` projection;
//! lifecycle sequencing lives here.
//!
//! Cancellation is cooperative: leaving capture mode clears the active flag,
//! and every state-mutating step after an await point checks it. A stream
//! granted after teardown is released immediately and never surfaces in the
//! status projection.

use crate::config::CaptureConfig;
use crate::errors::{CaptureError, ErrorCategory};
use crate::pipelines::still::StillImage;
use crate::session::CameraSession;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// UI-facing lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePhase {
    /// Not in capture mode, no device held
    #[default]
    Idle,
    /// Waiting for device grant and first frame
    Acquiring,
    /// Live preview available, capture possible
    Ready,
    /// Acquisition failed; `fault` carries the reason
    Failed,
}

/// A categorized, user-readable failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFault {
    pub category: ErrorCategory,
    pub message: String,
}

/// Small state projection rendered by the view layer
///
/// The UI shows one persistent inline message for `fault` plus a single
/// retry affordance regardless of category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptureStatus {
    pub phase: CapturePhase,
    pub fault: Option<CaptureFault>,
}

/// Drives one `CameraSession` through its lifecycle
///
/// Cheap to clone; clones share the same session and status.
#[derive(Clone)]
pub struct CaptureController {
    session: Arc<tokio::sync::Mutex<CameraSession>>,
    status: Arc<Mutex<CaptureStatus>>,
    /// Cleared on teardown; checked before every state-mutating step
    active: Arc<AtomicBool>,
    /// In-flight guard: at most one acquisition at a time
    acquiring: Arc<AtomicBool>,
    config: CaptureConfig,
}

impl CaptureController {
    /// Create a controller owning the given session
    pub fn new(session: CameraSession, config: CaptureConfig) -> Self {
        Self {
            session: Arc::new(tokio::sync::Mutex::new(session)),
            status: Arc::new(Mutex::new(CaptureStatus::default())),
            active: Arc::new(AtomicBool::new(false)),
            acquiring: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    /// Current status projection
    pub fn status(&self) -> CaptureStatus {
        self.status.lock().unwrap().clone()
    }

    /// Whether the capture view is currently mounted
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Enter capture mode and start one acquisition
    ///
    /// Waits the configured settle delay first so the preview target exists
    /// in the UI tree before a stream is requested.
    pub async fn enter_capture_mode(&self) {
        info!("Entering capture mode");
        self.active.store(true, Ordering::SeqCst);

        tokio::time::sleep(self.config.settle_delay()).await;
        if !self.is_active() {
            debug!("Torn down during settle delay");
            return;
        }

        self.run_acquisition().await;
    }

    /// Leave capture mode and release the session
    ///
    /// Clears the active flag first so any in-flight acquisition discards
    /// its eventual result instead of surfacing it.
    pub async fn exit_capture_mode(&self) {
        info!("Exiting capture mode");
        self.active.store(false, Ordering::SeqCst);

        let mut session = self.session.lock().await;
        session.release();
        self.set_status(CapturePhase::Idle, None);
    }

    /// Release and acquire again after a failure
    ///
    /// Retry is always explicit; the controller never retries on its own
    /// after a transient failure.
    pub async fn retry(&self) {
        info!("Retrying acquisition");
        self.active.store(true, Ordering::SeqCst);

        {
            let mut session = self.session.lock().await;
            session.release();
        }

        self.run_acquisition().await;
    }

    /// Capture a still from the live session
    ///
    /// Returns `None` and records a fault in the status projection on
    /// failure; the phase is left untouched so the preview keeps rendering.
    pub async fn capture(&self) -> Option<StillImage> {
        let mut session = self.session.lock().await;

        match session.capture_still().await {
            Ok(still) => {
                info!(width = still.width, height = still.height, "Still captured");
                Some(still)
            }
            Err(err) => {
                warn!(%err, "Capture failed");
                self.set_fault(capture_fault(&err));
                None
            }
        }
    }

    /// Run a single guarded acquisition
    async fn run_acquisition(&self) {
        // Reject overlapping acquisitions from rapid navigation
        if self
            .acquiring
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Acquisition already in flight, ignoring");
            return;
        }

        // All status writes happen under the session lock with the active
        // flag re-checked, so a concurrent teardown can never be followed by
        // a stale phase write from this task.
        let mut session = self.session.lock().await;
        if !self.is_active() {
            self.acquiring.store(false, Ordering::SeqCst);
            return;
        }
        self.set_status(CapturePhase::Acquiring, None);

        let result = session.acquire(&self.config).await;

        if !self.is_active() {
            // Granted after teardown: release immediately, surface nothing
            debug!("Torn down mid-acquisition, discarding result");
            session.release();
        } else {
            match result {
                Ok(()) => self.set_status(CapturePhase::Ready, None),
                Err(err) => {
                    let category = err.category();
                    self.set_status(
                        CapturePhase::Failed,
                        Some(CaptureFault {
                            category,
                            message: category.user_message().to_string(),
                        }),
                    );
                }
            }
        }

        self.acquiring.store(false, Ordering::SeqCst);
    }

    fn set_status(&self, phase: CapturePhase, fault: Option<CaptureFault>) {
        let mut status = self.status.lock().unwrap();
        status.phase = phase;
        status.fault = fault;
    }

    fn set_fault(&self, fault: CaptureFault) {
        self.status.lock().unwrap().fault = Some(fault);
    }
}

impl std::fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureController")
            .field("status", &self.status())
            .field("active", &self.is_active())
            .finish()
    }
}

/// Build the user-facing fault for a capture failure
fn capture_fault(err: &CaptureError) -> CaptureFault {
    let message = match err {
        CaptureError::NotReady => "Please wait for the camera to initialize fully.".to_string(),
        CaptureError::NoFrameAvailable => "Camera is not producing frames yet.".to_string(),
        CaptureError::EncodingFailed(_) | CaptureError::SaveFailed(_) => {
            "Could not capture image.".to_string()
        }
    };
    CaptureFault {
        category: ErrorCategory::Unknown,
        message,
    }
}
