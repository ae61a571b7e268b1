// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capture lifecycle and sighting log

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera acquisition errors
    Camera(CameraError),
    /// Still capture errors
    Capture(CaptureError),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera acquisition errors
///
/// Each failure condition of `CameraSession::acquire` maps to exactly one
/// variant. All of these are recoverable by user retry; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Camera permission denied by the platform
    PermissionDenied,
    /// No capture device present
    NoDevice,
    /// Device is already in use by another consumer
    DeviceBusy,
    /// Requested constraints cannot be satisfied by any device
    ConstraintsUnsatisfiable(String),
    /// Render target never became ready before the configured timeout
    AcquisitionTimeout,
    /// Render target unexpectedly errored while decoding the stream
    RenderTargetError(String),
}

/// Still capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Capture attempted while the session is not `Ready`
    NotReady,
    /// Render target reported a zero-dimension frame
    NoFrameAvailable,
    /// JPEG encoding failed
    EncodingFailed(String),
    /// Save failed
    SaveFailed(String),
}

/// User-facing error category
///
/// The UI shows one inline message plus a single retry affordance
/// regardless of category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Permission,
    NoDevice,
    DeviceBusy,
    Constraints,
    Timeout,
    Unknown,
}

impl ErrorCategory {
    /// User-readable message for this category
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::Permission => {
                "Camera permission denied. Please allow camera access in your settings."
            }
            ErrorCategory::NoDevice => "No camera found on this device.",
            ErrorCategory::DeviceBusy => "Camera is in use by another application.",
            ErrorCategory::Constraints => "Camera constraints not satisfied.",
            ErrorCategory::Timeout => "Camera failed to initialize in time.",
            ErrorCategory::Unknown => "Could not access camera.",
        }
    }
}

impl CameraError {
    /// Map this error to its user-facing category
    pub fn category(&self) -> ErrorCategory {
        match self {
            CameraError::PermissionDenied => ErrorCategory::Permission,
            CameraError::NoDevice => ErrorCategory::NoDevice,
            CameraError::DeviceBusy => ErrorCategory::DeviceBusy,
            CameraError::ConstraintsUnsatisfiable(_) => ErrorCategory::Constraints,
            CameraError::AcquisitionTimeout => ErrorCategory::Timeout,
            CameraError::RenderTargetError(_) => ErrorCategory::Unknown,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera permission denied"),
            CameraError::NoDevice => write!(f, "No capture device found"),
            CameraError::DeviceBusy => write!(f, "Capture device is busy"),
            CameraError::ConstraintsUnsatisfiable(msg) => {
                write!(f, "Constraints unsatisfiable: {}", msg)
            }
            CameraError::AcquisitionTimeout => write!(f, "Timed out waiting for first frame"),
            CameraError::RenderTargetError(msg) => write!(f, "Render target error: {}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NotReady => write!(f, "Camera is not ready"),
            CaptureError::NoFrameAvailable => write!(f, "No frame available for capture"),
            CaptureError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            CaptureError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for CaptureError {}

// Conversions from sub-errors to AppError
impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::SaveFailed(err.to_string())
    }
}
