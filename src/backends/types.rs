// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for capture backends

use crate::config::{CaptureConfig, FacingMode};
use std::sync::Arc;

/// Constraints passed to a capture provider when requesting a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConstraints {
    /// Preferred camera facing
    pub facing_mode: FacingMode,
    /// Preferred width (the granted stream may differ)
    pub width: u32,
    /// Preferred height (the granted stream may differ)
    pub height: u32,
}

impl From<&CaptureConfig> for StreamConstraints {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            facing_mode: config.facing_mode,
            width: config.width,
            height: config.height,
        }
    }
}

impl std::fmt::Display for StreamConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} ({})", self.width, self.height, self.facing_mode)
    }
}

/// A single decoded frame in RGBA, 4 bytes per pixel
///
/// This is the canonical raster format used throughout the capture pipeline.
/// The data is reference-counted so snapshots can be handed to the encoder
/// without copying.
#[derive(Debug, Clone)]
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels, `width * height * 4` bytes
    pub data: Arc<[u8]>,
}

impl RasterFrame {
    /// Create a frame from RGBA bytes
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data: Arc::from(data),
        }
    }

    /// Check whether the frame has zero-dimension geometry
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte length of an RGBA raster with the given geometry
    ///
    /// Widens before multiplying so large configured resolutions cannot
    /// overflow `u32`.
    pub fn rgba_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by a capture provider when a stream request fails
///
/// This mirrors the platform media-capture API's failure surface. The session
/// maps each variant to its `CameraError` counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The user or platform denied camera access
    PermissionDenied,
    /// No device matches the request
    NotFound,
    /// The device is held by another consumer
    InUse,
    /// The constraints cannot be satisfied by any device
    Overconstrained(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::PermissionDenied => write!(f, "Permission denied"),
            ProviderError::NotFound => write!(f, "Device not found"),
            ProviderError::InUse => write!(f, "Device in use"),
            ProviderError::Overconstrained(msg) => write!(f, "Overconstrained: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_from_config() {
        let config = CaptureConfig::default();
        let constraints = StreamConstraints::from(&config);
        assert_eq!(constraints.width, config.width);
        assert_eq!(constraints.height, config.height);
        assert_eq!(constraints.facing_mode, config.facing_mode);
    }

    #[test]
    fn test_rgba_len_does_not_overflow_u32() {
        // 65536 x 65536 RGBA is 16 GiB, well past u32::MAX
        assert_eq!(RasterFrame::rgba_len(65_536, 65_536), 1usize << 34);
        assert_eq!(RasterFrame::rgba_len(1280, 720), 1280 * 720 * 4);
    }

    #[test]
    fn test_degenerate_frame() {
        assert!(RasterFrame::new(0, 720, Vec::new()).is_degenerate());
        assert!(RasterFrame::new(1280, 0, Vec::new()).is_degenerate());
        assert!(!RasterFrame::new(2, 2, vec![0; 16]).is_degenerate());
    }
}
