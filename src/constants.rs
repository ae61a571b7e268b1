// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// Default bound on the wait for the render target's first decodable frame.
    ///
    /// Whichever settles first wins the race between this timer and the
    /// target's ready signal; the loser's continuation is dropped.
    pub const FRAME_READY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default settle delay before acquisition.
    ///
    /// Gives the preview target time to mount before a stream is requested.
    /// Not load-bearing; acquisition would merely fail and be retried without it.
    pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

    /// Poll interval for the CLI preview status loop
    pub const PREVIEW_POLL_INTERVAL: Duration = Duration::from_millis(250);
}

/// Still capture constants
pub mod capture {
    /// JPEG quality for captured stills (fixed lossy codec)
    pub const JPEG_QUALITY: u8 = 85;

    /// Default requested stream width
    pub const DEFAULT_WIDTH: u32 = 1280;

    /// Default requested stream height
    pub const DEFAULT_HEIGHT: u32 = 720;
}

/// Sighting rating bounds
pub mod rating {
    /// Minimum sighting rating
    pub const MIN: u8 = 1;

    /// Maximum sighting rating
    pub const MAX: u8 = 5;
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}
