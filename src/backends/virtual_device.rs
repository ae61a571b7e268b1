// SPDX-License-Identifier: GPL-3.0-only

//! Virtual capture backend
//!
//! A synthetic provider and render target that produce an animated test
//! pattern. Lets the CLI and demos exercise the full acquisition and capture
//! pipeline without camera hardware.

use super::{CaptureProvider, RenderTarget, StreamHandle};
use super::types::{ProviderResult, RasterFrame, StreamConstraints};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Delay before the virtual target reports it can produce frames.
/// Roughly one frame interval at 30fps.
const FIRST_FRAME_DELAY: Duration = Duration::from_millis(33);

/// Virtual capture provider
///
/// Grants every request with a synthetic stream at the requested resolution.
#[derive(Debug, Default)]
pub struct VirtualProvider;

impl VirtualProvider {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureProvider for VirtualProvider {
    fn request_stream(
        &self,
        constraints: StreamConstraints,
    ) -> BoxFuture<'_, ProviderResult<Box<dyn StreamHandle>>> {
        Box::pin(async move {
            debug!(%constraints, "Granting virtual stream");
            Ok(Box::new(VirtualStream {
                width: constraints.width,
                height: constraints.height,
                live: true,
            }) as Box<dyn StreamHandle>)
        })
    }
}

/// A granted virtual stream
struct VirtualStream {
    width: u32,
    height: u32,
    live: bool,
}

impl StreamHandle for VirtualStream {
    fn stop_all_tracks(&mut self) {
        if self.live {
            debug!("Virtual stream stopped");
        }
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Virtual render target producing an animated gradient test pattern
#[derive(Debug, Default)]
pub struct VirtualTarget {
    /// Negotiated size of the attached stream, None when detached
    attached: Option<(u32, u32)>,
    /// Frame counter used to animate the pattern
    frame_counter: AtomicU64,
}

impl VirtualTarget {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for VirtualTarget {
    fn attach(&mut self, stream: &dyn StreamHandle) {
        self.attached = Some(stream.frame_size());
    }

    fn detach(&mut self) {
        self.attached = None;
    }

    fn wait_ready(&mut self) -> BoxFuture<'_, Result<(), String>> {
        let attached = self.attached.is_some();
        Box::pin(async move {
            if !attached {
                return Err("no stream attached".to_string());
            }
            tokio::time::sleep(FIRST_FRAME_DELAY).await;
            Ok(())
        })
    }

    fn frame_size(&self) -> (u32, u32) {
        self.attached.unwrap_or((0, 0))
    }

    fn snapshot(&self) -> Option<RasterFrame> {
        let (width, height) = self.attached?;
        let tick = self.frame_counter.fetch_add(1, Ordering::Relaxed);

        let mut data = Vec::with_capacity(RasterFrame::rgba_len(width, height));
        for y in 0..height {
            for x in 0..width {
                let r = ((x * 255) / width.max(1)) as u8;
                let g = ((y * 255) / height.max(1)) as u8;
                let b = (tick % 256) as u8;
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }

        Some(RasterFrame::new(width, height, data))
    }
}
