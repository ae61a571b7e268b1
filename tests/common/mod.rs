// SPDX-License-Identifier: GPL-3.0-only
// Not every stub knob is used by every test binary
#![allow(dead_code)]

//! Stub capture collaborators for lifecycle tests
//!
//! The ledger counts live device handles so tests can assert the
//! at-most-one-handle invariant and catch leaks across acquire/release
//! cycles.

use futures::future::BoxFuture;
use pet_spotter::backends::types::{ProviderError, ProviderResult, RasterFrame, StreamConstraints};
use pet_spotter::backends::{CaptureProvider, RenderTarget, StreamHandle};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Stub stream resolution
pub const STUB_WIDTH: u32 = 640;
pub const STUB_HEIGHT: u32 = 480;

/// Shared count of live device handles
#[derive(Clone, Default)]
pub struct HandleLedger(Arc<AtomicUsize>);

impl HandleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently live handles
    pub fn live(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn grant(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// How the stub provider answers a stream request
#[derive(Clone)]
pub enum GrantBehavior {
    /// Grant immediately
    Immediate,
    /// Grant after a delay (simulates a slow permission prompt)
    Delayed(Duration),
    /// Raise the given error
    Fail(ProviderError),
    /// Raise the given error on the first request, grant afterwards
    FailOnce(ProviderError),
}

/// Stub media-capture provider
pub struct StubProvider {
    behavior: GrantBehavior,
    ledger: HandleLedger,
    grants: Arc<AtomicUsize>,
    failed_once: Arc<AtomicBool>,
}

impl StubProvider {
    pub fn new(behavior: GrantBehavior, ledger: HandleLedger) -> Self {
        Self {
            behavior,
            ledger,
            grants: Arc::new(AtomicUsize::new(0)),
            failed_once: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of streams ever granted
    pub fn grants(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.grants)
    }
}

impl CaptureProvider for StubProvider {
    fn request_stream(
        &self,
        _constraints: StreamConstraints,
    ) -> BoxFuture<'_, ProviderResult<Box<dyn StreamHandle>>> {
        let behavior = self.behavior.clone();
        let ledger = self.ledger.clone();
        let grants = Arc::clone(&self.grants);
        let failed_once = Arc::clone(&self.failed_once);
        Box::pin(async move {
            match behavior {
                GrantBehavior::Immediate => {}
                GrantBehavior::Delayed(delay) => tokio::time::sleep(delay).await,
                GrantBehavior::Fail(err) => return Err(err),
                GrantBehavior::FailOnce(err) => {
                    if !failed_once.swap(true, Ordering::SeqCst) {
                        return Err(err);
                    }
                }
            }
            grants.fetch_add(1, Ordering::SeqCst);
            ledger.grant();
            Ok(Box::new(StubStream {
                live: true,
                ledger,
            }) as Box<dyn StreamHandle>)
        })
    }
}

/// Stub granted stream, decrements the ledger only on explicit stop
struct StubStream {
    live: bool,
    ledger: HandleLedger,
}

impl StreamHandle for StubStream {
    fn stop_all_tracks(&mut self) {
        if self.live {
            self.live = false;
            self.ledger.stop();
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn frame_size(&self) -> (u32, u32) {
        (STUB_WIDTH, STUB_HEIGHT)
    }
}

/// How the stub render target reports readiness
#[derive(Clone)]
pub enum ReadyBehavior {
    /// Signal ready after the given delay
    After(Duration),
    /// Never signal ready
    Never,
    /// Fail while decoding
    Error(String),
}

/// Stub rendering/preview target
pub struct StubTarget {
    ready: ReadyBehavior,
    attached: Option<(u32, u32)>,
    snapshots: Arc<AtomicUsize>,
}

impl StubTarget {
    pub fn new(ready: ReadyBehavior) -> Self {
        Self {
            ready,
            attached: None,
            snapshots: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of snapshot (raster read) attempts
    pub fn snapshots(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.snapshots)
    }
}

impl RenderTarget for StubTarget {
    fn attach(&mut self, stream: &dyn StreamHandle) {
        self.attached = Some(stream.frame_size());
    }

    fn detach(&mut self) {
        self.attached = None;
    }

    fn wait_ready(&mut self) -> BoxFuture<'_, Result<(), String>> {
        let ready = self.ready.clone();
        Box::pin(async move {
            match ready {
                ReadyBehavior::After(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(())
                }
                ReadyBehavior::Never => {
                    futures::future::pending::<()>().await;
                    unreachable!()
                }
                ReadyBehavior::Error(msg) => Err(msg),
            }
        })
    }

    fn frame_size(&self) -> (u32, u32) {
        self.attached.unwrap_or((0, 0))
    }

    fn snapshot(&self) -> Option<RasterFrame> {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        let (width, height) = self.attached?;
        Some(RasterFrame::new(
            width,
            height,
            vec![128; RasterFrame::rgba_len(width, height)],
        ))
    }
}
