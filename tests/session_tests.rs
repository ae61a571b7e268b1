// SPDX-License-Identifier: GPL-3.0-only

//! Lifecycle tests for the camera session state machine
//!
//! Time is paused in the timeout tests, so timers auto-advance and the
//! 5 second acquisition bound elapses deterministically.

mod common;

use common::{
    GrantBehavior, HandleLedger, ReadyBehavior, STUB_HEIGHT, STUB_WIDTH, StubProvider, StubTarget,
};
use pet_spotter::backends::types::ProviderError;
use pet_spotter::config::CaptureConfig;
use pet_spotter::errors::{CameraError, CaptureError};
use pet_spotter::session::{CameraSession, SessionState};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

fn session_with(
    grant: GrantBehavior,
    ready: ReadyBehavior,
    ledger: &HandleLedger,
) -> CameraSession {
    CameraSession::new(
        Arc::new(StubProvider::new(grant, ledger.clone())),
        Box::new(StubTarget::new(ready)),
    )
}

fn config() -> CaptureConfig {
    CaptureConfig::default()
}

#[tokio::test]
async fn acquire_release_acquire_leaks_no_handle() {
    let ledger = HandleLedger::new();
    let mut session = session_with(
        GrantBehavior::Immediate,
        ReadyBehavior::After(Duration::from_millis(10)),
        &ledger,
    );

    for _ in 0..3 {
        session.acquire(&config()).await.unwrap();
        assert_eq!(*session.state(), SessionState::Ready);
        assert_eq!(ledger.live(), 1);

        session.release();
        assert_eq!(*session.state(), SessionState::Idle);
        assert_eq!(ledger.live(), 0);
    }
}

#[tokio::test]
async fn capture_outside_ready_never_reads_raster() {
    let ledger = HandleLedger::new();
    let target = StubTarget::new(ReadyBehavior::After(Duration::from_millis(10)));
    let snapshots = target.snapshots();
    let mut session = CameraSession::new(
        Arc::new(StubProvider::new(GrantBehavior::Immediate, ledger.clone())),
        Box::new(target),
    );

    let result = session.capture_still().await;
    assert_eq!(result.unwrap_err(), CaptureError::NotReady);
    assert_eq!(snapshots.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn release_on_idle_is_a_noop() {
    let ledger = HandleLedger::new();
    let mut session = session_with(
        GrantBehavior::Immediate,
        ReadyBehavior::After(Duration::from_millis(10)),
        &ledger,
    );

    session.release();
    assert_eq!(*session.state(), SessionState::Idle);
    assert_eq!(ledger.live(), 0);
}

#[tokio::test]
async fn permission_denial_leaves_session_failed() {
    let ledger = HandleLedger::new();
    let mut session = session_with(
        GrantBehavior::Fail(ProviderError::PermissionDenied),
        ReadyBehavior::After(Duration::from_millis(10)),
        &ledger,
    );

    let err = session.acquire(&config()).await.unwrap_err();
    assert_eq!(err, CameraError::PermissionDenied);
    assert_eq!(
        *session.state(),
        SessionState::Failed(CameraError::PermissionDenied)
    );
    assert_eq!(ledger.live(), 0);
}

#[tokio::test]
async fn no_device_yields_no_device_with_zero_handles() {
    let ledger = HandleLedger::new();
    let mut session = session_with(
        GrantBehavior::Fail(ProviderError::NotFound),
        ReadyBehavior::After(Duration::from_millis(10)),
        &ledger,
    );

    let err = session.acquire(&config()).await.unwrap_err();
    assert_eq!(err, CameraError::NoDevice);
    assert_eq!(ledger.live(), 0);
}

#[tokio::test]
async fn immediate_grant_and_fast_ready_resolves_ready() {
    let ledger = HandleLedger::new();
    let mut session = session_with(
        GrantBehavior::Immediate,
        ReadyBehavior::After(Duration::from_millis(10)),
        &ledger,
    );

    session.acquire(&config()).await.unwrap();
    assert_eq!(*session.state(), SessionState::Ready);

    let still = session.capture_still().await.unwrap();
    assert!(!still.data.is_empty());
    assert_eq!((still.width, still.height), (STUB_WIDTH, STUB_HEIGHT));
}

#[tokio::test(start_paused = true)]
async fn never_ready_times_out_at_configured_bound() {
    let ledger = HandleLedger::new();
    let mut session = session_with(GrantBehavior::Immediate, ReadyBehavior::Never, &ledger);

    let started = tokio::time::Instant::now();
    let err = session.acquire(&config()).await.unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err, CameraError::AcquisitionTimeout);
    assert!(elapsed >= Duration::from_secs(5));
    assert!(elapsed < Duration::from_millis(5100), "elapsed {:?}", elapsed);

    // The partially acquired stream was stopped before returning
    assert_eq!(ledger.live(), 0);
    assert!(!session.holds_stream());
}

#[tokio::test(start_paused = true)]
async fn late_ready_after_timeout_does_not_transition() {
    let ledger = HandleLedger::new();
    // Ready signal arrives well after the 5s timeout has fired
    let mut session = session_with(
        GrantBehavior::Immediate,
        ReadyBehavior::After(Duration::from_secs(10)),
        &ledger,
    );

    let err = session.acquire(&config()).await.unwrap_err();
    assert_eq!(err, CameraError::AcquisitionTimeout);
    assert_eq!(
        *session.state(),
        SessionState::Failed(CameraError::AcquisitionTimeout)
    );

    // Let the would-be ready instant pass; the state must not change
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(
        *session.state(),
        SessionState::Failed(CameraError::AcquisitionTimeout)
    );
    assert_eq!(ledger.live(), 0);
}

#[tokio::test]
async fn render_target_error_is_distinct_and_stops_stream() {
    let ledger = HandleLedger::new();
    let mut session = session_with(
        GrantBehavior::Immediate,
        ReadyBehavior::Error("decoder died".to_string()),
        &ledger,
    );

    let err = session.acquire(&config()).await.unwrap_err();
    assert_eq!(err, CameraError::RenderTargetError("decoder died".into()));
    assert_eq!(ledger.live(), 0);
}

#[tokio::test]
async fn failed_session_can_be_reacquired() {
    let ledger = HandleLedger::new();
    let mut session = session_with(
        GrantBehavior::Fail(ProviderError::InUse),
        ReadyBehavior::After(Duration::from_millis(10)),
        &ledger,
    );

    let err = session.acquire(&config()).await.unwrap_err();
    assert_eq!(err, CameraError::DeviceBusy);

    // Failed -> Idle on release, then a fresh acquire is legal
    session.release();
    assert_eq!(*session.state(), SessionState::Idle);
}
