// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for capture operations
//!
//! This module provides command-line functionality for:
//! - Taking photos through the virtual capture backend
//! - Recording sightings
//! - Running a live preview status loop

use pet_spotter::backends::virtual_device::{VirtualProvider, VirtualTarget};
use pet_spotter::config::CaptureConfig;
use pet_spotter::constants::timing;
use pet_spotter::controller::CaptureController;
use pet_spotter::errors::{AppError, AppResult};
use pet_spotter::session::CameraSession;
use pet_spotter::sightings::{GeoPoint, NewSighting, PetKind, SightingBoard};
use pet_spotter::{storage, StillImage};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Build a controller over the virtual capture backend
fn virtual_controller(capture: CaptureConfig) -> CaptureController {
    let session = CameraSession::new(
        Arc::new(VirtualProvider::new()),
        Box::new(VirtualTarget::new()),
    );
    CaptureController::new(session, capture)
}

/// Enter capture mode and take one still
async fn capture_one(capture: CaptureConfig) -> AppResult<StillImage> {
    let controller = virtual_controller(capture);
    controller.enter_capture_mode().await;

    let status = controller.status();
    if let Some(fault) = status.fault {
        return Err(AppError::Other(fault.message));
    }

    let still = controller
        .capture()
        .await
        .ok_or_else(|| AppError::Other("Could not capture image".to_string()))?;
    controller.exit_capture_mode().await;
    Ok(still)
}

/// Take a photo and save it
pub fn take_photo(capture: CaptureConfig, output_dir: Option<PathBuf>) -> AppResult<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let still = capture_one(capture).await?;
        let dir = output_dir.unwrap_or_else(storage::default_photo_dir);
        let path = storage::save_still(&still, dir).await?;

        println!("Saved {} ({}x{})", path.display(), still.width, still.height);
        Ok(())
    })
}

/// Capture a photo and record a sighting, printing it as JSON
#[allow(clippy::too_many_arguments)]
pub fn spot(
    capture: CaptureConfig,
    output_dir: Option<PathBuf>,
    kind: PetKind,
    name: Option<String>,
    rating: u8,
    description: Option<String>,
    latitude: f64,
    longitude: f64,
) -> AppResult<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let still = capture_one(capture).await?;
        let dir = output_dir.unwrap_or_else(storage::default_photo_dir);
        let photo_path = storage::save_still(&still, dir).await?;

        let mut board = SightingBoard::new();
        let sighting = board.add(NewSighting {
            photo_path,
            kind,
            name,
            rating,
            description,
            location: GeoPoint {
                latitude,
                longitude,
                address: None,
            },
        });

        let json = serde_json::to_string_pretty(sighting)
            .map_err(|e| AppError::Other(e.to_string()))?;
        println!("{}", json);
        Ok(())
    })
}

/// Acquire the camera and report readiness until Ctrl-C
pub fn preview(capture: CaptureConfig) -> AppResult<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut session = CameraSession::new(
            Arc::new(VirtualProvider::new()),
            Box::new(VirtualTarget::new()),
        );
        session.acquire(&capture).await?;

        let running = Arc::new(AtomicBool::new(true));
        let handler_flag = Arc::clone(&running);
        ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
            .map_err(|e| AppError::Other(e.to_string()))?;

        println!("Previewing (Ctrl-C to stop)");
        while running.load(Ordering::SeqCst) {
            let (width, height) = session.frame_size();
            println!("state={} frame={}x{}", session.state(), width, height);
            tokio::time::sleep(timing::PREVIEW_POLL_INTERVAL).await;
        }

        session.release();
        println!("Released");
        Ok(())
    })
}
