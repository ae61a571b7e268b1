// SPDX-License-Identifier: GPL-3.0-only

//! Pet Spotter - camera capture core for the pet-spotting app
//!
//! This library provides the camera acquisition lifecycle, still capture
//! pipeline, and sighting log behind the Pet Spotter application. Map
//! rendering, authentication, and hosted persistence are external
//! collaborators and not modeled here.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`session`]: Camera session state machine (acquire, release, capture)
//! - [`controller`]: Lifecycle sequencing and teardown guards for the UI
//! - [`backends`]: Capture provider and render target contracts
//! - [`pipelines`]: Still image encoding
//! - [`sightings`]: In-memory sighting log with map filtering
//! - [`config`]: User configuration handling
//! - [`storage`]: Photo file storage

pub mod backends;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod pipelines;
pub mod session;
pub mod sightings;
pub mod storage;

// Re-export commonly used types
pub use config::{CaptureConfig, Config, FacingMode};
pub use controller::{CaptureController, CapturePhase, CaptureStatus};
pub use errors::{AppError, AppResult, CameraError, CaptureError, ErrorCategory};
pub use pipelines::still::StillImage;
pub use session::{CameraSession, SessionState};
pub use sightings::{PetKind, Sighting, SightingBoard, SightingFilter};
