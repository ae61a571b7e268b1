// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for captured photos

use crate::errors::CaptureError;
use crate::pipelines::still::StillImage;
use std::path::PathBuf;
use tracing::info;

/// Default directory for saved photos (platform pictures dir, falling back
/// to the current directory)
pub fn default_photo_dir() -> PathBuf {
    dirs::picture_dir()
        .map(|dir| dir.join("pet-spotter"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Save a still image with a timestamped filename
///
/// Creates the directory if needed and writes on a blocking task.
pub async fn save_still(still: &StillImage, output_dir: PathBuf) -> Result<PathBuf, CaptureError> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("IMG_{}.jpg", timestamp);
    let filepath = output_dir.join(&filename);

    let data = still.data.clone();
    let write_path = filepath.clone();
    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&output_dir)?;
        std::fs::write(&write_path, &data)
    })
    .await
    .map_err(|e| CaptureError::SaveFailed(format!("save task error: {}", e)))??;

    info!(path = %filepath.display(), "Photo saved");
    Ok(filepath)
}
