// SPDX-License-Identifier: GPL-3.0-only

//! Still image encoding
//!
//! Converts an RGBA raster snapshot into an encoded JPEG. The codec and
//! quality are fixed; encoding runs on a blocking task so it never stalls
//! the async runtime.

use crate::backends::RasterFrame;
use crate::constants::capture::JPEG_QUALITY;
use crate::errors::CaptureError;
use tracing::debug;

/// An encoded still image
///
/// Immutable once produced; the originating session may be released
/// immediately after.
#[derive(Debug, Clone)]
pub struct StillImage {
    /// Encoded JPEG bytes
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Encode a raster frame as a quality-85 JPEG
///
/// Fails with `NoFrameAvailable` on zero-dimension input and
/// `EncodingFailed` if the encoder rejects the raster.
pub async fn encode(frame: RasterFrame) -> Result<StillImage, CaptureError> {
    if frame.is_degenerate() {
        return Err(CaptureError::NoFrameAvailable);
    }

    let width = frame.width;
    let height = frame.height;

    // CPU-bound, keep it off the async runtime
    let data = tokio::task::spawn_blocking(move || encode_jpeg(&frame))
        .await
        .map_err(|e| CaptureError::EncodingFailed(format!("encoding task error: {}", e)))??;

    debug!(size = data.len(), width, height, "Still encoded");

    Ok(StillImage {
        data,
        width,
        height,
    })
}

/// Encode RGBA pixels as JPEG at the fixed quality
///
/// JPEG has no alpha channel, so the raster is flattened to RGB first.
fn encode_jpeg(frame: &RasterFrame) -> Result<Vec<u8>, CaptureError> {
    let mut rgb = Vec::with_capacity(frame.width as usize * frame.height as usize * 3);
    for pixel in frame.data.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }

    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);

    encoder
        .encode(
            &rgb,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CaptureError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

    Ok(buffer)
}
