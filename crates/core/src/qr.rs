//! QR payload extraction from uploaded ticket scans.

use crate::error::{CoreError, DecodeError};

/// Decode the first readable QR code in an encoded image.
///
/// The container format is guessed from the bytes. Grids that are detected
/// but fail error correction are skipped; if none decodes the result is
/// `DecodeError::NoQrCode`.
pub fn decode_qr(bytes: &[u8]) -> Result<String, DecodeError> {
    let luma = image::load_from_memory(bytes)
        .map_err(|e| DecodeError::Image(e.to_string()))?
        .to_luma8();

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        luma.width() as usize,
        luma.height() as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );

    prepared
        .detect_grids()
        .into_iter()
        .find_map(|grid| grid.decode().ok().map(|(_meta, content)| content))
        .ok_or(DecodeError::NoQrCode)
}

/// Run [`decode_qr`] on the blocking thread pool.
///
/// Decode failures come back as `CoreError::Decode`; a panicked or cancelled
/// worker is `CoreError::Internal`.
pub async fn decode_qr_blocking(bytes: Vec<u8>) -> Result<String, CoreError> {
    tokio::task::spawn_blocking(move || decode_qr(&bytes))
        .await
        .map_err(|e| CoreError::Internal(format!("QR decode task failed: {e}")))?
        .map_err(CoreError::from)
}
