//! Fixed-size JPEG thumbnails for ticket photos.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::error::{CoreError, DecodeError};

/// Thumbnail width in pixels.
pub const THUMBNAIL_WIDTH: u32 = 320;

/// Thumbnail height in pixels.
pub const THUMBNAIL_HEIGHT: u32 = 240;

/// JPEG quality used when re-encoding.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 85;

/// Decode an uploaded photo, scale it to exactly 320x240 and encode it as JPEG.
///
/// The aspect ratio is not preserved. Alpha is dropped since JPEG cannot
/// carry it.
pub fn make_thumbnail(bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let source = image::load_from_memory(bytes).map_err(|e| DecodeError::Image(e.to_string()))?;

    let resized = source
        .resize_exact(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, FilterType::Lanczos3)
        .to_rgb8();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, THUMBNAIL_JPEG_QUALITY)
        .encode_image(&resized)
        .map_err(|e| DecodeError::Encode(e.to_string()))?;

    Ok(out.into_inner())
}

/// Run [`make_thumbnail`] on the blocking thread pool.
pub async fn make_thumbnail_blocking(bytes: Vec<u8>) -> Result<Vec<u8>, CoreError> {
    tokio::task::spawn_blocking(move || make_thumbnail(&bytes))
        .await
        .map_err(|e| CoreError::Internal(format!("Thumbnail task failed: {e}")))?
        .map_err(CoreError::from)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use image::{GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    fn encode(img: impl Into<image::DynamicImage>, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.into().write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    fn assert_thumbnail(jpeg: &[u8]) {
        assert_eq!(
            image::guess_format(jpeg).unwrap(),
            ImageFormat::Jpeg,
            "thumbnail must be JPEG"
        );
        let decoded = image::load_from_memory(jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT));
    }

    #[test]
    fn downscales_large_photo() {
        let png = encode(gradient(1920, 1080), ImageFormat::Png);
        assert_thumbnail(&make_thumbnail(&png).unwrap());
    }

    #[test]
    fn upscales_tiny_photo() {
        let png = encode(gradient(3, 7), ImageFormat::Png);
        assert_thumbnail(&make_thumbnail(&png).unwrap());
    }

    #[test]
    fn any_dimensions_yield_fixed_size() {
        for (w, h) in [(1, 1), (240, 320), (320, 240), (641, 97), (1000, 1000)] {
            let png = encode(gradient(w, h), ImageFormat::Png);
            assert_thumbnail(&make_thumbnail(&png).unwrap());
        }
    }

    #[test]
    fn accepts_jpeg_input() {
        let jpeg = encode(gradient(800, 600), ImageFormat::Jpeg);
        assert_thumbnail(&make_thumbnail(&jpeg).unwrap());
    }

    #[test]
    fn drops_alpha_channel() {
        let rgba = RgbaImage::from_pixel(50, 50, Rgba([10, 200, 30, 128]));
        let png = encode(rgba, ImageFormat::Png);
        assert_thumbnail(&make_thumbnail(&png).unwrap());
    }

    #[test]
    fn garbage_bytes_are_image_error() {
        assert_matches!(make_thumbnail(&[0u8; 64]), Err(DecodeError::Image(_)));
    }

    #[tokio::test]
    async fn blocking_wrapper_maps_decode_error() {
        let result = make_thumbnail_blocking(b"not a photo".to_vec()).await;
        assert_matches!(result, Err(CoreError::Decode(DecodeError::Image(_))));
    }
}
