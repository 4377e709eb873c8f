use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::errors::TransformError;
use crate::transform::media_image::MediaImage;

/// 画像を WebP (lossy) にエンコードする
///
/// 複数フレームの画像はアニメーション WebP として出力する。
pub fn encode_webp(img: &MediaImage, quality: u8) -> Result<Vec<u8>, TransformError> {
    if img.is_animated() {
        return encode_animated_webp(img, quality);
    }

    let buffer = &img.first_frame().buffer;
    let (width, height) = buffer.dimensions();
    let encoded = webp::Encoder::from_rgba(buffer.as_raw(), width, height)
        .encode_simple(false, quality as f32)
        .map_err(|e| TransformError::Encode(format!("WebP encode failed: {e:?}")))?;

    Ok(encoded.to_vec())
}

fn encode_animated_webp(img: &MediaImage, quality: u8) -> Result<Vec<u8>, TransformError> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| TransformError::Encode("failed to initialize WebP config".to_string()))?;
    config.lossless = 0;
    config.quality = quality as f32;

    // ループ回数は libwebp のデフォルト（無限）
    let mut encoder = webp::AnimEncoder::new(img.width(), img.height(), &config);

    let mut timestamp: i32 = 0;
    for frame in img.frames() {
        let (width, height) = frame.buffer.dimensions();
        encoder.add_frame(webp::AnimFrame::from_rgba(
            frame.buffer.as_raw(),
            width,
            height,
            timestamp,
        ));
        timestamp = timestamp.saturating_add(i32::try_from(frame.delay_ms).unwrap_or(i32::MAX));
    }

    let encoded = encoder
        .try_encode()
        .map_err(|e| TransformError::Encode(format!("animated WebP encode failed: {e:?}")))?;

    Ok(encoded.to_vec())
}

/// 画像の先頭フレームを PNG にエンコードする
pub fn encode_png(img: &MediaImage) -> Result<Vec<u8>, TransformError> {
    let buffer = &img.first_frame().buffer;
    let mut out = Vec::new();

    PngEncoder::new(&mut out)
        .write_image(
            buffer.as_raw(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| TransformError::Encode(format!("PNG encode failed: {e}")))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::media_image::Frame;
    use image::RgbaImage;

    fn frames(count: usize) -> MediaImage {
        let frames = (0..count)
            .map(|i| Frame {
                buffer: RgbaImage::from_pixel(16, 16, image::Rgba([i as u8 * 60, 0, 0, 255])),
                delay_ms: 100,
            })
            .collect();
        MediaImage::from_frames(frames).unwrap()
    }

    #[test]
    fn test_encode_webp() {
        let data = encode_webp(&frames(1), 80).unwrap();

        // WebP は RIFF コンテナ
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WEBP");

        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn test_encode_animated_webp() {
        let data = encode_webp(&frames(3), 80).unwrap();

        assert_eq!(&data[0..4], b"RIFF");
        // アニメーション WebP は ANIM チャンクを持つ
        assert!(data.windows(4).any(|w| w == b"ANIM"));
    }

    #[test]
    fn test_encode_png() {
        let data = encode_png(&frames(2)).unwrap();

        // PNG マジックナンバー確認
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }
}
