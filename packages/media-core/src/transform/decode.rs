use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, ImageError, ImageFormat, ImageReader};

use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use crate::transform::media_image::{Frame, MediaImage};
use crate::transform::orientation::Orientation;

/// 画像バイト列をデコードする
///
/// `multi_frame` が true の場合、アニメーション GIF / WebP / APNG は全フレームを保持する。
/// false の場合は先頭フレームのみをデコードし、EXIF Orientation を適用する。
pub fn decode_image(data: &[u8], multi_frame: bool) -> Result<MediaImage, TransformError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(format!("failed to guess format: {e}")))?;

    let format = reader
        .format()
        .ok_or_else(|| TransformError::Decode("unrecognized image format".to_string()))?;

    // ピクセルデータを展開する前にヘッダーだけで寸法を確認する
    let (width, height) = reader.into_dimensions().map_err(decode_error)?;
    validate_source_dimensions(width, height)?;

    if multi_frame && let Some(frames) = decode_frames(data, format, MAX_PIXELS)? {
        return MediaImage::from_frames(frames);
    }

    let img = ImageReader::with_format(Cursor::new(data), format)
        .decode()
        .map_err(decode_error)?;
    let img = Orientation::from_exif(data).apply(img);

    MediaImage::single(img.into_rgba8())
}

/// アニメーションに対応したフォーマットの全フレームをデコードする
///
/// アニメーションを持たない場合は None。
/// 全フレームの合計ピクセル数が `pixel_budget` を超えた時点でデコードを打ち切る。
fn decode_frames(
    data: &[u8],
    format: ImageFormat,
    pixel_budget: u64,
) -> Result<Option<Vec<Frame>>, TransformError> {
    let frames = match format {
        ImageFormat::Gif => GifDecoder::new(Cursor::new(data))
            .map_err(decode_error)?
            .into_frames(),
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(Cursor::new(data)).map_err(decode_error)?;
            if !decoder.has_animation() {
                return Ok(None);
            }
            decoder.into_frames()
        }
        ImageFormat::Png => {
            let decoder = PngDecoder::new(Cursor::new(data)).map_err(decode_error)?;
            if !decoder.is_apng().map_err(decode_error)? {
                return Ok(None);
            }
            decoder.apng().map_err(decode_error)?.into_frames()
        }
        _ => return Ok(None),
    };

    let mut decoded = Vec::new();
    let mut total_pixels: u64 = 0;
    for frame in frames {
        let frame = frame.map_err(decode_error)?;
        let (width, height) = frame.buffer().dimensions();
        total_pixels += width as u64 * height as u64;
        if total_pixels > pixel_budget {
            return Err(TransformError::AnimationTooLarge {
                frames: decoded.len() + 1,
                pixels: total_pixels,
            });
        }

        let (numer, denom) = frame.delay().numer_denom_ms();
        decoded.push(Frame {
            delay_ms: numer.checked_div(denom).unwrap_or(0),
            buffer: frame.into_buffer(),
        });
    }

    Ok(Some(decoded))
}

/// ソース画像の総ピクセル数を検証し、メモリ枯渇を防ぐ
fn validate_source_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    let total_pixels = width as u64 * height as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}

fn decode_error(e: ImageError) -> TransformError {
    TransformError::Decode(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_helpers::{animated_gif, png_bytes};

    #[test]
    fn test_decode_png() {
        let data = png_bytes(64, 48);
        let img = decode_image(&data, true).unwrap();

        assert_eq!((img.width(), img.height()), (64, 48));
        assert!(!img.is_animated());
    }

    #[test]
    fn test_decode_animated_gif_keeps_frames() {
        let data = animated_gif(20, 10, 3);
        let img = decode_image(&data, true).unwrap();

        assert_eq!(img.frames().len(), 3);
        assert_eq!((img.width(), img.height()), (20, 10));
        assert_eq!(img.frames()[0].delay_ms, 100);
    }

    #[test]
    fn test_decode_frames_stops_at_pixel_budget() {
        // 20x10 を3フレーム = 合計600ピクセル
        let data = animated_gif(20, 10, 3);

        let result = decode_frames(&data, ImageFormat::Gif, 500);
        assert!(matches!(
            result,
            Err(TransformError::AnimationTooLarge {
                frames: 3,
                pixels: 600
            })
        ));

        let frames = decode_frames(&data, ImageFormat::Gif, 600).unwrap().unwrap();
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn test_decode_static_takes_first_frame() {
        let data = animated_gif(20, 10, 3);
        let img = decode_image(&data, false).unwrap();

        assert_eq!(img.frames().len(), 1);
        assert_eq!((img.width(), img.height()), (20, 10));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(b"definitely not an image", true);
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_decode_truncated_png() {
        let data = png_bytes(64, 48);
        let result = decode_image(&data[..data.len() / 2], false);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_source_dimensions() {
        assert!(validate_source_dimensions(4000, 3000).is_ok());
        assert!(matches!(
            validate_source_dimensions(20_000, 20_000),
            Err(TransformError::ResolutionTooLarge {
                width: 20_000,
                height: 20_000
            })
        ));
    }
}
