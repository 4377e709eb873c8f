use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbaImage;

use crate::errors::TransformError;
use crate::transform::dimensions::apply_scale;
use crate::transform::media_image::{Frame, MediaImage};

/// 画像を倍率指定で縮小する
///
/// 縦横に同じ倍率を適用し（アスペクト比維持）、全フレームに同じ寸法を使う。
/// fast_image_resize の Lanczos3 フィルタを使用し、アルファは乗算済みで処理される。
pub fn resize_image(img: MediaImage, scale: f64) -> Result<MediaImage, TransformError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(TransformError::Resize(format!("invalid scale factor: {scale}")));
    }

    let (target_w, target_h) = apply_scale(img.width(), img.height(), scale);
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    let frames = img
        .into_frames()
        .into_iter()
        .map(|frame| {
            let buffer = resize_buffer(&mut resizer, &options, frame.buffer, target_w, target_h)?;
            Ok(Frame {
                buffer,
                delay_ms: frame.delay_ms,
            })
        })
        .collect::<Result<Vec<_>, TransformError>>()?;

    MediaImage::from_frames(frames)
}

fn resize_buffer(
    resizer: &mut Resizer,
    options: &ResizeOptions,
    src: RgbaImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbaImage, TransformError> {
    let (width, height) = src.dimensions();
    let src_image = Image::from_vec_u8(width, height, src.into_raw(), PixelType::U8x4)
        .map_err(|e| TransformError::Resize(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, options)
        .map_err(|e| TransformError::Resize(e.to_string()))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| TransformError::Resize("failed to convert resized image".to_string()))
}
