use crate::constants::{BADGE_BOX, OCTET_STREAM, PREVIEW_BOX, WEBP_QUALITY};
use crate::errors::TransformError;
use crate::fetch::FetchResult;
use crate::transform::codec::Codec;
use crate::transform::dimensions::bounding_box_scale;
use crate::transform::media_image::MediaImage;
use crate::transform::outcome::{PassthroughReason, TransformOutcome};
use crate::transform::params::{OutputFormat, RequestFlags};

/// Content-Type が変換対象の画像かどうか
///
/// 空文字と `application/octet-stream` は除外し、`image/` で始まるもののみ対象とする。
pub fn is_image_eligible(content_type: &str) -> bool {
    !content_type.is_empty() && content_type != OCTET_STREAM && content_type.starts_with("image/")
}

/// 取得済みのリソースを分類・変換する
///
/// 画像でなければそのまま返す。変換中の失敗はログに記録し、
/// 元のバイト列と Content-Type で Passthrough にする（エラーにはしない）。
pub fn process(codec: &dyn Codec, fetched: FetchResult, flags: RequestFlags) -> TransformOutcome {
    let FetchResult {
        bytes,
        content_type,
        ..
    } = fetched;

    if !is_image_eligible(&content_type) {
        tracing::debug!(content_type = %content_type, "not an image, passing through");
        return TransformOutcome::Passthrough {
            bytes,
            content_type,
            reason: PassthroughReason::NotImage,
        };
    }

    match transform(codec, &bytes, flags) {
        Ok((output, format)) => TransformOutcome::Transformed {
            bytes: output.into(),
            format,
        },
        Err(e) => {
            tracing::warn!(
                content_type = %content_type,
                error = %e,
                "image transform failed, returning original"
            );
            TransformOutcome::Passthrough {
                bytes,
                content_type,
                reason: PassthroughReason::TransformFailed,
            }
        }
    }
}

/// デコード → preview 縮小 → badge 縮小 → エンコード
///
/// badge は preview の後に、その時点の寸法で適用する。
/// badge 指定時は PNG で即座に返し、WebP エンコードには進まない。
fn transform(
    codec: &dyn Codec,
    data: &[u8],
    flags: RequestFlags,
) -> Result<(Vec<u8>, OutputFormat), TransformError> {
    let mut img = codec.decode(data, !flags.is_static)?;

    if flags.is_preview {
        img = fit_within(codec, img, PREVIEW_BOX)?;
    }

    if flags.is_badge {
        img = fit_within(codec, img, BADGE_BOX)?;
        return Ok((codec.encode_png(&img)?, OutputFormat::Png));
    }

    Ok((codec.encode_webp(&img, WEBP_QUALITY)?, OutputFormat::WebP))
}

/// 正方形のボックスに収まるよう縮小する（拡大はしない）
fn fit_within(codec: &dyn Codec, img: MediaImage, bound: u32) -> Result<MediaImage, TransformError> {
    match bounding_box_scale(img.width(), img.height(), bound) {
        Some(scale) => codec.resize(img, scale),
        None => Ok(img),
    }
}
