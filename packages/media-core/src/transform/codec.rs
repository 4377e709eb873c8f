//! 画像コーデック capability
//!
//! パイプラインはこのトレイト越しにデコード・リサイズ・エンコードを呼び出し、
//! 具体的な実装（[`ImageCodec`]）には依存しない。
//! 実装はプロセス起動時に一度だけ作成し、アプリケーション状態で共有する。

use crate::errors::TransformError;
use crate::transform::media_image::MediaImage;
use crate::transform::{decode, encode, resize};

/// デコード・リサイズ・エンコードを提供する
///
/// どの段階の失敗も [`TransformError`] として返し、呼び出し側は種類を区別しない。
pub trait Codec: Send + Sync {
    /// バイト列をデコードする。`multi_frame` が false なら先頭フレームのみ
    fn decode(&self, data: &[u8], multi_frame: bool) -> Result<MediaImage, TransformError>;

    /// 縦横同一倍率で縮小する
    fn resize(&self, img: MediaImage, scale: f64) -> Result<MediaImage, TransformError>;

    fn encode_webp(&self, img: &MediaImage, quality: u8) -> Result<Vec<u8>, TransformError>;

    fn encode_png(&self, img: &MediaImage) -> Result<Vec<u8>, TransformError>;
}

/// image / fast_image_resize / libwebp による実装
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for ImageCodec {
    fn decode(&self, data: &[u8], multi_frame: bool) -> Result<MediaImage, TransformError> {
        decode::decode_image(data, multi_frame)
    }

    fn resize(&self, img: MediaImage, scale: f64) -> Result<MediaImage, TransformError> {
        resize::resize_image(img, scale)
    }

    fn encode_webp(&self, img: &MediaImage, quality: u8) -> Result<Vec<u8>, TransformError> {
        encode::encode_webp(img, quality)
    }

    fn encode_png(&self, img: &MediaImage) -> Result<Vec<u8>, TransformError> {
        encode::encode_png(img)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::transform::dimensions::apply_scale;
    use image::RgbaImage;
    use std::sync::Mutex;

    /// 操作を記録するだけのモックコーデック
    #[derive(Default)]
    pub struct MockCodec {
        pub dimensions: (u32, u32),
        pub fail_on: Option<FailAt>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum FailAt {
        Decode,
        Resize,
        EncodeWebp,
        EncodePng,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode { multi_frame: bool },
        Resize { from: (u32, u32), to: (u32, u32) },
        EncodeWebp { size: (u32, u32), quality: u8 },
        EncodePng { size: (u32, u32) },
    }

    impl MockCodec {
        pub fn with_dimensions(width: u32, height: u32) -> Self {
            Self {
                dimensions: (width, height),
                ..Default::default()
            }
        }

        pub fn failing(width: u32, height: u32, at: FailAt) -> Self {
            Self {
                dimensions: (width, height),
                fail_on: Some(at),
                ..Default::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }

        fn check(&self, at: FailAt) -> Result<(), TransformError> {
            if self.fail_on == Some(at) {
                return Err(TransformError::Decode(format!("mock failure at {at:?}")));
            }
            Ok(())
        }
    }

    impl Codec for MockCodec {
        fn decode(&self, _data: &[u8], multi_frame: bool) -> Result<MediaImage, TransformError> {
            self.record(RecordedOp::Decode { multi_frame });
            self.check(FailAt::Decode)?;
            let (w, h) = self.dimensions;
            MediaImage::single(RgbaImage::new(w, h))
        }

        fn resize(&self, img: MediaImage, scale: f64) -> Result<MediaImage, TransformError> {
            let from = (img.width(), img.height());
            let to = apply_scale(from.0, from.1, scale);
            self.record(RecordedOp::Resize { from, to });
            self.check(FailAt::Resize)?;
            MediaImage::single(RgbaImage::new(to.0, to.1))
        }

        fn encode_webp(&self, img: &MediaImage, quality: u8) -> Result<Vec<u8>, TransformError> {
            self.record(RecordedOp::EncodeWebp {
                size: (img.width(), img.height()),
                quality,
            });
            self.check(FailAt::EncodeWebp)?;
            Ok(b"webp".to_vec())
        }

        fn encode_png(&self, img: &MediaImage) -> Result<Vec<u8>, TransformError> {
            self.record(RecordedOp::EncodePng {
                size: (img.width(), img.height()),
            });
            self.check(FailAt::EncodePng)?;
            Ok(b"png".to_vec())
        }
    }

    #[test]
    fn test_image_codec_is_object_safe() {
        let codec: std::sync::Arc<dyn Codec> = std::sync::Arc::new(ImageCodec::new());
        let img = MediaImage::single(RgbaImage::new(300, 150)).unwrap();
        let resized = codec.resize(img, 0.5).unwrap();
        assert_eq!((resized.width(), resized.height()), (150, 75));
    }
}
