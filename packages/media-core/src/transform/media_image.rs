use image::RgbaImage;

use crate::errors::TransformError;

/// デコード済みの1フレーム
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: RgbaImage,
    /// 表示時間（ミリ秒）。静止画は 0
    pub delay_ms: u32,
}

/// デコード済み画像（静止画は1フレーム、アニメーションは複数フレーム）
#[derive(Debug, Clone)]
pub struct MediaImage {
    frames: Vec<Frame>,
}

impl MediaImage {
    /// フレーム列から作成する。空のフレーム列やサイズ0の画像は受け付けない
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self, TransformError> {
        let Some(first) = frames.first() else {
            return Err(TransformError::Decode("image has no frames".to_string()));
        };
        if first.buffer.width() == 0 || first.buffer.height() == 0 {
            return Err(TransformError::Decode("image has zero dimensions".to_string()));
        }

        Ok(Self { frames })
    }

    /// 静止画として作成する
    pub fn single(buffer: RgbaImage) -> Result<Self, TransformError> {
        Self::from_frames(vec![Frame {
            buffer,
            delay_ms: 0,
        }])
    }

    /// 先頭フレームの幅
    pub fn width(&self) -> u32 {
        self.frames[0].buffer.width()
    }

    /// 先頭フレームの高さ
    pub fn height(&self) -> u32 {
        self.frames[0].buffer.height()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn first_frame(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame() {
        let img = MediaImage::single(RgbaImage::new(30, 20)).unwrap();
        assert_eq!(img.width(), 30);
        assert_eq!(img.height(), 20);
        assert!(!img.is_animated());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(MediaImage::from_frames(Vec::new()).is_err());
        assert!(MediaImage::single(RgbaImage::new(0, 10)).is_err());
    }

    #[test]
    fn test_dimensions_come_from_first_frame() {
        let frames = vec![
            Frame {
                buffer: RgbaImage::new(40, 30),
                delay_ms: 100,
            },
            Frame {
                buffer: RgbaImage::new(40, 30),
                delay_ms: 100,
            },
        ];
        let img = MediaImage::from_frames(frames).unwrap();
        assert!(img.is_animated());
        assert_eq!((img.width(), img.height()), (40, 30));
    }
}
