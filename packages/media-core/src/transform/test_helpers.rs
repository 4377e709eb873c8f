use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{Delay, DynamicImage, ImageFormat, Rgba, RgbaImage};

/// グラデーションの PNG を作成する
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// フレームごとに色が変わるアニメーション GIF を作成する（各100ms）
pub fn animated_gif(width: u32, height: u32, frames: u8) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        let frames = (0..frames).map(|i| {
            let buffer = RgbaImage::from_pixel(width, height, Rgba([i.wrapping_mul(80), 40, 200, 255]));
            image::Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(100, 1))
        });
        encoder.encode_frames(frames).unwrap();
    }
    buf
}
