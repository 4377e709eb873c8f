/// バウンディングボックスに収めるための縮小倍率を計算する（拡大しない）
///
/// `min(box/w, box/h)` が 1.0 未満のときのみ Some を返す。
/// 既にボックス内に収まる画像は None（リサイズ不要）。
pub fn bounding_box_scale(src_w: u32, src_h: u32, bound: u32) -> Option<f64> {
    if src_w == 0 || src_h == 0 {
        return None;
    }

    let scale_w = bound as f64 / src_w as f64;
    let scale_h = bound as f64 / src_h as f64;
    let scale = scale_w.min(scale_h);

    (scale < 1.0).then_some(scale)
}

/// 倍率を適用して新しい寸法を計算する
pub fn apply_scale(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;

    // 最小1pxを保証
    (new_w.max(1), new_h.max(1))
}
