/// デコードを許可する最大ピクセル数（1フレームあたり、100MP）
pub const MAX_PIXELS: u64 = 100_000_000;

/// WebP 出力の品質（1-100）
pub const WEBP_QUALITY: u8 = 80;

/// preview 指定時のバウンディングボックス（幅・高さ）
pub const PREVIEW_BOX: u32 = 200;

/// badge 指定時のバウンディングボックス（幅・高さ）
pub const BADGE_BOX: u32 = 96;

/// 短期キャッシュ（300秒）。すべてのレスポンスの初期値
pub const CACHE_CONTROL_SHORT_LIVED: &str = "max-age=300";

/// 長期キャッシュ（1年）
pub const CACHE_CONTROL_IMMUTABLE: &str = "max-age=31536000, immutable";

/// 変換対象外として扱う汎用 Content-Type
pub const OCTET_STREAM: &str = "application/octet-stream";

/// すべてのレスポンスに付与する Content-Security-Policy
pub const CONTENT_SECURITY_POLICY: &str =
    "default-src 'none'; img-src 'self'; media-src 'self'; style-src 'unsafe-inline'";
