use thiserror::Error;

/// メディア処理の統合エラー型
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

impl MediaError {
    /// クライアントに返す HTTP ステータス
    pub fn status(&self) -> u16 {
        match self {
            MediaError::Validation(_) => 400,
            MediaError::Fetch(_) | MediaError::Transform(_) => 500,
        }
    }
}

/// 上流リソースの取得エラー
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error Fetching the media: {0}")]
    Network(String),

    #[error("Error Fetching the media: {0}")]
    UpstreamStatus(u16),
}

/// 画像変換エラー
///
/// パイプラインはこれらを区別せず、すべて元データへのフォールバックとして扱う
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("animation exceeds pixel budget ({frames} frames, {pixels} pixels)")]
    AnimationTooLarge { frames: usize, pixels: u64 },

    #[error("resize failed: {0}")]
    Resize(String),

    #[error("encode failed: {0}")]
    Encode(String),
}
