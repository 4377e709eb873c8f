use bytes::Bytes;

use crate::constants::{CACHE_CONTROL_IMMUTABLE, CACHE_CONTROL_SHORT_LIVED};
use crate::errors::MediaError;
use crate::transform::params::OutputFormat;

/// レスポンスの Cache-Control 方針
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// 300秒。すべてのレスポンスの初期値
    ShortLived,
    /// 1年、immutable
    LongLived,
}

impl CachePolicy {
    pub fn header_value(&self) -> &'static str {
        match self {
            Self::ShortLived => CACHE_CONTROL_SHORT_LIVED,
            Self::LongLived => CACHE_CONTROL_IMMUTABLE,
        }
    }
}

/// 元データをそのまま返す理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughReason {
    /// Content-Type が画像ではない
    NotImage,
    /// デコード・リサイズ・エンコードのいずれかが失敗した
    TransformFailed,
}

/// 1リクエストの処理結果
#[derive(Debug, Clone)]
pub enum TransformOutcome {
    Transformed {
        bytes: Bytes,
        format: OutputFormat,
    },
    Passthrough {
        bytes: Bytes,
        content_type: String,
        reason: PassthroughReason,
    },
    Rejected {
        status: u16,
        message: String,
    },
}

impl TransformOutcome {
    pub fn status(&self) -> u16 {
        match self {
            Self::Rejected { status, .. } => *status,
            _ => 200,
        }
    }

    /// 失敗時のフォールバックも成功時と同じく長期キャッシュになる
    pub fn cache_policy(&self) -> CachePolicy {
        match self {
            Self::Transformed { .. } | Self::Passthrough { .. } => CachePolicy::LongLived,
            Self::Rejected { .. } => CachePolicy::ShortLived,
        }
    }

    /// レスポンスの Content-Type。空文字は「上流が宣言していない」を表す
    pub fn content_type(&self) -> &str {
        match self {
            Self::Transformed { format, .. } => format.content_type(),
            Self::Passthrough { content_type, .. } => content_type,
            Self::Rejected { .. } => "text/plain; charset=utf-8",
        }
    }

    /// レスポンスボディ
    pub fn into_body(self) -> Bytes {
        match self {
            Self::Transformed { bytes, .. } | Self::Passthrough { bytes, .. } => bytes,
            Self::Rejected { message, .. } => Bytes::from(message),
        }
    }
}

impl From<MediaError> for TransformOutcome {
    fn from(err: MediaError) -> Self {
        Self::Rejected {
            status: err.status(),
            message: err.to_string(),
        }
    }
}
