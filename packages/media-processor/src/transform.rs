use std::sync::Arc;

use media_core::{Codec, FetchResult, PassthroughReason, RequestFlags, TransformOutcome};

/// 変換パイプラインをブロッキングスレッドで実行する
///
/// デコード・リサイズ・エンコードは CPU バウンドのため、非同期ランタイムのワーカーを塞がない。
/// タスク自体が失敗（panic）した場合も元データを返す。
pub async fn run(codec: Arc<dyn Codec>, fetched: FetchResult, flags: RequestFlags) -> TransformOutcome {
    // Bytes の clone は参照カウントのみ
    let original = fetched.bytes.clone();
    let content_type = fetched.content_type.clone();

    match tokio::task::spawn_blocking(move || media_core::process(codec.as_ref(), fetched, flags)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "transform task failed, returning original");
            TransformOutcome::Passthrough {
                bytes: original,
                content_type,
                reason: PassthroughReason::TransformFailed,
            }
        }
    }
}
