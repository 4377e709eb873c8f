use std::error::Error as StdError;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use reqwest::header::CONTENT_TYPE;

use crate::errors::FetchError;

/// 上流から取得したリソース
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub bytes: Bytes,
    /// 上流が宣言した Content-Type（未指定なら空文字）
    pub content_type: String,
    pub status: u16,
}

/// HTTP クライアントの設定
#[derive(Debug, Clone)]
pub struct FetcherOptions {
    /// None の場合は reqwest のデフォルトに従う
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("media-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// リモートリソースを取得するクライアント
///
/// 1回の GET でボディ全体をメモリに読み込む。リトライは行わない。
#[derive(Clone)]
pub struct MediaFetcher {
    client: reqwest::Client,
}

impl MediaFetcher {
    /// 新しい MediaFetcher を作成する
    pub fn new(options: &FetcherOptions) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent.as_str());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Network(error_chain(&e)))?;

        Ok(Self { client })
    }

    /// URL を指定してリソースを取得する
    ///
    /// ステータスラインが 200 で届いた後にボディの読み込みが失敗した場合は
    /// エラーを記録し、それまでに読めたバイト列で処理を続ける。
    pub async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(error_chain(&e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(url = %url, status = %status, "unexpected response from upstream");
            return Err(FetchError::UpstreamStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let mut body = BytesMut::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => body.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(
                        url = %url,
                        read = body.len(),
                        error = %error_chain(&e),
                        "failed to read upstream body, continuing with partial data"
                    );
                    break;
                }
            }
        }

        Ok(FetchResult {
            bytes: body.freeze(),
            content_type,
            status: status.as_u16(),
        })
    }
}

/// source を辿ってエラーメッセージを連結する
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
