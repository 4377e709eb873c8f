use crate::errors::MediaError;

/// `url` クエリパラメータの存在を検証する
///
/// 取得前に呼び出す。未指定・空文字の場合は取得を行わずに 400 とする。
/// URL の形式自体は検証せず、不正な URL は取得時のエラーとして扱う。
pub fn require_url(url: Option<&str>) -> Result<&str, MediaError> {
    match url {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(MediaError::Validation("url is required".to_string())),
    }
}
