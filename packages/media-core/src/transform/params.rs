/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    WebP,
    Png,
}

impl OutputFormat {
    /// Content-Type を取得
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::WebP => "image/webp",
            Self::Png => "image/png",
        }
    }
}

/// リクエストのクエリフラグ
///
/// `static` / `preview` / `badge` はキーの有無のみで判定し、値は無視する。
/// 3つは独立しており同時に指定できる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFlags {
    /// 先頭フレームのみをデコードする
    pub is_static: bool,
    /// 200x200 に収まるよう縮小する
    pub is_preview: bool,
    /// 96x96 に収まるよう縮小し、PNG で出力する
    pub is_badge: bool,
}

impl RequestFlags {
    /// クエリのキー一覧からフラグを作成
    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().fold(Self::default(), |mut flags, key| {
            match key {
                "static" => flags.is_static = true,
                "preview" => flags.is_preview = true,
                "badge" => flags.is_badge = true,
                _ => {}
            }
            flags
        })
    }

    /// 最終的な出力フォーマット（badge が WebP より優先）
    pub fn output_format(&self) -> OutputFormat {
        if self.is_badge {
            OutputFormat::Png
        } else {
            OutputFormat::WebP
        }
    }
}
