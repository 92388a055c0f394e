use crate::domain::service::PlainTextConverter;

/// プレーンテキストの折り返し幅。RFC 2822 の推奨行長に合わせる。
pub const DEFAULT_WRAP_WIDTH: usize = 78;

/// Html2TextConverter は html2text クレートで HTML 本文をプレーンテキストに変換する。
pub struct Html2TextConverter {
    width: usize,
}

impl Html2TextConverter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Default for Html2TextConverter {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

impl PlainTextConverter for Html2TextConverter {
    fn convert(&self, html: &str) -> String {
        match html2text::from_read(html.as_bytes(), self.width) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "failed to convert html template to plain text");
                String::new()
            }
        }
    }
}
