use serde::{Deserialize, Serialize};

use crate::domain::service::plaintext::PlainTextConverter;

/// EmailContent はテンプレートと翻訳で共通の編集可能な本文を表す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    /// 件名テンプレート。本文と同じテンプレート変数を使用できる。
    pub subject: String,
    pub html_template: String,
    /// HTML 版のプレーンテキスト。初回作成時に空であれば HTML から生成される。
    pub text_template: String,
}

impl EmailContent {
    pub fn new(subject: String, html_template: String, text_template: String) -> Self {
        Self {
            subject,
            html_template,
            text_template,
        }
    }

    /// 初回保存時のみ呼び出す。text_template が空なら html_template から生成する。
    pub fn fill_missing_text(&mut self, converter: &dyn PlainTextConverter) {
        if self.text_template.is_empty() {
            self.text_template = converter.convert(&self.html_template);
        }
    }
}
