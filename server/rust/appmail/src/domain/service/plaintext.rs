/// PlainTextConverter は HTML 本文からプレーンテキスト本文を生成する。
#[cfg_attr(test, mockall::automock)]
pub trait PlainTextConverter: Send + Sync {
    fn convert(&self, html: &str) -> String;
}
