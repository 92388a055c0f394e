//! ロケールの正規化と対応ロケール一覧。
//!
//! `en_GB` と `en-gb` のような表記揺れを吸収し、対応ロケールに無い場合は
//! 言語部分（先頭2文字）、それも無ければ既定ロケールにフォールバックする。

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// フレームワーク既定のロケール。対応ロケール一覧には含まれないため、
/// テンプレートの既定ロケールとしては `en` に読み替える。
pub const FRAMEWORK_DEFAULT_LOCALE: &str = "en-us";

/// Language は対応ロケールのコードと表示名の組。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// 既定の対応ロケール一覧。
pub fn default_languages() -> Vec<Language> {
    [
        ("ar", "Arabic"),
        ("bg", "Bulgarian"),
        ("ca", "Catalan"),
        ("cs", "Czech"),
        ("da", "Danish"),
        ("de", "German"),
        ("el", "Greek"),
        ("en", "English"),
        ("en-au", "Australian English"),
        ("en-gb", "British English"),
        ("es", "Spanish"),
        ("es-ar", "Argentinian Spanish"),
        ("es-mx", "Mexican Spanish"),
        ("fi", "Finnish"),
        ("fr", "French"),
        ("he", "Hebrew"),
        ("hi", "Hindi"),
        ("hu", "Hungarian"),
        ("id", "Indonesian"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("nb", "Norwegian Bokmål"),
        ("nl", "Dutch"),
        ("pl", "Polish"),
        ("pt", "Portuguese"),
        ("pt-br", "Brazilian Portuguese"),
        ("ru", "Russian"),
        ("sv", "Swedish"),
        ("tr", "Turkish"),
        ("uk", "Ukrainian"),
        ("zh-hans", "Simplified Chinese"),
        ("zh-hant", "Traditional Chinese"),
    ]
    .into_iter()
    .map(|(code, name)| Language::new(code, name))
    .collect()
}

/// LookupLogLevel はロケールのフォールバック発生時のログ重要度。
/// 設定値は大文字小文字を区別せず、`warn` も `warning` として受け付ける。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LookupLogLevel {
    Debug,
    Info,
    #[default]
    Warning,
    Error,
}

impl TryFrom<String> for LookupLogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl FromStr for LookupLogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown lookup log level: {other}")),
        }
    }
}

/// 設定されたログ重要度でイベントを出力する。
macro_rules! lookup_event {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            $crate::domain::service::locale::LookupLogLevel::Debug => tracing::debug!($($arg)+),
            $crate::domain::service::locale::LookupLogLevel::Info => tracing::info!($($arg)+),
            $crate::domain::service::locale::LookupLogLevel::Warning => tracing::warn!($($arg)+),
            $crate::domain::service::locale::LookupLogLevel::Error => tracing::error!($($arg)+),
        }
    };
}

pub(crate) use lookup_event;

/// LocaleSettings は対応ロケール、既定ロケール、フォールバック時のログ重要度をまとめた設定。
#[derive(Debug, Clone)]
pub struct LocaleSettings {
    languages: Vec<Language>,
    default_locale: String,
    lookup_log_level: LookupLogLevel,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self::new(
            default_languages(),
            FRAMEWORK_DEFAULT_LOCALE.to_string(),
            LookupLogLevel::default(),
        )
    }
}

impl LocaleSettings {
    pub fn new(
        languages: Vec<Language>,
        default_locale: String,
        lookup_log_level: LookupLogLevel,
    ) -> Self {
        Self {
            languages,
            default_locale,
            lookup_log_level,
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn lookup_log_level(&self) -> LookupLogLevel {
        self.lookup_log_level
    }

    /// 新規テンプレートの既定ロケール。フレームワーク既定の en-us は en に読み替える。
    pub fn template_default_locale(&self) -> &str {
        if self.default_locale == FRAMEWORK_DEFAULT_LOCALE {
            "en"
        } else {
            &self.default_locale
        }
    }

    /// 画面表示用の対応ロケール一覧。英国・豪州英語と区別するため en は米国英語と明示する。
    pub fn languages(&self) -> Vec<Language> {
        self.languages
            .iter()
            .map(|lang| {
                if lang.code == "en" {
                    Language::new("en", "English (American)")
                } else {
                    lang.clone()
                }
            })
            .collect()
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.languages.iter().any(|lang| lang.code == code)
    }

    /// 任意表記のロケールを対応ロケールに正規化する。
    ///
    /// 1. 小文字化し `_` を `-` に置換する
    /// 2. 対応ロケールに含まれればそれを返す
    /// 3. 入力そのままの先頭2文字が対応ロケールに含まれればログを出してそれを返す
    ///    （大文字の `EN-XX` は `EN` となり一致しない）
    /// 4. いずれも無ければ既定ロケールを返す
    pub fn normalize(&self, locale_code: &str) -> String {
        let cleaned = locale_code.to_lowercase().replace('_', "-");
        if self.is_supported(&cleaned) {
            return cleaned;
        }

        let core: String = locale_code.chars().take(2).collect();
        if self.is_supported(&core) {
            lookup_event!(
                self.lookup_log_level,
                requested = %locale_code,
                fallback = %core,
                "email template lookup: could not find exact match for locale code '{}'. Will try '{}' instead",
                locale_code,
                core
            );
            return core;
        }

        self.default_locale.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use super::*;

    /// 出力されたイベントのレベルとメッセージを記録するテスト用レイヤー。
    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<(Level, String)>>>,
    }

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.events
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    fn capture<F: FnOnce()>(f: F) -> Vec<(Level, String)> {
        let layer = CaptureLayer::default();
        let events = layer.events.clone();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, f);
        let captured = events.lock().unwrap().clone();
        captured
    }

    #[test]
    fn test_normalize_cleans_separator_and_case() {
        let settings = LocaleSettings::default();
        for code in ["en_GB", "en-GB", "en-gb"] {
            assert_eq!(settings.normalize(code), "en-gb", "input: {code}");
        }
    }

    #[test]
    fn test_normalize_falls_back_to_core_language() {
        let settings = LocaleSettings::default();
        for code in ["en-US", "en_US", "en-us", "en"] {
            assert_eq!(settings.normalize(code), "en", "input: {code}");
        }
    }

    #[test]
    fn test_core_language_taken_from_raw_input() {
        let settings = LocaleSettings::default();
        assert_eq!(settings.normalize("EN-XX"), "en-us");
        assert_eq!(settings.normalize("DE_CH"), "en-us");
        assert_eq!(settings.normalize("de-xx"), "de");
        assert_eq!(settings.normalize("de_CH"), "de");
    }

    #[test]
    fn test_normalize_unknown_returns_default_locale() {
        let settings = LocaleSettings::new(
            default_languages(),
            "es-mx".to_string(),
            LookupLogLevel::Warning,
        );
        assert_eq!(settings.normalize("xx-yy"), "es-mx");
        assert_eq!(settings.normalize(""), "es-mx");
    }

    #[test]
    fn test_normalize_handles_multibyte_input() {
        let settings = LocaleSettings::default();
        assert_eq!(settings.normalize("日本語"), "en-us");
    }

    #[test]
    fn test_core_fallback_logs_at_warning_by_default() {
        let settings = LocaleSettings::default();
        let events = capture(|| {
            assert_eq!(settings.normalize("de-xx"), "de");
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, Level::WARN);
        assert_eq!(
            events[0].1,
            "email template lookup: could not find exact match for locale code 'de-xx'. Will try 'de' instead"
        );
    }

    #[test]
    fn test_core_fallback_respects_configured_level() {
        let settings = LocaleSettings::new(
            default_languages(),
            FRAMEWORK_DEFAULT_LOCALE.to_string(),
            LookupLogLevel::Error,
        );
        let events = capture(|| {
            settings.normalize("de-xx");
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, Level::ERROR);
    }

    #[test]
    fn test_exact_match_does_not_log() {
        let settings = LocaleSettings::default();
        let events = capture(|| {
            settings.normalize("de");
        });
        assert!(events.is_empty());
    }

    #[test]
    fn test_template_default_locale_maps_framework_default() {
        assert_eq!(LocaleSettings::default().template_default_locale(), "en");

        let settings = LocaleSettings::new(
            default_languages(),
            "de".to_string(),
            LookupLogLevel::Warning,
        );
        assert_eq!(settings.template_default_locale(), "de");
    }

    #[test]
    fn test_languages_label_american_english() {
        let langs = LocaleSettings::default().languages();
        let en = langs.iter().find(|l| l.code == "en").unwrap();
        assert_eq!(en.name, "English (American)");
        let gb = langs.iter().find(|l| l.code == "en-gb").unwrap();
        assert_eq!(gb.name, "British English");
    }

    #[test]
    fn test_lookup_log_level_parsing() {
        assert_eq!("WARNING".parse::<LookupLogLevel>(), Ok(LookupLogLevel::Warning));
        assert_eq!("warn".parse::<LookupLogLevel>(), Ok(LookupLogLevel::Warning));
        assert_eq!("error".parse::<LookupLogLevel>(), Ok(LookupLogLevel::Error));
        assert!("verbose".parse::<LookupLogLevel>().is_err());

        let level: LookupLogLevel = serde_yaml::from_str("info").unwrap();
        assert_eq!(level, LookupLogLevel::Info);
        let level: LookupLogLevel = serde_yaml::from_str("WARNING").unwrap();
        assert_eq!(level, LookupLogLevel::Warning);
        let level: LookupLogLevel = serde_yaml::from_str("Warn").unwrap();
        assert_eq!(level, LookupLogLevel::Warning);
        assert!(serde_yaml::from_str::<LookupLogLevel>("verbose").is_err());
        assert_eq!(serde_json::to_string(&LookupLogLevel::Warning).unwrap(), "\"warning\"");
    }
}
