use serde::Deserialize;

use super::database::DatabaseConfig;
use crate::domain::service::locale::{default_languages, FRAMEWORK_DEFAULT_LOCALE};
use crate::domain::service::{Language, LocaleSettings, LookupLogLevel};

/// Application configuration for appmail server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.locale.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// LocaleConfig は対応ロケールと検索時のフォールバック設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,
    /// ロケールのフォールバック発生時のログ重要度
    #[serde(default)]
    pub lookup_log_level: LookupLogLevel,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            languages: default_languages(),
            lookup_log_level: LookupLogLevel::default(),
        }
    }
}

fn default_locale() -> String {
    FRAMEWORK_DEFAULT_LOCALE.to_string()
}

impl LocaleConfig {
    /// 対応ロケールのコードは正規化済み（小文字・ハイフン区切り）である必要がある。
    /// 新規テンプレートの既定ロケールも対応ロケールに含まれていなければならない。
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.languages.is_empty() {
            anyhow::bail!("locale.languages must not be empty");
        }
        if let Some(lang) = self
            .languages
            .iter()
            .find(|l| l.code != l.code.to_lowercase().replace('_', "-"))
        {
            anyhow::bail!(
                "locale code '{}' must be lowercase and use '-' as separator",
                lang.code
            );
        }
        let settings = self.to_settings();
        let template_default = settings.template_default_locale();
        if !settings.is_supported(template_default) {
            anyhow::bail!(
                "default locale '{}' (templates use '{}') is not one of locale.languages",
                self.default_locale,
                template_default
            );
        }
        Ok(())
    }

    pub fn to_settings(&self) -> LocaleSettings {
        LocaleSettings::new(
            self.languages.clone(),
            self.default_locale.clone(),
            self.lookup_log_level,
        )
    }
}

/// LogConfig はログ出力の設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// "json" または "text"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// 未指定の場合は app.environment から決定する。
    #[serde(default)]
    pub level: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: None,
        }
    }
}

fn default_log_format() -> String {
    "json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let yaml = r#"
app:
  name: appmail-server
"#;
        let cfg = Config::from_yaml(yaml).unwrap();
        assert_eq!(cfg.app.environment, "dev");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.database.is_none());
        assert_eq!(cfg.locale.default_locale, "en-us");
        assert_eq!(cfg.locale.lookup_log_level, LookupLogLevel::Warning);
        assert_eq!(cfg.log.format, "json");

        let settings = cfg.locale.to_settings();
        assert!(settings.is_supported("en-gb"));
        assert_eq!(settings.template_default_locale(), "en");
    }

    #[test]
    fn test_locale_section() {
        let yaml = r#"
app:
  name: appmail-server
locale:
  default_locale: es-mx
  lookup_log_level: error
  languages:
    - code: es
      name: Spanish
    - code: es-mx
      name: Mexican Spanish
"#;
        let cfg = Config::from_yaml(yaml).unwrap();
        let settings = cfg.locale.to_settings();
        assert_eq!(settings.default_locale(), "es-mx");
        assert_eq!(settings.lookup_log_level(), LookupLogLevel::Error);
        assert_eq!(settings.normalize("es_AR"), "es");
        assert_eq!(settings.normalize("en"), "es-mx");
    }

    #[test]
    fn test_unnormalized_language_code_rejected() {
        let yaml = r#"
app:
  name: appmail-server
locale:
  languages:
    - code: en_GB
      name: British English
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_lookup_log_level_is_case_insensitive() {
        let yaml = r#"
app:
  name: appmail-server
locale:
  lookup_log_level: WARNING
"#;
        let cfg = Config::from_yaml(yaml).unwrap();
        assert_eq!(cfg.locale.lookup_log_level, LookupLogLevel::Warning);
    }

    #[test]
    fn test_unsupported_default_locale_rejected() {
        let yaml = r#"
app:
  name: appmail-server
locale:
  languages:
    - code: de
      name: German
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("default locale 'en-us'"));

        let yaml = r#"
app:
  name: appmail-server
locale:
  default_locale: fr
  languages:
    - code: de
      name: German
"#;
        assert!(Config::from_yaml(yaml).is_err());

        let yaml = r#"
app:
  name: appmail-server
locale:
  languages:
    - code: en
      name: English
"#;
        let cfg = Config::from_yaml(yaml).unwrap();
        assert_eq!(cfg.locale.to_settings().template_default_locale(), "en");
    }

    #[test]
    fn test_unknown_lookup_log_level_rejected() {
        let yaml = r#"
app:
  name: appmail-server
locale:
  lookup_log_level: verbose
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }
}
