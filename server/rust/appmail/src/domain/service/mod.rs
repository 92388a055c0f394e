pub mod locale;
pub mod plaintext;
pub mod template_validation;
pub mod template_vars;
pub mod translation_integrity;

pub use locale::{Language, LocaleSettings, LookupLogLevel};
pub use plaintext::PlainTextConverter;
pub use template_validation::{TemplateValidationError, TemplateValidator};
pub use translation_integrity::{TranslationIntegrityError, TranslationIntegrityGuard};
