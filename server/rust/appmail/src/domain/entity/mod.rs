pub mod email_content;
pub mod email_template;
pub mod email_template_translation;
pub mod resolved_template;

pub use email_content::EmailContent;
pub use email_template::EmailTemplate;
pub use email_template_translation::EmailTemplateTranslation;
pub use resolved_template::ResolvedTemplate;
