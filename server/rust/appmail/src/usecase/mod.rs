pub mod create_template;
pub mod create_translation;
pub mod delete_template;
pub mod delete_translation;
pub mod get_template;
pub mod list_templates;
pub mod list_translations;
pub mod render_template;
pub mod resolve_template;
pub mod update_template;
pub mod update_translation;

pub use create_template::{CreateTemplateError, CreateTemplateInput, CreateTemplateUseCase};
pub use create_translation::{
    CreateTranslationError, CreateTranslationInput, CreateTranslationUseCase,
};
pub use delete_template::{DeleteTemplateError, DeleteTemplateUseCase};
pub use delete_translation::{DeleteTranslationError, DeleteTranslationUseCase};
pub use get_template::{GetTemplateError, GetTemplateUseCase};
pub use list_templates::{ListTemplatesError, ListTemplatesUseCase};
pub use list_translations::{ListTranslationsError, ListTranslationsUseCase};
pub use render_template::{
    RenderTemplateError, RenderTemplateInput, RenderTemplateUseCase, RenderedEmail,
};
pub use resolve_template::{ResolveTemplateError, ResolveTemplateUseCase};
pub use update_template::{UpdateTemplateError, UpdateTemplateInput, UpdateTemplateUseCase};
pub use update_translation::{
    UpdateTranslationError, UpdateTranslationInput, UpdateTranslationUseCase,
};
