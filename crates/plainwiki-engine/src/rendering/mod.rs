//! # Rendering
//!
//! - **`render_links`**: rewrites `[Title]` references into links to the
//!   view operation. Pure, no I/O, no knowledge of which pages exist.
//! - **`TemplateRenderer`**: the seam to whatever turns a [`PageView`] into
//!   response bytes. The engine never formats whole pages itself.
//!
//! The link output is trusted HTML: text around the links is passed through
//! untouched, so a body containing markup is emitted as markup.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{PageView, TemplateName};

fn page_link_regex() -> &'static Regex {
    static PAGE_LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    PAGE_LINK_REGEX
        .get_or_init(|| Regex::new(r"\[([a-zA-Z0-9]+)\]").expect("Invalid page link regex"))
}

/// Replace every `[Token]` with `<a href="/view/Token">Token</a>`.
///
/// Brackets around anything that is not a plain alphanumeric token are left
/// as literal text.
pub fn render_links(body: &str) -> String {
    page_link_regex()
        .replace_all(body, r#"<a href="/view/${1}">${1}</a>"#)
        .into_owned()
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template not registered: {0}")]
    UnknownTemplate(&'static str),
    #[error("Template error: {0}")]
    Template(String),
}

/// Produces the final HTML for a named template
pub trait TemplateRenderer {
    fn render(&self, template: TemplateName, view: &PageView) -> Result<String, RenderError>;
}

impl<R: TemplateRenderer + ?Sized> TemplateRenderer for &R {
    fn render(&self, template: TemplateName, view: &PageView) -> Result<String, RenderError> {
        (**self).render(template, view)
    }
}
