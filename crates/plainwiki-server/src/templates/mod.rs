//! # Templates
//!
//! minijinja-backed [`TemplateRenderer`]. Every template is parsed once at
//! startup, so a broken template stops the server instead of failing on the
//! first request that needs it.
//!
//! Auto-escaping is on for all three templates (their names end in `.html`).
//! The only field a template should mark `|safe` is `html`, the
//! link-rendered page body.

use anyhow::Context;
use minijinja::Environment;
use plainwiki_engine::{PageView, RenderError, TemplateName, TemplateRenderer};
use std::path::Path;

pub const EDIT_TEMPLATE: &str = include_str!("../../templates/edit.html");
pub const VIEW_TEMPLATE: &str = include_str!("../../templates/view.html");
pub const LIST_TEMPLATE: &str = include_str!("../../templates/list.html");

fn builtin_source(template: TemplateName) -> &'static str {
    match template {
        TemplateName::Edit => EDIT_TEMPLATE,
        TemplateName::View => VIEW_TEMPLATE,
        TemplateName::List => LIST_TEMPLATE,
    }
}

pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Renderer using the templates compiled into the binary
    pub fn builtin() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        for template in TemplateName::ALL {
            env.add_template(template.file_name(), builtin_source(template))
                .with_context(|| format!("Invalid built-in template {}", template.file_name()))?;
        }
        Ok(Self { env })
    }

    /// Renderer reading `edit.html`, `view.html` and `list.html` from `dir`
    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        let mut env = Environment::new();
        for template in TemplateName::ALL {
            let path = dir.join(template.file_name());
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            env.add_template_owned(template.file_name(), source)
                .with_context(|| format!("Invalid template {}", path.display()))?;
        }
        Ok(Self { env })
    }

    pub fn from_config(templates_path: Option<&Path>) -> anyhow::Result<Self> {
        match templates_path {
            Some(dir) => {
                log::info!("Loading templates from {}", dir.display());
                Self::from_dir(dir)
            }
            None => {
                log::info!("Using built-in templates");
                Self::builtin()
            }
        }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: TemplateName, view: &PageView) -> Result<String, RenderError> {
        let tmpl = self
            .env
            .get_template(template.file_name())
            .map_err(|_| RenderError::UnknownTemplate(template.file_name()))?;
        tmpl.render(view)
            .map_err(|e| RenderError::Template(e.to_string()))
    }
}
