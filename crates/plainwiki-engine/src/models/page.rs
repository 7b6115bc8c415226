use serde::Serialize;

use crate::models::Title;
use crate::rendering::render_links;

/// A wiki page: a title and the raw bytes last saved under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    title: Title,
    body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// A page that has not been written yet
    pub fn empty(title: Title) -> Self {
        Self::new(title, Vec::new())
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body with `[Title]` references turned into links. Not escaped.
    pub fn html(&self) -> String {
        render_links(&String::from_utf8_lossy(&self.body))
    }
}

/// The value handed to a template.
///
/// `html` is the only field a template may emit unescaped. `index` is only
/// populated for the list view, and `title` is absent there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub title: Option<Title>,
    pub body: String,
    pub html: String,
    pub index: Vec<String>,
}

impl PageView {
    /// View for the edit form: the raw body, no link rendering
    pub fn for_edit(page: &Page) -> Self {
        Self {
            title: Some(page.title().clone()),
            body: page.body_text(),
            ..Self::default()
        }
    }

    /// View for display: the body after link rendering
    pub fn for_view(page: &Page) -> Self {
        Self {
            title: Some(page.title().clone()),
            body: page.body_text(),
            html: page.html(),
            index: Vec::new(),
        }
    }

    pub fn for_index(index: Vec<String>) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}
