//! # Controller
//!
//! Runs one wiki operation per request and decides the outcome:
//!
//! | Operation | Page exists        | Page missing            | Store error  |
//! |-----------|--------------------|-------------------------|--------------|
//! | edit      | form with body     | empty form              | empty form   |
//! | save      | overwrite, → view  | create, → view          | server error |
//! | view      | rendered body      | → edit                  | server error |
//! | list      | titles             | n/a                     | server error |
//!
//! Edit treats any failed load as "not written yet", so it never surfaces a
//! store error.

use crate::io::PageStore;
use crate::models::{Page, PageView, TemplateName, Title};
use crate::rendering::TemplateRenderer;
use crate::routing::{Operation, Route};

/// What the HTTP layer should send back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Html(String),
    Redirect(String),
    NotFound,
    ServerError(String),
}

pub struct PageController<R> {
    store: PageStore,
    renderer: R,
}

impl<R: TemplateRenderer> PageController<R> {
    pub fn new(store: PageStore, renderer: R) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    /// Route `path` and run the matching operation.
    ///
    /// `body` is the submitted form field and is only read by save.
    pub fn handle(&self, path: &str, body: Option<String>) -> Response {
        match Route::parse(path) {
            Some(Route::List) => self.list(),
            Some(Route::Page { operation, title }) => self.dispatch(operation, title, body),
            None => {
                log::debug!("Rejected path {path:?}");
                Response::NotFound
            }
        }
    }

    fn dispatch(&self, operation: Operation, title: Title, body: Option<String>) -> Response {
        match operation {
            Operation::Edit => self.edit(&title),
            Operation::Save => self.save(title, body.unwrap_or_default()),
            Operation::View => self.view(&title),
        }
    }

    pub fn edit(&self, title: &Title) -> Response {
        let page = match self.store.load(title) {
            Ok(page) => page,
            Err(e) if e.is_not_found() => {
                log::debug!("Editing new page {title}: {e}");
                Page::empty(title.clone())
            }
            Err(e) => {
                log::error!("Failed to load page {title} for editing: {e}");
                Page::empty(title.clone())
            }
        };
        self.render(TemplateName::Edit, &PageView::for_edit(&page))
    }

    pub fn save(&self, title: Title, body: String) -> Response {
        let page = Page::new(title, body);
        match self.store.save(&page) {
            Ok(()) => Response::Redirect(Operation::View.path_for(page.title())),
            Err(e) => {
                log::error!("Failed to save page {}: {e}", page.title());
                Response::ServerError(e.to_string())
            }
        }
    }

    pub fn view(&self, title: &Title) -> Response {
        match self.store.load(title) {
            Ok(page) => self.render(TemplateName::View, &PageView::for_view(&page)),
            Err(e) if e.is_not_found() => {
                log::debug!("No page {title} to view, redirecting to edit: {e}");
                Response::Redirect(Operation::Edit.path_for(title))
            }
            Err(e) => {
                log::error!("Failed to load page {title}: {e}");
                Response::ServerError(e.to_string())
            }
        }
    }

    pub fn list(&self) -> Response {
        match self.store.list_titles() {
            Ok(index) => self.render(TemplateName::List, &PageView::for_index(index)),
            Err(e) => {
                log::error!(
                    "Failed to list pages in {}: {e}",
                    self.store.pages_root().display()
                );
                Response::ServerError(e.to_string())
            }
        }
    }

    fn render(&self, template: TemplateName, view: &PageView) -> Response {
        match self.renderer.render(template, view) {
            Ok(html) => Response::Html(html),
            Err(e) => {
                log::error!("Failed to render {}: {e}", template.file_name());
                Response::ServerError(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::RenderError;
    use crate::tests::{create_test_file, create_test_pages_dir};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Records every call and renders a compact debug string
    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(TemplateName, PageView)>>,
    }

    impl TemplateRenderer for RecordingRenderer {
        fn render(&self, template: TemplateName, view: &PageView) -> Result<String, RenderError> {
            self.calls.borrow_mut().push((template, view.clone()));
            Ok(format!("{}:{}", template.file_name(), view.html))
        }
    }

    struct FailingRenderer;

    impl TemplateRenderer for FailingRenderer {
        fn render(&self, template: TemplateName, _view: &PageView) -> Result<String, RenderError> {
            Err(RenderError::UnknownTemplate(template.file_name()))
        }
    }

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    #[test]
    fn test_edit_existing_page_shows_body() {
        let pages_dir = create_test_pages_dir();
        create_test_file(&pages_dir, "Home.txt", "hello [World]");
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.edit(&title("Home"));

        assert_eq!(response, Response::Html("edit.html:".to_string()));
        let calls = controller.renderer.calls.borrow();
        assert_eq!(calls[0].0, TemplateName::Edit);
        assert_eq!(calls[0].1.body, "hello [World]");
        assert_eq!(calls[0].1.title, Some(title("Home")));
    }

    #[test]
    fn test_edit_missing_page_shows_empty_form() {
        let pages_dir = create_test_pages_dir();
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.edit(&title("Nope"));

        assert!(matches!(response, Response::Html(_)));
        let calls = controller.renderer.calls.borrow();
        assert_eq!(calls[0].1, PageView::for_edit(&Page::empty(title("Nope"))));
    }

    #[test]
    fn test_save_redirects_to_view() {
        let pages_dir = create_test_pages_dir();
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.save(title("Nope"), "hello".to_string());

        assert_eq!(response, Response::Redirect("/view/Nope".to_string()));
        assert_eq!(
            std::fs::read_to_string(pages_dir.path().join("Nope.txt")).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_save_failure_is_server_error() {
        let pages_dir = create_test_pages_dir();
        let controller = PageController::new(
            PageStore::new(pages_dir.path().join("missing")),
            RecordingRenderer::default(),
        );

        let response = controller.save(title("Nope"), "hello".to_string());

        assert!(matches!(response, Response::ServerError(_)));
    }

    #[test]
    fn test_view_missing_page_redirects_to_edit() {
        let pages_dir = create_test_pages_dir();
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.view(&title("Nope"));

        assert_eq!(response, Response::Redirect("/edit/Nope".to_string()));
        assert!(controller.renderer.calls.borrow().is_empty());
    }

    #[test]
    fn test_view_unreadable_page_is_server_error() {
        let pages_dir = create_test_pages_dir();
        std::fs::create_dir(pages_dir.path().join("Home.txt")).unwrap();
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.view(&title("Home"));

        assert!(matches!(response, Response::ServerError(_)));
        assert!(controller.renderer.calls.borrow().is_empty());
    }

    #[test]
    fn test_edit_unreadable_page_still_shows_form() {
        let pages_dir = create_test_pages_dir();
        std::fs::create_dir(pages_dir.path().join("Home.txt")).unwrap();
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.edit(&title("Home"));

        assert!(matches!(response, Response::Html(_)));
        let calls = controller.renderer.calls.borrow();
        assert_eq!(calls[0].1, PageView::for_edit(&Page::empty(title("Home"))));
    }

    #[test]
    fn test_view_renders_links() {
        let pages_dir = create_test_pages_dir();
        create_test_file(&pages_dir, "Home.txt", "Visit [Other] now");
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.view(&title("Home"));

        assert_eq!(
            response,
            Response::Html(r#"view.html:Visit <a href="/view/Other">Other</a> now"#.to_string())
        );
    }

    #[test]
    fn test_list_passes_index() {
        let pages_dir = create_test_pages_dir();
        create_test_file(&pages_dir, "A.txt", "");
        create_test_file(&pages_dir, "B.txt", "");
        create_test_file(&pages_dir, "C.dat", "");
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.list();

        assert!(matches!(response, Response::Html(_)));
        let calls = controller.renderer.calls.borrow();
        assert_eq!(calls[0].0, TemplateName::List);
        let mut index = calls[0].1.index.clone();
        index.sort();
        assert_eq!(index, vec!["A", "B"]);
        assert_eq!(calls[0].1.title, None);
    }

    #[test]
    fn test_list_unreadable_directory_is_server_error() {
        let controller = PageController::new(
            PageStore::new("/this/path/does/not/exist"),
            RecordingRenderer::default(),
        );

        assert!(matches!(controller.list(), Response::ServerError(_)));
    }

    #[test]
    fn test_render_failure_is_server_error() {
        let pages_dir = create_test_pages_dir();
        let controller = PageController::new(PageStore::new(pages_dir.path()), FailingRenderer);

        let response = controller.edit(&title("Home"));

        assert_eq!(
            response,
            Response::ServerError("Template not registered: edit.html".to_string())
        );
    }

    #[test]
    fn test_handle_rejects_before_store_access() {
        // A store that fails on any access would turn a dispatched request
        // into a server error or a redirect, never a plain not-found.
        let controller = PageController::new(
            PageStore::new("/this/path/does/not/exist"),
            RecordingRenderer::default(),
        );

        for path in ["/edit/", "/view/foo/bar", "/delete/foo", "/edit/foo-bar", "/save/../x"] {
            assert_eq!(controller.handle(path, Some("x".to_string())), Response::NotFound);
        }
        assert!(controller.renderer.calls.borrow().is_empty());
    }

    #[test]
    fn test_handle_save_without_body_writes_empty_page() {
        let pages_dir = create_test_pages_dir();
        let controller = PageController::new(
            PageStore::new(pages_dir.path()),
            RecordingRenderer::default(),
        );

        let response = controller.handle("/save/Blank", None);

        assert_eq!(response, Response::Redirect("/view/Blank".to_string()));
        assert_eq!(
            std::fs::read(pages_dir.path().join("Blank.txt")).unwrap(),
            Vec::<u8>::new()
        );
    }
}
