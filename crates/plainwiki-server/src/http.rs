use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{Method, StatusCode, Uri, header},
    response::{Html, IntoResponse},
};
use plainwiki_engine::{PageController, Response, TemplateRenderer};
use std::sync::Arc;

/// Form field carrying the page body on save
pub const BODY_FIELD: &str = "body";

/// Every request goes through one handler; the engine does the routing.
/// Page bodies have no size limit.
pub fn build_router<R>(controller: Arc<PageController<R>>) -> Router
where
    R: TemplateRenderer + Send + Sync + 'static,
{
    Router::new()
        .fallback(dispatch::<R>)
        .layer(DefaultBodyLimit::disable())
        .with_state(controller)
}

async fn dispatch<R>(
    State(controller): State<Arc<PageController<R>>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> axum::response::Response
where
    R: TemplateRenderer + Send + Sync + 'static,
{
    let path = uri.path().to_string();
    let form_body = form_value(&body, uri.query());
    log::info!("{method} {path}");

    // Store access is blocking file I/O
    let response = tokio::task::spawn_blocking(move || controller.handle(&path, form_body))
        .await
        .unwrap_or_else(|e| {
            log::error!("Request handler failed: {e}");
            Response::ServerError(e.to_string())
        });

    into_http(response)
}

/// The `body` form field, from a url-encoded request body or, failing
/// that, from the query string.
///
/// Percent-escapes that are not UTF-8 decode to U+FFFD. Multipart bodies
/// are not understood.
pub fn form_value(body: &[u8], query: Option<&str>) -> Option<String> {
    let from_body = if body.is_empty() {
        None
    } else {
        find_field(serde_urlencoded::from_bytes(body))
    };
    from_body.or_else(|| query.and_then(|q| find_field(serde_urlencoded::from_str(q))))
}

fn find_field(
    pairs: Result<Vec<(String, String)>, serde_urlencoded::de::Error>,
) -> Option<String> {
    match pairs {
        Ok(pairs) => pairs
            .into_iter()
            .find(|(name, _)| name == BODY_FIELD)
            .map(|(_, value)| value),
        Err(e) => {
            log::warn!("Ignoring malformed form data: {e}");
            None
        }
    }
}

pub fn into_http(response: Response) -> axum::response::Response {
    match response {
        Response::Html(html) => Html(html).into_response(),
        Response::Redirect(location) => {
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        Response::NotFound => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
        Response::ServerError(message) => {
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}
