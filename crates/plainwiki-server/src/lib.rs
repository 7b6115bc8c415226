pub mod http;
pub mod templates;

pub use http::build_router;
pub use templates::MiniJinjaRenderer;
