pub mod page;
pub mod template;
pub mod title;

pub use page::{Page, PageView};
pub use template::TemplateName;
pub use title::{Title, TitleError};
