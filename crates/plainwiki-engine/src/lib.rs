pub mod controller;
pub mod io;
pub mod models;
pub mod rendering;
pub mod routing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use controller::*;
pub use io::*;
pub use models::{page::*, template::*, title::*};
pub use rendering::*;
pub use routing::*;
