pub mod editor;
pub mod error;
pub mod logging;
pub mod models;
pub mod publisher;
pub mod registry;
pub mod store;
pub mod validation;

pub use editor::QuestEditor;
pub use error::{EditorError, ErrorKind, Result};
