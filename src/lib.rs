/// Quest Editor - local authoring backend for the game-guide page.
///
/// Core library providing quest and character storage, payload
/// validation, static page publishing, and the HTTP surface the
/// browser-based editor talks to.

pub mod config;
pub mod core;
pub mod server;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
