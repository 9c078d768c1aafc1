pub mod app;
pub mod config;
pub mod context;
pub mod routes;
pub mod vm;
pub mod views;

pub use app::App;
pub use config::{ConfigError, DeckDetailConfig};
pub use context::{AppContext, UiApp, build_app_context};
