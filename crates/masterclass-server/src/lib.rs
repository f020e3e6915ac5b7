//! Development server with live reload for the masterclass site.
//!
//! Serves the generated site, watches the example sources and regenerates
//! the site on change, then tells connected pages to reload over a
//! WebSocket.

pub mod reload;
pub mod server;
pub mod watcher;

pub use reload::{reload_client_script, ReloadHub, ReloadMessage};
pub use server::{DevServer, DevServerConfig, GeneratorError, ServerError, SiteGenerator};
pub use watcher::{FileWatcher, WatchEvent};
