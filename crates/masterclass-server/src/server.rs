//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::services::ServeDir;

use crate::reload::{
    reload_client_script, ReloadHub, ReloadMessage, RELOAD_PATH, RELOAD_SCRIPT_PATH,
};
use crate::watcher::{FileWatcher, WatchEvent};

/// Error type returned by a site generator.
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// Regenerates the site when watched sources change.
pub trait SiteGenerator: Send + Sync + 'static {
    /// Rebuild the served site. Runs on a blocking thread.
    fn regenerate(&self) -> Result<(), GeneratorError>;
}

impl<F> SiteGenerator for F
where
    F: Fn() -> Result<(), GeneratorError> + Send + Sync + 'static,
{
    fn regenerate(&self) -> Result<(), GeneratorError> {
        self()
    }
}

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory to serve
    pub site_dir: PathBuf,

    /// Directories whose changes trigger regeneration
    pub watch_dirs: Vec<PathBuf>,

    /// URL prefix the site is served under
    pub base_url: String,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("apps/docs/out"),
            watch_dirs: vec![PathBuf::from("packages/examples/src")],
            base_url: "/".to_string(),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    hub: ReloadHub,
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
    generator: Option<Arc<dyn SiteGenerator>>,
    hub: ReloadHub,
}

impl DevServer {
    /// Create a server that only serves `site_dir`.
    pub fn new(config: DevServerConfig) -> Self {
        Self {
            config,
            generator: None,
            hub: ReloadHub::new(),
        }
    }

    /// Regenerate the site with `generator` whenever a watched file changes.
    pub fn with_generator(mut self, generator: impl SiteGenerator) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Hub used to notify connected pages.
    pub fn hub(&self) -> &ReloadHub {
        &self.hub
    }

    /// Address the server will listen on.
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        addr.parse()
            .map_err(|_| ServerError::InvalidAddress(addr.clone()))
    }

    /// Router serving the site plus the live reload endpoints.
    pub fn router(&self) -> Router {
        let state = Arc::new(ServerState {
            hub: self.hub.clone(),
        });

        let site = ServeDir::new(&self.config.site_dir);
        let router = Router::new()
            .route(RELOAD_PATH, get(ws_handler))
            .route(RELOAD_SCRIPT_PATH, get(reload_script_handler));

        let prefix = self.config.base_url.trim_matches('/');
        let router = if prefix.is_empty() {
            router.fallback_service(site)
        } else {
            router.nest_service(&format!("/{}", prefix), site)
        };

        router.with_state(state)
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.addr()?;

        // Dropping the watcher stops the events, so the task owns it.
        if let Some(generator) = self.generator.clone() {
            let (watcher, mut rx) = FileWatcher::new(&self.config.watch_dirs)
                .map_err(|e| ServerError::WatchError(e.to_string()))?;

            let hub = self.hub.clone();
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    handle_watch_event(&generator, &hub, event).await;
                }
                drop(watcher);
            });
        }

        let app = self.router();

        tracing::info!(
            "Serving {} at http://{}{}",
            self.config.site_dir.display(),
            addr,
            self.config.base_url
        );

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        if self.config.open {
            let url = format!("http://{}{}", addr, self.config.base_url);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Regenerate the site and tell pages to reload.
async fn handle_watch_event(generator: &Arc<dyn SiteGenerator>, hub: &ReloadHub, event: WatchEvent) {
    tracing::info!("Changed: {}", event.path().display());

    let generator = Arc::clone(generator);
    let result = tokio::task::spawn_blocking(move || generator.regenerate()).await;

    match result {
        Ok(Ok(())) => hub.send(ReloadMessage::Reload),
        Ok(Err(e)) => {
            tracing::error!("Regeneration failed: {}", e);
            hub.send(ReloadMessage::Failed {
                message: e.to_string(),
            });
        }
        Err(e) => {
            tracing::error!("Regeneration task failed: {}", e);
            hub.send(ReloadMessage::Failed {
                message: e.to_string(),
            });
        }
    }
}

/// Handler for the live reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward reload messages to one connected page.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.hub.subscribe();

    if !send_message(&mut socket, &ReloadMessage::Connected).await {
        return;
    }

    while let Some(msg) = next_message(&mut rx).await {
        if !send_message(&mut socket, &msg).await {
            break;
        }
    }
}

/// Next message for a page. A lagging receiver skips the missed messages
/// and keeps going; only a closed hub ends the stream.
async fn next_message(rx: &mut broadcast::Receiver<ReloadMessage>) -> Option<ReloadMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Reload client lagged by {} messages", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ReloadMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::warn!("Failed to encode reload message: {}", e);
            false
        }
    }
}

/// Handler for the live reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    let script = reload_client_script(RELOAD_PATH);
    ([("content-type", "application/javascript")], script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
        assert!(server.generator.is_none());
        assert_eq!(server.addr().unwrap().to_string(), "127.0.0.1:7777");
    }

    #[test]
    fn rejects_invalid_host() {
        let server = DevServer::new(DevServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        });
        assert!(matches!(server.addr(), Err(ServerError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn successful_regeneration_reloads_pages() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let generator: Arc<dyn SiteGenerator> = Arc::new(move || -> Result<(), GeneratorError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let hub = ReloadHub::new();
        let mut rx = hub.subscribe();

        handle_watch_event(
            &generator,
            &hub,
            WatchEvent::SourceModified(PathBuf::from("src/utils.ts")),
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(rx.recv().await.unwrap(), ReloadMessage::Reload);
    }

    #[tokio::test]
    async fn failed_regeneration_is_reported() {
        let generator: Arc<dyn SiteGenerator> =
            Arc::new(|| -> Result<(), GeneratorError> { Err("Source directory not found".into()) });
        let hub = ReloadHub::new();
        let mut rx = hub.subscribe();

        handle_watch_event(
            &generator,
            &hub,
            WatchEvent::Deleted(PathBuf::from("src/utils.ts")),
        )
        .await;

        assert_eq!(
            rx.recv().await.unwrap(),
            ReloadMessage::Failed {
                message: "Source directory not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn lagging_client_keeps_receiving() {
        let hub = ReloadHub::new();
        let mut rx = hub.subscribe();

        for _ in 0..150 {
            hub.send(ReloadMessage::Connected);
        }
        hub.send(ReloadMessage::Reload);

        let mut last = None;
        while let Ok(Some(msg)) =
            tokio::time::timeout(std::time::Duration::from_millis(50), next_message(&mut rx)).await
        {
            last = Some(msg);
        }
        assert_eq!(last, Some(ReloadMessage::Reload));
    }

    #[tokio::test]
    async fn closed_hub_ends_stream() {
        let hub = ReloadHub::new();
        let mut rx = hub.subscribe();
        drop(hub);

        assert_eq!(next_message(&mut rx).await, None);
    }

    #[tokio::test]
    async fn serves_reload_script() {
        let response = reload_script_handler().await.into_response();
        assert_eq!(
            response.headers()["content-type"],
            "application/javascript"
        );
    }

    #[test]
    fn builds_router() {
        let _root = DevServer::new(DevServerConfig::default()).router();
        let _nested = DevServer::new(DevServerConfig {
            base_url: "/typescript-testing-masterclass/".to_string(),
            ..Default::default()
        })
        .router();
    }
}
