//! Editor HTTP Service
//!
//! Serves the quest editor API and the editor UI on a local port.
//!
//! ## Endpoints
//! - `GET /api/quest-files` - List quest files
//! - `GET /api/quests?file=...` - Load a quest file (default `quests.json`)
//! - `POST /api/quests?file=...` - Validate and save a quest file
//! - `GET /api/character` - Load character data
//! - `POST /api/character` - Validate and save character data
//! - `POST /api/publish?file=...` - Render the guide page from a quest file
//! - `GET /` - Editor UI
//! - `GET /<path>` - Any other file under the project root

pub mod handlers;
pub mod response;
pub mod static_files;

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{Paths, ServerConfig};
use crate::core::QuestEditor;

/// Build the full application router.
///
/// Request bodies are unbounded; quest files are saved whole.
pub fn build_router(editor: Arc<QuestEditor>, cors: bool) -> Router {
    let project_files = ServeDir::new(&editor.paths().base_dir)
        .append_index_html_on_directories(false)
        .not_found_service(static_files::not_found.into_service());

    let mut router = Router::new()
        .route("/api/quest-files", get(handlers::list_quest_files))
        .route(
            "/api/quests",
            get(handlers::get_quests).post(handlers::save_quests),
        )
        .route(
            "/api/character",
            get(handlers::get_character).post(handlers::save_character),
        )
        .route("/api/publish", post(handlers::publish))
        .route("/", get(static_files::editor_entry))
        .fallback_service(project_files)
        .with_state(editor)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http());

    if cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Local editor backend.
pub struct EditorServer {
    addr: SocketAddr,
    cors: bool,
    editor: Arc<QuestEditor>,
}

impl EditorServer {
    pub fn new(config: &ServerConfig, paths: Paths) -> Self {
        Self {
            addr: config.bind_addr(),
            cors: config.cors,
            editor: Arc::new(QuestEditor::new(paths)),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn router(&self) -> Router {
        build_router(self.editor.clone(), self.cors)
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run(self) -> io::Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(self.addr).await?;

        let paths = self.editor.paths();
        tracing::info!(base_dir = %paths.base_dir.display(), "Project root");
        tracing::info!(data_dir = %paths.data_dir.display(), "Data directory");
        tracing::info!("Editor server running at {}", self.url());
        tracing::info!("Editor available at {}/", self.url());
        tracing::info!("API: GET /api/quest-files | GET/POST /api/quests?file=... | GET/POST /api/character | POST /api/publish?file=...");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Editor server shutting down");
            })
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use tempfile::TempDir;

    #[test]
    fn test_server_url() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5001,
            cors: false,
        };
        let server = EditorServer::new(&config, Paths::from_base("/srv/guide"));
        assert_eq!(server.url(), "http://127.0.0.1:5001");
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            cors: true,
        };
        let server = EditorServer::new(&config, Paths::from_base(dir.path()));
        // Resolves immediately, so the server binds and exits cleanly.
        server.run_until(async {}).await.unwrap();
    }
}
