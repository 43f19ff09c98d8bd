use quest_editor::config::EditorConfig;
use quest_editor::server::EditorServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EditorConfig::load()?;

    // Initialize logging
    let _log_guard = quest_editor::core::logging::init(&config.log_dir(), &config.logging.filter);
    tracing::info!("{} v{} starting", quest_editor::NAME, quest_editor::VERSION);

    let paths = config.resolve_paths()?;
    let server = EditorServer::new(&config.server, paths);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
