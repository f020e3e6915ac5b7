//! Preview server command.

use std::path::PathBuf;

use anyhow::Result;
use masterclass_server::{DevServer, DevServerConfig};

use crate::config::Config;

/// Run the serve command.
pub async fn run(config: &Config, port: u16, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.output_dir());

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'masterclass build' first.",
            dir.display()
        );
    }

    let server_config = DevServerConfig {
        site_dir: dir,
        watch_dirs: Vec::new(),
        base_url: config.file.site.base_url.clone(),
        port,
        ..Default::default()
    };

    DevServer::new(server_config).start().await?;

    Ok(())
}
