//! Development server command.

use anyhow::Result;
use masterclass_server::reload::RELOAD_SCRIPT_PATH;
use masterclass_server::{DevServer, DevServerConfig, GeneratorError};

use crate::commands::build::{build_site, BuildOptions};
use crate::config::Config;

/// Run the dev server.
pub async fn run(config: Config, port: u16, open: bool, base_url: Option<String>) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let options = BuildOptions {
        base_url,
        minify: Some(false),
        live_reload: Some(RELOAD_SCRIPT_PATH.to_string()),
        ..Default::default()
    };

    let site_config = options.site_config(&config);
    let result = build_site(&config, &options)?;
    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);

    let server_config = DevServerConfig {
        site_dir: site_config.output_dir,
        watch_dirs: vec![config.examples_dir()],
        base_url: site_config.base_url,
        port,
        open,
        ..Default::default()
    };

    let generator = move || -> Result<(), GeneratorError> {
        let result = build_site(&config, &options)?;
        tracing::info!("Rebuilt {} pages in {}ms", result.pages, result.duration_ms);
        Ok(())
    };

    DevServer::new(server_config)
        .with_generator(generator)
        .start()
        .await?;

    Ok(())
}
