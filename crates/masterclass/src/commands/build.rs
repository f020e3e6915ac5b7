//! Static site build command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use masterclass_site::{SiteBuilder, SiteConfig, SiteResult};

use crate::commands::extract::extract;
use crate::config::Config;

/// Command-line overrides for the site build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub minify: Option<bool>,
    /// Live reload script, injected by the dev server
    pub live_reload: Option<String>,
}

impl BuildOptions {
    /// Merge the overrides with the configuration file.
    pub fn site_config(&self, config: &Config) -> SiteConfig {
        let site = &config.file.site;

        SiteConfig {
            content_dir: config.public_dir(),
            output_dir: self.output.clone().unwrap_or_else(|| config.output_dir()),
            base_url: self.base_url.clone().unwrap_or_else(|| site.base_url.clone()),
            title: site.title.clone(),
            minify: self.minify.unwrap_or(site.minify),
            live_reload: self.live_reload.clone(),
            overview: config.overview_path(),
        }
    }
}

/// Extract the examples and render the site from the written documents.
pub fn build_site(config: &Config, options: &BuildOptions) -> Result<SiteResult> {
    extract(config)?;

    SiteBuilder::new(options.site_config(config))
        .build()
        .context("Failed to build site")
}

/// Run the build command.
pub async fn run(config: &Config, options: &BuildOptions) -> Result<()> {
    tracing::info!("Building static site...");

    let result = build_site(config, options)?;

    tracing::info!(
        "Built {} pages with {} entries in {}ms",
        result.pages,
        result.entries,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn options_override_config() {
        let temp = tempdir().unwrap();
        let config = load_config(&temp.path().join("masterclass.toml")).unwrap();

        let defaults = BuildOptions::default().site_config(&config);
        assert_eq!(defaults.output_dir, temp.path().join("apps/docs/out"));
        assert_eq!(defaults.content_dir, temp.path().join("apps/docs/public/content"));
        assert_eq!(defaults.base_url, "/");
        assert!(defaults.minify);

        let overridden = BuildOptions {
            output: Some(PathBuf::from("dist")),
            base_url: Some("/docs/".to_string()),
            minify: Some(false),
            live_reload: None,
        }
        .site_config(&config);
        assert_eq!(overridden.output_dir, PathBuf::from("dist"));
        assert_eq!(overridden.base_url, "/docs/");
        assert!(!overridden.minify);
    }

    #[test]
    fn builds_site_from_sources() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("packages/examples/src/misc");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("utils.ts"), "export const add = (a, b) => a + b;").unwrap();
        let config = load_config(&temp.path().join("masterclass.toml")).unwrap();

        let result = build_site(&config, &BuildOptions::default()).unwrap();

        assert_eq!(result.pages, 5);
        let out = temp.path().join("apps/docs/out");
        assert!(out.join("unit-tests/index.html").exists());
        assert!(out.join("content/unit-tests.json").exists());
        let html = fs::read_to_string(out.join("unit-tests/index.html")).unwrap();
        assert!(html.contains("utils.ts"));
    }
}
