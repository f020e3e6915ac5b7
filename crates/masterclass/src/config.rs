//! Configuration file (masterclass.toml).

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use masterclass_catalog::{CatalogConfig, CategoryTable, PatternRule};
use masterclass_extract::Extractor;

/// Configuration file structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub site: SiteSettings,
    /// Directory name to category overrides
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    /// Replaces the built-in pattern rules when present
    #[serde(default)]
    pub patterns: Option<Vec<PatternRule>>,
    /// File name to extended description
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_examples")]
    pub examples: String,
    #[serde(default = "default_content")]
    pub content: String,
    #[serde(default = "default_public")]
    pub public: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            examples: default_examples(),
            content: default_content(),
            public: default_public(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_minify")]
    pub minify: bool,
    /// Markdown file rendered on the overview page
    pub overview: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            output: default_output(),
            minify: default_minify(),
            overview: None,
        }
    }
}

fn default_examples() -> String {
    "packages/examples/src".to_string()
}
fn default_content() -> String {
    "apps/docs/content".to_string()
}
fn default_public() -> String {
    "apps/docs/public/content".to_string()
}
fn default_title() -> String {
    "TypeScript Testing Masterclass".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_output() -> String {
    "apps/docs/out".to_string()
}
fn default_minify() -> bool {
    true
}

/// Loaded configuration with paths resolved against the config file's directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub file: ConfigFile,
}

impl Config {
    /// Resolve a configured path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    pub fn examples_dir(&self) -> PathBuf {
        self.resolve(&self.file.paths.examples)
    }

    pub fn content_dir(&self) -> PathBuf {
        self.resolve(&self.file.paths.content)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.resolve(&self.file.paths.public)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.file.site.output)
    }

    pub fn overview_path(&self) -> Option<PathBuf> {
        self.file.site.overview.as_deref().map(|p| self.resolve(p))
    }

    /// Extractor carrying the configured extended descriptions.
    pub fn extractor(&self) -> Extractor {
        Extractor::new().with_extended_descriptions(self.file.descriptions.clone())
    }

    /// Categorizer configuration: the built-in table with overrides applied,
    /// and the configured or built-in pattern rules.
    pub fn catalog_config(&self) -> Result<CatalogConfig> {
        let categories = CategoryTable::default()
            .with_overrides(&self.file.categories)
            .context("Invalid [categories] entry")?;

        let patterns = self
            .file
            .patterns
            .clone()
            .unwrap_or_else(PatternRule::defaults);

        Ok(CatalogConfig {
            categories,
            patterns,
        })
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<Config> {
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Config {
            root,
            file: ConfigFile::default(),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());

    Ok(Config { root, file })
}

#[cfg(test)]
mod tests {
    use super::*;
    use masterclass_catalog::Category;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(&temp.path().join("masterclass.toml")).unwrap();

        assert_eq!(config.examples_dir(), temp.path().join("packages/examples/src"));
        assert_eq!(config.public_dir(), temp.path().join("apps/docs/public/content"));
        assert_eq!(config.file.site.title, "TypeScript Testing Masterclass");
        assert!(config.file.site.minify);
        assert_eq!(config.catalog_config().unwrap(), CatalogConfig::default());
    }

    #[test]
    fn bare_file_name_resolves_against_current_dir() {
        let config = load_config(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.root, PathBuf::from("."));
    }

    #[test]
    fn parses_all_sections() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("masterclass.toml");
        fs::write(
            &path,
            r#"
[paths]
examples = "src"

[site]
base_url = "/typescript-testing-masterclass/"
minify = false

[categories]
"mocking-fetch" = "integration-tests"

[[patterns]]
title = "Timers"
description = "Fake timers"
any_of = ["vi.useFakeTimers"]

[descriptions]
"api.test.ts" = "Long description"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.examples_dir(), temp.path().join("src"));
        assert_eq!(config.content_dir(), temp.path().join("apps/docs/content"));
        assert_eq!(config.file.site.base_url, "/typescript-testing-masterclass/");
        assert!(!config.file.site.minify);

        let catalog = config.catalog_config().unwrap();
        assert_eq!(catalog.categories.lookup("mocking-fetch"), Category::IntegrationTests);
        assert_eq!(catalog.categories.lookup("async-testing"), Category::E2eTests);
        assert_eq!(catalog.patterns.len(), 1);
        assert_eq!(catalog.patterns[0].title, "Timers");
        assert!(catalog.patterns[0].all_of.is_empty());
    }

    #[test]
    fn rejects_unknown_category() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("masterclass.toml");
        fs::write(&path, "[categories]\n\"misc\" = \"smoke-tests\"\n").unwrap();

        let config = load_config(&path).unwrap();

        assert!(config.catalog_config().is_err());
    }

    #[test]
    fn rejects_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("masterclass.toml");
        fs::write(&path, "[paths\nexamples = ").unwrap();

        assert!(load_config(&path).is_err());
    }
}
