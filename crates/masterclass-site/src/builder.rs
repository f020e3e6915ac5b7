//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use masterclass_catalog::{Category, CommonPattern, Index};
use masterclass_extract::Example;

use crate::assets::AssetPipeline;
use crate::content::{ContentSource, Entry, SectionState};
use crate::highlight::{highlight, Language};
use crate::templates::{
    CardView, CategoryContext, CategorySummary, DirGroup, FilterOption, FragmentView, NavLink,
    NavSection, OverviewContext, PageContext, PatternLink, TemplateEngine,
};

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory holding the generated JSON documents
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Prefix for every link, asset and content URL
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Minify CSS output
    pub minify: bool,

    /// Live reload script URL injected into every page
    pub live_reload: Option<String>,

    /// Markdown file rendered as the overview introduction
    pub overview: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("apps/docs/public/content"),
            output_dir: PathBuf::from("apps/docs/out"),
            base_url: "/".to_string(),
            title: "TypeScript Testing Masterclass".to_string(),
            minify: true,
            live_reload: None,
            overview: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct SiteResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of cards rendered across all category pages
    pub entries: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Failed to render template for {page}: {source}")]
    Template {
        page: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process assets: {0}")]
    Asset(String),
}

/// A page to be rendered.
#[derive(Debug, Clone, Copy)]
enum Page {
    Overview,
    Category(Category),
}

/// Everything loaded before rendering starts.
struct Loaded {
    index: SectionState<Index>,
    sections: Vec<(Category, SectionState<Vec<Entry>>)>,
    /// Example path to its anchor on a category page
    anchors: HashMap<String, String>,
}

/// Static site builder.
pub struct SiteBuilder {
    config: SiteConfig,
    content: ContentSource,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(mut config: SiteConfig) -> Self {
        config.base_url = normalize_base_url(&config.base_url);

        Self {
            content: ContentSource::new(&config.content_dir),
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Configuration in use, with a normalized base URL.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Build the site.
    pub fn build(&self) -> Result<SiteResult, SiteError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir).map_err(|source| SiteError::Write {
            path: self.config.output_dir.clone(),
            source,
        })?;

        let loaded = self.load();
        let intro_html = self.render_overview_intro()?;

        let mut pages = vec![Page::Overview];
        pages.extend(Category::ALL.iter().copied().map(Page::Category));

        let results: Vec<Result<usize, SiteError>> = pages
            .par_iter()
            .map(|page| self.build_page(*page, &loaded, &intro_html))
            .collect();

        let mut entries = 0;
        for result in results {
            entries += result?;
        }

        self.copy_content()?;
        self.generate_assets()?;

        let duration = start.elapsed();

        Ok(SiteResult {
            pages: pages.len(),
            entries,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Load the index and every category document.
    fn load(&self) -> Loaded {
        let sections: Vec<(Category, SectionState<Vec<Entry>>)> = Category::ALL
            .iter()
            .map(|category| (*category, self.content.section(*category)))
            .collect();

        let mut anchors = HashMap::new();
        for (category, state) in &sections {
            for entry in state.loaded().into_iter().flatten() {
                if let Entry::Example(example) = entry {
                    anchors.insert(
                        example.path.clone(),
                        self.anchor_url(*category, &example.dir_name),
                    );
                }
            }
        }

        Loaded {
            index: self.content.index(),
            sections,
            anchors,
        }
    }

    /// Render one page, returning the number of cards on it.
    fn build_page(&self, page: Page, loaded: &Loaded, intro_html: &str) -> Result<usize, SiteError> {
        let (template, name, html, cards) = match page {
            Page::Overview => {
                let context = self.overview_context(loaded, intro_html);
                let html = self.templates.render("overview.html", &context);
                ("overview.html", "overview".to_string(), html, 0)
            }
            Page::Category(category) => {
                let context = self.category_context(category, loaded);
                let cards = context.groups.iter().map(|g| g.cards.len()).sum::<usize>()
                    + context.patterns.len();
                let html = self.templates.render("category.html", &context);
                ("category.html", category.to_string(), html, cards)
            }
        };

        let html = html.map_err(|source| SiteError::Template {
            page: format!("{} ({})", name, template),
            source,
        })?;

        let output_path = self.output_path(page);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|source| SiteError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&output_path, html).map_err(|source| SiteError::Write {
            path: output_path.clone(),
            source,
        })?;

        tracing::debug!("Rendered {}", output_path.display());

        Ok(cards)
    }

    fn output_path(&self, page: Page) -> PathBuf {
        match page {
            Page::Overview => self.config.output_dir.join("index.html"),
            Page::Category(category) => self
                .config
                .output_dir
                .join(category.as_str())
                .join("index.html"),
        }
    }

    fn page_context(&self, title: &str, active: Option<Category>, loaded: &Loaded) -> PageContext {
        PageContext {
            title: title.to_string(),
            site_title: self.config.title.clone(),
            base_url: self.config.base_url.clone(),
            nav: self.build_navigation(active, loaded),
            live_reload: self.config.live_reload.clone(),
        }
    }

    /// Sidebar with one section per category and one anchor per directory.
    fn build_navigation(&self, active: Option<Category>, loaded: &Loaded) -> Vec<NavSection> {
        loaded
            .sections
            .iter()
            .map(|(category, state)| {
                let links = match state.loaded() {
                    Some(entries) => directories(entries)
                        .into_iter()
                        .map(|dir| NavLink {
                            title: format_title(dir),
                            path: self.anchor_url(*category, dir),
                        })
                        .collect(),
                    None => Vec::new(),
                };

                NavSection {
                    title: category.title().to_string(),
                    path: self.category_url(*category),
                    links,
                    active: active == Some(*category),
                }
            })
            .collect()
    }

    fn overview_context(&self, loaded: &Loaded, intro_html: &str) -> OverviewContext {
        let page = self.page_context("Overview", None, loaded);

        match &loaded.index {
            SectionState::Loaded(index) => OverviewContext {
                page,
                intro_html: intro_html.to_string(),
                error: None,
                total_examples: index.total_examples,
                categories: index
                    .categories
                    .iter()
                    .map(|category| CategorySummary {
                        title: category.title().to_string(),
                        path: self.category_url(*category),
                        count: index.examples_by_category.count(*category),
                        unit: unit(*category).to_string(),
                    })
                    .collect(),
            },
            SectionState::Failed(message) => OverviewContext {
                page,
                intro_html: intro_html.to_string(),
                error: Some(message.clone()),
                total_examples: 0,
                categories: Vec::new(),
            },
        }
    }

    fn category_context(&self, category: Category, loaded: &Loaded) -> CategoryContext {
        let mut context = CategoryContext {
            page: self.page_context(category.title(), Some(category), loaded),
            category: category.to_string(),
            intro: intro(category).to_string(),
            content_url: format!("{}content/{}", self.config.base_url, category.file_name()),
            error: None,
            filters: Vec::new(),
            groups: Vec::new(),
            patterns: Vec::new(),
        };

        let entries = loaded
            .sections
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, state)| state);

        let entries = match entries {
            Some(SectionState::Loaded(entries)) => entries,
            Some(SectionState::Failed(message)) => {
                context.error = Some(message.clone());
                return context;
            }
            None => return context,
        };

        for dir in directories(entries) {
            let cards: Vec<CardView> = entries
                .iter()
                .filter_map(|entry| match entry {
                    Entry::Example(example) if example.dir_name == dir => {
                        Some(example_card(example))
                    }
                    _ => None,
                })
                .collect();

            context.filters.push(FilterOption {
                id: slug(dir),
                name: dir.to_string(),
            });
            context.groups.push(DirGroup {
                id: slug(dir),
                dir_name: dir.to_string(),
                title: format_title(dir),
                cards,
            });
        }

        context.patterns = entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Pattern(pattern) => Some(self.pattern_card(pattern, &loaded.anchors)),
                Entry::Example(_) => None,
            })
            .collect();

        context
    }

    fn pattern_card(&self, pattern: &CommonPattern, anchors: &HashMap<String, String>) -> CardView {
        CardView::Pattern {
            title: pattern.title.clone(),
            description: pattern.description.clone(),
            examples: pattern
                .examples
                .iter()
                .map(|r| PatternLink {
                    file_name: r.file_name.clone(),
                    dir_name: r.dir_name.clone(),
                    path: r.path.clone(),
                    href: anchors.get(&r.path).cloned(),
                })
                .collect(),
        }
    }

    fn category_url(&self, category: Category) -> String {
        format!("{}{}/", self.config.base_url, category)
    }

    fn anchor_url(&self, category: Category, dir: &str) -> String {
        format!("{}#{}", self.category_url(category), slug(dir))
    }

    /// Render the overview introduction from Markdown.
    fn render_overview_intro(&self) -> Result<String, SiteError> {
        use pulldown_cmark::{html, Options, Parser};

        let markdown = match &self.config.overview {
            Some(path) => fs::read_to_string(path).map_err(|source| SiteError::Read {
                path: path.clone(),
                source,
            })?,
            None => DEFAULT_OVERVIEW.to_string(),
        };

        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(&markdown, options);

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(html_output)
    }

    /// Copy the JSON documents to `<output>/content/`.
    fn copy_content(&self) -> Result<(), SiteError> {
        let source_dir = self.content.dir();
        if !source_dir.exists() {
            tracing::warn!("Content directory not found: {}", source_dir.display());
            return Ok(());
        }

        let target_dir = self.config.output_dir.join("content");
        fs::create_dir_all(&target_dir).map_err(|source| SiteError::Write {
            path: target_dir.clone(),
            source,
        })?;

        for entry in WalkDir::new(source_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let target = target_dir.join(entry.file_name());
            fs::copy(path, &target).map_err(|source| SiteError::Write {
                path: target.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), SiteError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|source| SiteError::Write {
            path: assets_dir.clone(),
            source,
        })?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).map_err(SiteError::Asset)?
        } else {
            css
        };
        write_file(&assets_dir.join("main.css"), &css)?;
        write_file(&assets_dir.join("main.js"), &AssetPipeline::generate_js())?;

        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    fs::write(path, contents).map_err(|source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn example_card(example: &Example) -> CardView {
    CardView::Example {
        file_name: example.file_name.clone(),
        dir_name: example.dir_name.clone(),
        description: example.description.clone(),
        extended_description: example.extended_description.clone(),
        is_test_file: example.is_test_file,
        path: example.path.clone(),
        language: example.language().to_string(),
        fragments: example
            .code_blocks
            .iter()
            .map(|block| FragmentView {
                title: block.title.clone(),
                kind: block.kind.as_str().to_string(),
                label: block.kind.label().to_string(),
                lines: highlight(&block.code, Language::from_name(example.language())),
            })
            .collect(),
    }
}

/// Distinct example directories in first-seen order.
fn directories(entries: &[Entry]) -> Vec<&str> {
    let mut dirs: Vec<&str> = Vec::new();
    for dir in entries.iter().filter_map(Entry::dir_name) {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Noun for the entries of a category.
fn unit(category: Category) -> &'static str {
    if category.is_derived() {
        "patterns"
    } else {
        "examples"
    }
}

/// Introductory paragraph for a category page.
fn intro(category: Category) -> &'static str {
    match category {
        Category::UnitTests => {
            "Unit tests focus on testing individual components or functions in isolation. \
             This section covers techniques for effective unit testing in TypeScript with Vitest."
        }
        Category::IntegrationTests => {
            "Integration tests verify that multiple components or systems work together correctly. \
             This section covers techniques for integration testing in TypeScript with Vitest."
        }
        Category::E2eTests => {
            "End-to-end tests exercise complete flows the way a user would. \
             This section covers asynchronous code and full application scenarios."
        }
        Category::CommonPatterns => {
            "This section covers reusable patterns and techniques that can be applied across \
             different types of tests."
        }
    }
}

/// Make sure the base URL starts and ends with `/`.
fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Human-readable title for a directory name.
///
/// Dashes and underscores become spaces, camelCase words are split and the
/// first letter is upper-cased: `test-doubles` becomes `Test doubles`,
/// `reactSpecific` becomes `React Specific`.
pub fn format_title(name: &str) -> String {
    let mut title = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;

    for c in name.chars() {
        if c == '-' || c == '_' {
            title.push(' ');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            title.push(' ');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        title.push(c);
    }

    let mut chars = title.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Anchor id for a directory name: lower-cased, with runs of anything other
/// than ASCII letters and digits replaced by a single `-`.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_gap = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }

    slug
}

const DEFAULT_OVERVIEW: &str = "# TypeScript Testing Masterclass

A collection of testing examples for TypeScript with Vitest, extracted from the
example sources and grouped by category. Each example shows its test cases,
describe blocks, functions and types as separate code fragments.
";
