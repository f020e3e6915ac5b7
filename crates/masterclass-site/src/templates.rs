//! Template engine for rendering documentation pages.

use minijinja::Environment;
use serde::Serialize;

use crate::highlight::Token;

/// A top-level sidebar entry.
#[derive(Debug, Clone, Serialize)]
pub struct NavSection {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Per-directory anchors within the section
    pub links: Vec<NavLink>,
    /// Whether this is the current page
    pub active: bool,
}

/// A sidebar anchor below a section.
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub title: String,
    pub path: String,
}

/// Values shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Base URL, always ending in `/`
    pub base_url: String,
    /// Sidebar
    pub nav: Vec<NavSection>,
    /// Live reload script URL, set by the dev server
    pub live_reload: Option<String>,
}

/// A code fragment prepared for display.
#[derive(Debug, Clone, Serialize)]
pub struct FragmentView {
    pub title: String,
    /// Wire name of the fragment kind
    pub kind: String,
    /// Badge label
    pub label: String,
    /// Highlighted source lines, for line numbering
    pub lines: Vec<Vec<Token>>,
}

/// Reference from a pattern card to an example.
#[derive(Debug, Clone, Serialize)]
pub struct PatternLink {
    pub file_name: String,
    pub dir_name: String,
    pub path: String,
    /// Category page anchor, when the example is listed on one
    pub href: Option<String>,
}

/// A card on a category page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardView {
    Example {
        file_name: String,
        dir_name: String,
        description: String,
        extended_description: Option<String>,
        is_test_file: bool,
        path: String,
        language: String,
        fragments: Vec<FragmentView>,
    },
    Pattern {
        title: String,
        description: String,
        examples: Vec<PatternLink>,
    },
}

/// Example cards sharing a directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirGroup {
    /// Anchor id
    pub id: String,
    pub dir_name: String,
    pub title: String,
    pub cards: Vec<CardView>,
}

/// A directory filter button.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub id: String,
    pub name: String,
}

/// Context for a category page.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryContext {
    #[serde(flatten)]
    pub page: PageContext,
    /// Category identifier
    pub category: String,
    /// Introductory paragraph
    pub intro: String,
    /// URL of the category's JSON document
    pub content_url: String,
    /// Generic load failure message
    pub error: Option<String>,
    /// Directory filters, empty for pattern sections
    pub filters: Vec<FilterOption>,
    /// Example cards grouped by directory
    pub groups: Vec<DirGroup>,
    /// Pattern cards
    pub patterns: Vec<CardView>,
}

/// Per-category summary on the overview page.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub title: String,
    pub path: String,
    pub count: usize,
    /// Noun for the count ("examples" or "patterns")
    pub unit: String,
}

/// Context for the overview page.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewContext {
    #[serde(flatten)]
    pub page: PageContext,
    /// Rendered introduction
    pub intro_html: String,
    /// Generic load failure message
    pub error: Option<String>,
    pub total_examples: usize,
    pub categories: Vec<CategorySummary>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");
        env.add_template_owned("nav.html".to_string(), NAV_TEMPLATE.to_string())
            .expect("Failed to add nav template");
        env.add_template_owned("overview.html".to_string(), OVERVIEW_TEMPLATE.to_string())
            .expect("Failed to add overview template");
        env.add_template_owned("category.html".to_string(), CATEGORY_TEMPLATE.to_string())
            .expect("Failed to add category template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render<S: Serialize>(&self, template: &str, context: &S) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/main.js"></script>
  {% if live_reload %}<script src="{{ live_reload }}"></script>{% endif %}
</body>
</html>"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
<ul class="nav-list">
{% for section in nav %}
  <li class="nav-item{% if section.active %} active{% endif %}">
    <a href="{{ section.path }}">{{ section.title }}</a>
    {% if section.links %}
    <ul class="nav-children">
      {% for link in section.links %}
      <li class="nav-item"><a href="{{ link.path }}">{{ link.title }}</a></li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

const OVERVIEW_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <div class="content">
    {{ intro_html | safe }}
  </div>
  {% if error %}
  <div class="error">Error: {{ error }}</div>
  {% else %}
  <p class="total">{{ total_examples }} examples extracted</p>
  <div class="category-grid">
    {% for c in categories %}
    <a class="category-card" href="{{ c.path }}">
      <h2>{{ c.title }}</h2>
      <p>{{ c.count }} {{ c.unit }}</p>
    </a>
    {% endfor %}
  </div>
  {% endif %}
</article>
{% endblock %}"##;

const CATEGORY_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% macro fragment_block(fragment, file_name, language) %}
<div class="fragment">
  <div class="fragment-header">
    <span class="fragment-title">{{ fragment.title }}</span>
    <span class="badge badge-{{ fragment.kind }}">{{ fragment.label }}</span>
  </div>
  <div class="code-block">
    <div class="code-filename">{{ file_name }}</div>
    <pre><code class="language-{{ language }}">{% for line in fragment.lines %}<span class="line"><span class="line-number">{{ loop.index }}</span>{% for token in line %}{% if token.class %}<span class="token {{ token.class }}">{{ token.text }}</span>{% else %}{{ token.text }}{% endif %}{% endfor %}</span>
{% endfor %}</code></pre>
  </div>
</div>
{% endmacro %}

<article class="doc">
  <h1>{{ title }}</h1>
  <p class="intro">{{ intro }}</p>
  <p class="content-link"><a href="{{ content_url }}">View JSON</a></p>

  {% if error %}
  <div class="error">Error: {{ error }}</div>
  {% elif not groups and not patterns %}
  <div class="no-examples">No examples found for this category.</div>
  {% else %}

  {% if filters %}
  <div class="category-filter">
    <div class="filter-header">
      <h3>Filter by Directory</h3>
      <button type="button" data-filter-all>Select All</button>
      <button type="button" data-filter-clear>Clear</button>
    </div>
    <div class="filter-options">
      {% for f in filters %}
      <button type="button" class="filter-option is-selected" data-filter="{{ f.id }}">{{ f.name }}</button>
      {% endfor %}
    </div>
  </div>
  {% endif %}

  {% for group in groups %}
  <section class="dir-group" id="{{ group.id }}" data-dir="{{ group.dir_name }}">
    <h2>{{ group.title }}</h2>
    {% for card in group.cards %}
    <div class="example-card">
      <div class="card-header">
        <h3>{{ card.file_name }}</h3>
        <span class="badge">{{ card.dir_name }}</span>
        <span class="badge">{% if card.is_test_file %}test{% else %}source{% endif %}</span>
        <span class="badge">{{ card.language }}</span>
        <button type="button" class="toggle" data-toggle>Expand</button>
      </div>
      <p class="description">{{ card.description }}</p>
      {% if card.extended_description %}<p class="extended">{{ card.extended_description }}</p>{% endif %}
      <div class="card-body" hidden>
        {% for fragment in card.fragments %}{{ fragment_block(fragment, card.file_name, card.language) }}{% endfor %}
        <p class="source-path">{{ card.path }}</p>
      </div>
    </div>
    {% endfor %}
  </section>
  {% endfor %}

  {% for card in patterns %}
  <div class="pattern-card">
    <h3>{{ card.title }}</h3>
    <p class="description">{{ card.description }}</p>
    <ul class="pattern-examples">
      {% for ex in card.examples %}
      <li>{% if ex.href %}<a href="{{ ex.href }}">{{ ex.file_name }}</a>{% else %}{{ ex.file_name }}{% endif %} <span class="badge">{{ ex.dir_name }}</span> <code>{{ ex.path }}</code></li>
      {% endfor %}
    </ul>
  </div>
  {% endfor %}

  {% endif %}
</article>
{% endblock %}"##;
