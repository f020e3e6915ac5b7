//! Stylesheet and script for the generated site.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#":root {
  --sidebar-width: 280px;
  --content-max-width: 960px;
  --background: #ffffff;
  --foreground: #111827;
  --muted: #f3f4f6;
  --muted-foreground: #6b7280;
  --border: #e5e7eb;
  --primary: #2563eb;
  --primary-foreground: #ffffff;
  --code-background: #1f2937;
  --code-foreground: #e5e7eb;
  --error: #b91c1c;
  --radius: 0.5rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: 100vh;
}

/* Sidebar */
.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-header {
  margin-bottom: 1.5rem;
}

.nav-logo {
  font-weight: 700;
  font-size: 1.125rem;
  color: var(--foreground);
  text-decoration: none;
}

.nav-list,
.nav-children {
  list-style: none;
}

.nav-children {
  margin-left: 1rem;
  font-size: 0.875rem;
}

.nav-item a {
  display: block;
  padding: 0.375rem 0.75rem;
  color: var(--muted-foreground);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-item a:hover {
  color: var(--foreground);
}

.nav-item.active > a {
  background: var(--primary);
  color: var(--primary-foreground);
}

/* Main content */
.main {
  padding: 2rem;
}

.doc {
  max-width: var(--content-max-width);
}

.doc h1 {
  font-size: 2rem;
  margin-bottom: 1rem;
}

.doc h2 {
  font-size: 1.5rem;
  margin: 2rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--border);
}

.intro,
.content p {
  margin-bottom: 1rem;
}

.error {
  color: var(--error);
  border: 1px solid var(--error);
  border-radius: var(--radius);
  padding: 1rem;
}

.category-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
  gap: 1rem;
}

.category-card,
.example-card,
.pattern-card {
  display: block;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
  margin-bottom: 1rem;
  color: inherit;
  text-decoration: none;
}

/* Filter */
.category-filter {
  margin-bottom: 1.5rem;
}

.filter-header {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-bottom: 0.5rem;
}

.filter-options {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
}

.filter-option {
  border: 1px solid var(--border);
  border-radius: 999px;
  padding: 0.25rem 0.75rem;
  background: var(--background);
  cursor: pointer;
}

.filter-option.is-selected {
  background: var(--primary);
  color: var(--primary-foreground);
}

.card-header {
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.card-header .toggle {
  margin-left: auto;
}

.badge {
  font-size: 0.75rem;
  background: var(--muted);
  border-radius: 999px;
  padding: 0.125rem 0.5rem;
}

/* Code blocks */
.code-block {
  border-radius: var(--radius);
  overflow: hidden;
  margin: 0.5rem 0 1rem;
}

.code-filename {
  background: var(--muted);
  font-size: 0.75rem;
  padding: 0.25rem 0.75rem;
}

.code-block pre {
  background: var(--code-background);
  color: var(--code-foreground);
  padding: 1rem;
  overflow-x: auto;
  font-family: ui-monospace, monospace;
  font-size: 0.875rem;
}

/* Tokens */
.token.comment {
  color: #9ca3af;
  font-style: italic;
}

.token.string {
  color: #a5d6a7;
}

.token.keyword,
.token.tag {
  color: #f472b6;
}

.token.constant,
.token.number {
  color: #fbbf24;
}

.token.function {
  color: #93c5fd;
}

.token.operator,
.token.punctuation {
  color: #d1d5db;
}

.line-number {
  display: inline-block;
  width: 2.5rem;
  margin-right: 1rem;
  text-align: right;
  color: var(--muted-foreground);
  user-select: none;
}

@media (max-width: 1024px) {
  .layout {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: static;
    height: auto;
  }
}
"#;

const DEFAULT_JS: &str = r#"(function() {
  'use strict';

  // Directory filter
  const options = Array.from(document.querySelectorAll('[data-filter]'));
  const groups = Array.from(document.querySelectorAll('[data-dir]'));

  function apply() {
    const selected = new Set(
      options.filter(o => o.classList.contains('is-selected')).map(o => o.dataset.filter)
    );
    groups.forEach(group => {
      group.hidden = !selected.has(group.id);
    });
  }

  options.forEach(option => {
    option.addEventListener('click', () => {
      option.classList.toggle('is-selected');
      apply();
    });
  });

  const all = document.querySelector('[data-filter-all]');
  if (all) {
    all.addEventListener('click', () => {
      options.forEach(o => o.classList.add('is-selected'));
      apply();
    });
  }

  const clear = document.querySelector('[data-filter-clear]');
  if (clear) {
    clear.addEventListener('click', () => {
      options.forEach(o => o.classList.remove('is-selected'));
      apply();
    });
  }

  // Expand and collapse example cards
  document.querySelectorAll('[data-toggle]').forEach(button => {
    button.addEventListener('click', () => {
      const body = button.closest('.example-card').querySelector('.card-body');
      body.hidden = !body.hidden;
      button.textContent = body.hidden ? 'Expand' : 'Collapse';
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(":root"));
        assert!(css.contains(".line-number"));
        assert!(css.contains(".token.keyword"));
        assert!(css.contains(".filter-option.is-selected"));
    }

    #[test]
    fn generates_js() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("data-filter-all"));
        assert!(js.contains("data-toggle"));
    }

    #[test]
    fn minifies_css() {
        let minified = AssetPipeline::minify_css(&AssetPipeline::generate_css()).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".line-number"));
    }
}
