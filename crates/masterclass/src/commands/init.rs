//! Write a default configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing masterclass...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'masterclass build' to extract the examples and build the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Masterclass Configuration
# Paths are relative to this file.

[paths]
# Example sources to extract
examples = "packages/examples/src"

# JSON output for the docs app
content = "apps/docs/content"

# JSON output served as static assets
public = "apps/docs/public/content"

[site]
title = "TypeScript Testing Masterclass"

# Base URL (for deployment under a sub-path)
base_url = "/"

# Output directory for the built site
output = "apps/docs/out"

# Enable CSS minification
minify = true

# Markdown file shown on the overview page
# overview = "README.md"

# Directory to category overrides, on top of the built-in table.
# Unlisted directories go to unit-tests.
[categories]
# "mocking-fetch" = "integration-tests"

# Uncomment to replace the built-in common-pattern rules.
# [[patterns]]
# title = "Spy Assertions"
# description = "Verifying function calls with spy assertions"
# all_of = ["expect("]
# any_of = [".toHaveBeenCalled", ".toBeCalledWith"]

# Extended descriptions, keyed by file name.
[descriptions]
"direct-imports.test.ts" = "Learn how to mock direct module imports in TypeScript tests. This example demonstrates how to mock API calls, handle async responses, and verify function calls with type safety."
"indirect-dependencies.test.ts" = "Master testing components with indirect dependencies. This example shows techniques for mocking nested dependencies, database connections, and handling complex dependency chains."
"same-package.test.ts" = "Explore effective strategies for mocking modules from the same package. Learn how to use Jest's module factory pattern and maintain type safety when mocking internal utilities."
"test-doubles.test.ts" = "Comprehensive guide to test doubles (mocks, stubs, spies) in TypeScript. Learn when to use each type of test double and how to implement them with proper type definitions."
"useThemeCounter.test.tsx" = "This test file demonstrates how to test advanced patterns that combine custom hooks with context in Vitest with TypeScript. KEY CONCEPTS: 1. Testing hooks that depend on context 2. Using wrapper components to provide context in tests 3. Testing type discriminated behavior 4. Testing with branded types"
"dynamic-imports.test.ts" = "Learn advanced techniques for testing code with dynamic imports. This example demonstrates how to mock dynamically imported modules and test code that uses import() syntax."
"lazy-loaded-components.test.ts" = "Master testing React components that use lazy loading. Learn how to handle component suspense, loading states, and test dynamically loaded UI components."
"accessibility-testing.test.tsx" = "Comprehensive guide to accessibility testing in React applications. Learn how to use jest-axe to verify WCAG compliance and test keyboard navigation and screen reader compatibility."
"async-testing.test.ts" = "Deep dive into testing asynchronous code patterns. Learn strategies for testing promises, async/await, API clients, error handling, and race conditions."
"enhanced-async-testing.test.ts" = "Advanced async testing techniques including branded types, discriminated unions, and complex timing scenarios. Learn how to test request cancellation, error states, and edge cases."
"nodejs-testing.test.ts" = "Complete guide to testing Node.js applications. Learn techniques for mocking the file system, command-line interfaces, user input, and other Node.js-specific functionality."
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use masterclass_catalog::CatalogConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_loadable_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("masterclass.toml");

        run(&path, false).await.unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.file.descriptions.len(), 11);
        assert!(config.file.patterns.is_none());
        assert_eq!(config.catalog_config().unwrap(), CatalogConfig::default());
        assert_eq!(config.examples_dir(), temp.path().join("packages/examples/src"));
    }

    #[tokio::test]
    async fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("masterclass.toml");
        fs::write(&path, "[site]\ntitle = \"Mine\"\n").unwrap();

        run(&path, false).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[site]\ntitle = \"Mine\"\n");

        run(&path, true).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
