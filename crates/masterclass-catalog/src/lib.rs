//! Categorization and output for extracted examples.
//!
//! The [`Categorizer`] partitions examples into the fixed documentation
//! sections and derives the cross-cutting common patterns; the
//! [`CatalogWriter`] serializes the result into the JSON documents the site
//! consumes.

pub mod catalog;
pub mod category;
pub mod document;
pub mod patterns;
pub mod writer;

pub use catalog::{Catalog, CatalogConfig, Categorizer, Section};
pub use category::{Category, CategoryParseError, CategoryTable};
pub use document::{ExampleSummary, Index, IndexSections};
pub use patterns::{CommonPattern, ExampleRef, PatternRule};
pub use writer::{CatalogWriter, WriteError, WriteReport};
