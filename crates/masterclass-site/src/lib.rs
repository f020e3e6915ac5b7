//! Static site generator for the testing masterclass documentation.
//!
//! Reads the JSON documents produced by the catalog writer and renders the
//! overview and category pages with a sidebar, directory filters and
//! highlighted, line-numbered code fragments.

pub mod assets;
pub mod builder;
pub mod content;
pub mod highlight;
pub mod templates;

pub use builder::{SiteBuilder, SiteConfig, SiteError, SiteResult};
pub use content::{ContentError, ContentSource, Entry, SectionState};
pub use highlight::{highlight, Language, Token};
