//! Example extraction for the testing masterclass documentation.
//!
//! This crate walks a directory of TypeScript example files, classifies each
//! file as test or non-test, and pulls titled code fragments and a description
//! out of it using regular-expression heuristics.

pub mod description;
pub mod example;
pub mod extractor;
pub mod fragment;
pub mod source;

pub use description::describe;
pub use example::Example;
pub use extractor::{ExtractError, Extractor};
pub use fragment::{CodeFragment, FragmentKind};
pub use source::{discover_sources, is_test_file_name, SourceFile};
