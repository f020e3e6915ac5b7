//! CLI command implementations.

pub mod build;
pub mod dev;
pub mod extract;
pub mod init;
pub mod serve;
