//! CLI command implementations.
//!
//! Available commands:
//! - **resolve**: Resolve a JSON document and write the view tree
//! - **classify**: Show how each stage sees the root of a document
//! - **init**: Initialize a new `.viewmap.toml`

pub mod classify;
pub mod init;
pub mod resolve;

pub use classify::{classify_document, classify_value, Classification};
pub use init::init_config;
pub use resolve::{resolve_document, ResolveConfig};
