//! Naming, reference resolution, range parsing and ordering.
pub mod references;
pub mod sanitize;
pub mod shape;
pub mod topology;

pub use references::{resolve_references, Resolved};
pub use sanitize::{sanitize, unique_name, SanitizerConfig, SpecialToken, DEFAULT_MAX_NAME_LEN};
pub use topology::DependencyMap;
