//! Filter configuration
//!
//! Traversal filters can be described in TOML and built at startup instead
//! of being assembled in code.

pub mod filter_toml;
pub mod validation;

pub use filter_toml::{FilterConfig, TraversalConfig};
pub use validation::validate_config;
