//! News feed module for newsai.
//!
//! This module handles fetching, normalizing, and filtering articles from
//! the news portal endpoints, and requesting generation of new articles.

mod client;
mod controller;
mod fetcher;
mod parser;
mod probe;
mod types;
mod util;

// Re-export types for the binaries and display code
pub use self::types::*;

// Re-export specific functions for lib.rs to use
pub use self::fetcher::refresh_loop;

// Re-export other modules
pub use self::client::*;
pub use self::controller::*;
pub use self::parser::*;
pub use self::probe::*;
pub use self::util::*;
