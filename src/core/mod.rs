//! Feed parsing and in-memory lookup of NAV records

pub mod config;
pub mod feed;
pub mod fund;
pub mod log;
pub mod parser;
pub mod registry;

// Re-export main types for cleaner imports
pub use feed::FeedSource;
pub use fund::Fund;
pub use parser::{NavData, parse};
pub use registry::{NavRegistry, NavSnapshot};
