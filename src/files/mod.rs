//! Static file resolution
//!
//! Maps request paths to files under the content root and loads the page
//! used as the body of every 404.

pub mod resolver;

pub use resolver::FileResolver;
