//! Feather - ultra-minimalist static file server
//!
//! Core library: configuration, request handling, and the accept loop.

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod server;
