//! Configuration module for brickmosaic
//!
//! Provides types and parsing for `mosaic.toml` configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
