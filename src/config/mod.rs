//! Configuration module for Kinsenas
//!
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::KinsenasPaths;
pub use settings::Settings;
