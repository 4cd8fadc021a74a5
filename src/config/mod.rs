//! Configuration module for payperiod
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PayperiodPaths;
pub use settings::Settings;
