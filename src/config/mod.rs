//! Configuration management for assetcache.
//!
//! Provides XDG-compliant paths and the JSON settings file that selects the
//! cache location and connection behaviour.

mod settings;

pub use settings::{AppSettings, Paths};
