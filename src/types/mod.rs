//! Core type definitions for cached assets.
//!
//! Keeps the record shape and its key separate from storage so probers and
//! report generators can build and inspect records without touching SQLite.

mod asset;
mod state;

pub use asset::{AssetError, AssetKey, ScannedAsset};
pub use state::{state_label, ProbeState};
