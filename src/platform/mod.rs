//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web)
//! - Storage-change notification between open screens

pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use events::{ChangeFeed, ChangeNotifier, Silent};
#[cfg(target_arch = "wasm32")]
pub use events::{BrowserNotifier, on_storage_change};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
