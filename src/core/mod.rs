//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Application state managed by Tauri
//! - [`FileQueue`]: The ordered, deduplicated list of added files
//! - [`AppConfig`]: Settings loaded from the settings store
//! - [`Notifier`]: Notices and row updates shown to the user
//! - [`ConversionRequest`] / [`ConversionOutcome`]: One conversion and its result

pub mod config;
pub mod notify;
mod queue;
mod state;
mod types;

pub use config::AppConfig;
pub use notify::{Notice, Notifier, TauriNotifier};
pub use queue::FileQueue;
pub use state::AppState;
pub use types::{Completion, ConversionOutcome, ConversionRequest, FileId, FileRow, FileStatus, TrackedFile};
