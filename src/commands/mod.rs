//! Tauri command handlers for the frontend.
//!
//! This module exposes commands that can be invoked from the webview:
//! - [`list_files`], [`add_files`], [`browse_files`]: Manage the file list
//! - [`select_target_format`]: Pick a row's target format
//! - [`convert_file`]: Convert a file in the background
//! - [`open_output_folder`], [`get_settings`]: Output folder and settings

mod convert;
mod files;

pub use convert::*;
pub use files::*;
