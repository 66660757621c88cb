//! Persisted converter settings.
//!
//! Settings live in the `settings.json` store managed by `tauri-plugin-store`.
//! Every key is optional; anything missing or malformed falls back to the
//! default below.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const SETTINGS_STORE: &str = "settings.json";
pub const DEFAULT_OUTPUT_DIR: &str = "converted";
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Settings that shape where and how conversions run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory every converted file is written to
    pub output_dir: PathBuf,
    /// Upper bound on conversions running at the same time
    pub max_concurrent_conversions: usize,
    /// ffmpeg encoder used for every video target
    pub video_codec: String,
    /// ffmpeg binary, looked up on PATH when not absolute
    pub ffmpeg_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            output_dir: cwd.join(DEFAULT_OUTPUT_DIR),
            max_concurrent_conversions: default_concurrency(),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG),
        }
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
}

impl AppConfig {
    /// Builds a config from a key lookup, typically a settings store.
    ///
    /// Relative output directories are resolved against `base_dir`.
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<serde_json::Value>,
    {
        let mut config = Self::default();

        if let Some(dir) = read_key::<PathBuf>(&lookup, "outputDir") {
            config.output_dir = if dir.is_absolute() { dir } else { base_dir.join(dir) };
        }
        if let Some(max) = read_key::<usize>(&lookup, "maxConcurrentConversions") {
            if max == 0 {
                warn!("maxConcurrentConversions must be at least 1, keeping {}", config.max_concurrent_conversions);
            } else {
                config.max_concurrent_conversions = max;
            }
        }
        if let Some(codec) = read_key::<String>(&lookup, "videoCodec") {
            config.video_codec = codec;
        }
        if let Some(ffmpeg) = read_key::<PathBuf>(&lookup, "ffmpegPath") {
            config.ffmpeg_path = ffmpeg;
        }

        debug!("Loaded settings: {:?}", config);
        config
    }
}

fn read_key<T: DeserializeOwned>(
    lookup: &impl Fn(&str) -> Option<serde_json::Value>,
    key: &str,
) -> Option<T> {
    let value = lookup(key)?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring malformed setting '{}': {}", key, e);
            None
        }
    }
}

/// Loads settings from the app's store, falling back to defaults.
pub fn load<R: tauri::Runtime>(app: &tauri::AppHandle<R>) -> anyhow::Result<AppConfig> {
    use anyhow::Context;
    use tauri_plugin_store::StoreExt;

    let store = app
        .store(SETTINGS_STORE)
        .context("failed to open settings store")?;
    let base_dir = std::env::current_dir().context("failed to read working directory")?;

    Ok(AppConfig::from_lookup(&base_dir, |key| store.get(key)))
}
