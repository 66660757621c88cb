// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod worker;
pub mod commands;

use tauri::{DragDropEvent, Manager, RunEvent, WindowEvent};
use tracing::{debug, info};

// Public exports for external consumers
pub use core::{AppConfig, AppState, ConversionOutcome, ConversionRequest, FileQueue, FileRow, FileStatus};
pub use utils::{Category, ConverterError, ConverterResult, classify, target_formats};
pub use commands::*;

#[cfg(target_os = "macos")]
use window_vibrancy::{apply_vibrancy, NSVisualEffectMaterial};

/// Builds and runs the application until the last window closes.
pub fn run() {
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            list_files,
            add_files,
            browse_files,
            select_target_format,
            convert_file,
            open_output_folder,
            get_settings,
        ])
        .on_window_event(|window, event| {
            if let WindowEvent::DragDrop(DragDropEvent::Drop { paths, .. }) = event {
                handle_drop(window.app_handle(), paths.clone());
            }
        })
        .setup(|app| {
            let config = core::config::load(app.handle())?;
            utils::ensure_output_dir(&config.output_dir)?;
            info!("Writing converted files to {}", config.output_dir.display());

            let (state, completions) = AppState::new(config);
            app.manage(state);
            debug!("✓ AppState initialized");

            tauri::async_runtime::spawn(worker::run_completion_loop(app.handle().clone(), completions));

            #[cfg(target_os = "macos")]
            {
                if let Some(window) = app.get_webview_window(core::notify::MAIN_WINDOW) {
                    info!("Applying vibrancy effect for macOS");
                    // Note: This requires macOSPrivateApi=true in tauri.conf.json
                    if let Err(e) = apply_vibrancy(&window, NSVisualEffectMaterial::HudWindow, None, None) {
                        tracing::warn!("Failed to apply vibrancy effect on macOS: {}", e);
                    }
                }
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
}
