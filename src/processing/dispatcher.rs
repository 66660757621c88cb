//! Conversion dispatch.
//!
//! [`convert`] is the catch-all boundary: whatever the media library reports
//! is folded into a [`ConversionOutcome`] and never propagated further.

use std::time::Instant;
use tracing::{info, warn};

use crate::core::{AppConfig, ConversionOutcome, ConversionRequest};
use crate::utils::{Category, ConversionError, extract_filename};

use super::{ffmpeg, image};

/// Runs one conversion synchronously. Call from a blocking worker thread.
pub fn convert(request: &ConversionRequest, config: &AppConfig) -> ConversionOutcome {
    let started = Instant::now();
    let name = extract_filename(&request.input_path);

    match dispatch(request, config) {
        Ok(()) => {
            info!(
                "Converted {} → {} in {:.1}s",
                name,
                request.output_path.display(),
                started.elapsed().as_secs_f64()
            );
            ConversionOutcome::succeeded(request.output_path.clone())
        }
        Err(e) => {
            warn!("Conversion of {} to {} failed: {}", name, request.target_format, e);
            ConversionOutcome::failed(request.output_path.clone(), e.to_string())
        }
    }
}

fn dispatch(request: &ConversionRequest, config: &AppConfig) -> Result<(), ConversionError> {
    let input = request.input_path.as_path();
    let output = request.output_path.as_path();
    let target = request.target_format.as_str();

    match request.category {
        Category::Image => image::convert_image(input, output, target),
        Category::Video => ffmpeg::convert_video(&config.ffmpeg_path, input, output, &config.video_codec),
        Category::Audio => ffmpeg::convert_audio(&config.ffmpeg_path, input, output, target),
    }
}
