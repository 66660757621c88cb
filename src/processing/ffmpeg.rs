//! Video and audio conversion by driving the `ffmpeg` binary.
//!
//! The child process is owned by [`FfmpegProcess`], which kills and reaps it
//! if it is dropped before finishing, so no encoder is left running on any
//! exit path.

use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{debug, warn};

use crate::utils::{ConversionError, remove_partial_output};

type Result<T> = std::result::Result<T, ConversionError>;

/// Lines of ffmpeg stderr kept in an error message
const STDERR_TAIL_LINES: usize = 6;

/// ffmpeg audio encoder for an audio target container
pub fn audio_codec(target: &str) -> Option<&'static str> {
    match target.to_lowercase().as_str() {
        "mp3" => Some("libmp3lame"),
        "wav" => Some("pcm_s16le"),
        "aac" => Some("aac"),
        "flac" => Some("flac"),
        _ => None,
    }
}

fn base_args(input: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_os_string());
    args
}

/// Builds ffmpeg arguments for video conversion.
pub fn build_video_args(input: &Path, output: &Path, video_codec: &str) -> Vec<OsString> {
    let mut args = base_args(input);
    args.extend(
        // yuv420p for the widest player compatibility of H.264 output
        ["-c:v", video_codec, "-pix_fmt", "yuv420p", "-c:a", "aac"]
            .into_iter()
            .map(OsString::from),
    );
    args.push(output.as_os_str().to_os_string());
    args
}

/// Builds ffmpeg arguments for audio conversion.
pub fn build_audio_args(input: &Path, output: &Path, target: &str) -> Result<Vec<OsString>> {
    let codec = audio_codec(target)
        .ok_or_else(|| ConversionError::encode(format!("unsupported audio format: {target}")))?;

    let mut args = base_args(input);
    args.extend(["-vn", "-c:a", codec].into_iter().map(OsString::from));
    args.push(output.as_os_str().to_os_string());
    Ok(args)
}

/// A running ffmpeg child, released on drop.
pub struct FfmpegProcess {
    child: Option<Child>,
}

impl FfmpegProcess {
    pub fn spawn(ffmpeg: &Path, args: &[OsString]) -> Result<Self> {
        debug!("Running {} {:?}", ffmpeg.display(), args);
        let child = Command::new(ffmpeg)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ConversionError::ToolMissing {
                tool: ffmpeg.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { child: Some(child) })
    }

    /// Waits for ffmpeg to exit, returning its status and raw stderr.
    ///
    /// stderr is kept as bytes: ffmpeg echoes file names, which need not be UTF-8.
    pub fn finish(mut self) -> io::Result<(ExitStatus, Vec<u8>)> {
        let Some(mut child) = self.child.take() else {
            return Err(io::Error::other("ffmpeg process already released"));
        };

        let mut stderr = Vec::new();
        if let Some(mut pipe) = child.stderr.take() {
            // Only stderr is piped, so draining it before wait cannot deadlock
            if let Err(e) = pipe.read_to_end(&mut stderr) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        }
        let status = child.wait()?;
        Ok((status, stderr))
    }
}

impl Drop for FfmpegProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            warn!("Releasing unfinished ffmpeg process {}", child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Runs one ffmpeg invocation to completion, cleaning up the output on failure.
pub fn run(ffmpeg: &Path, args: &[OsString], output: &Path) -> Result<()> {
    let process = FfmpegProcess::spawn(ffmpeg, args)?;

    let (status, stderr) = match process.finish() {
        Ok(done) => done,
        Err(e) => {
            remove_partial_output(output);
            return Err(ConversionError::failed(e));
        }
    };

    if !status.success() {
        remove_partial_output(output);
        return Err(ConversionError::failed(format!(
            "ffmpeg exited with {}: {}",
            status,
            stderr_tail(&String::from_utf8_lossy(&stderr))
        )));
    }

    Ok(())
}

pub fn convert_video(ffmpeg: &Path, input: &Path, output: &Path, video_codec: &str) -> Result<()> {
    let args = build_video_args(input, output, video_codec);
    run(ffmpeg, &args, output)
}

pub fn convert_audio(ffmpeg: &Path, input: &Path, output: &Path, target: &str) -> Result<()> {
    let args = build_audio_args(input, output, target)?;
    run(ffmpeg, &args, output)
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return "no error output".to_string();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
