use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, warn};
use crate::core::{AppConfig, Completion, ConversionOutcome, ConversionRequest};
use crate::processing;

/// Bounded pool running conversions on blocking worker threads.
///
/// Submissions never block the caller. Each conversion waits for a permit,
/// runs on tokio's blocking pool, and reports through the completion channel.
/// Completions arrive in finishing order, not submission order.
#[derive(Clone)]
pub struct ConversionPool {
    config: Arc<AppConfig>,
    semaphore: Arc<Semaphore>,
    completions: mpsc::UnboundedSender<Completion>,
    active_workers: Arc<AtomicUsize>,
    worker_count: usize,
}

impl ConversionPool {
    /// Creates the pool and the receiving end of its completion channel.
    pub fn new(config: Arc<AppConfig>) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let worker_count = config.max_concurrent_conversions.max(1);
        let (tx, rx) = mpsc::unbounded_channel();
        debug!("Initializing ConversionPool with {} workers", worker_count);

        let pool = Self {
            config,
            semaphore: Arc::new(Semaphore::new(worker_count)),
            completions: tx,
            active_workers: Arc::new(AtomicUsize::new(0)),
            worker_count,
        };
        (pool, rx)
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }

    /// Queues `request`; its outcome is delivered on the completion channel.
    pub fn submit(&self, request: ConversionRequest) {
        let pool = self.clone();
        tauri::async_runtime::spawn(async move {
            pool.process(request).await;
        });
    }

    async fn process(&self, request: ConversionRequest) {
        debug!("Acquiring permit for task: {}", request.input_path.display());
        let outcome = match self.semaphore.acquire().await {
            Ok(_permit) => {
                let active = self.active_workers.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(
                    "Worker started - Active: {}/{}, Task: {}",
                    active, self.worker_count, request.input_path.display()
                );

                let config = Arc::clone(&self.config);
                let task = request.clone();
                let result = tauri::async_runtime::spawn_blocking(move || processing::convert(&task, &config)).await;

                self.active_workers.fetch_sub(1, Ordering::SeqCst);
                match result {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!("Conversion task for {} panicked: {}", request.input_path.display(), e);
                        ConversionOutcome::failed(request.output_path.clone(), format!("Conversion failed: task panicked: {e}"))
                    }
                }
            }
            Err(e) => {
                warn!("Failed to acquire worker: {}", e);
                ConversionOutcome::failed(request.output_path.clone(), format!("Conversion failed: {e}"))
            }
        };

        let completion = Completion {
            file_id: request.file_id,
            input_path: request.input_path,
            target_format: request.target_format,
            outcome,
        };
        if self.completions.send(completion).is_err() {
            warn!("Completion channel closed, dropping result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;
    use crate::utils::{Category, output_path_for};

    fn config_in(dir: &Path, workers: usize) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            output_dir: dir.join("converted"),
            max_concurrent_conversions: workers,
            video_codec: "libx264".to_string(),
            ffmpeg_path: PathBuf::from("/nonexistent/ffmpeg"),
        })
    }

    fn image_request(config: &AppConfig, input: &Path, target: &str) -> ConversionRequest {
        ConversionRequest {
            file_id: 0,
            input_path: input.to_path_buf(),
            category: Category::Image,
            target_format: target.to_string(),
            output_path: output_path_for(&config.output_dir, input, target),
        }
    }

    #[tokio::test]
    async fn test_completions_delivered_for_every_submission() {
        let temp = TempDir::new().unwrap();
        let config = config_in(temp.path(), 2);
        std::fs::create_dir_all(&config.output_dir).unwrap();

        let (pool, mut rx) = ConversionPool::new(Arc::clone(&config));
        assert_eq!(pool.worker_count(), 2);

        let mut expected = Vec::new();
        for name in ["a.png", "b.png", "c.png", "d.png"] {
            let input = temp.path().join(name);
            RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])).save(&input).unwrap();
            pool.submit(image_request(&config, &input, "bmp"));
            expected.push(input);
        }

        let mut seen = Vec::new();
        for _ in 0..expected.len() {
            let completion = tokio::time::timeout(Duration::from_secs(30), rx.recv())
                .await
                .expect("completion timed out")
                .expect("channel closed");
            assert!(completion.outcome.success, "{:?}", completion.outcome.error_message);
            seen.push(completion.input_path);
        }
        seen.sort();
        expected.sort();
        assert_eq!(seen, expected);
        assert_eq!(pool.active_workers(), 0);
    }

    #[tokio::test]
    async fn test_failed_conversion_is_delivered_as_outcome() {
        let temp = TempDir::new().unwrap();
        let config = config_in(temp.path(), 1);
        std::fs::create_dir_all(&config.output_dir).unwrap();

        let (pool, mut rx) = ConversionPool::new(Arc::clone(&config));
        let input = temp.path().join("clip.mp4");
        std::fs::write(&input, b"junk").unwrap();
        pool.submit(ConversionRequest {
            file_id: 0,
            input_path: input.clone(),
            category: Category::Video,
            target_format: "avi".to_string(),
            output_path: output_path_for(&config.output_dir, &input, "avi"),
        });

        let completion = tokio::time::timeout(Duration::from_secs(30), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(!completion.outcome.success);
        assert_eq!(completion.target_format, "avi");
        assert!(!config.output_dir.join("clip.avi").exists());
    }

    /// `a.jpg` and `a.png` both target `a.gif`: both conversions succeed and
    /// the file holds whichever finished last. With more than one worker the
    /// two writes race on the same file; a single worker keeps the check deterministic.
    #[tokio::test]
    async fn test_same_stem_targets_share_output_path() {
        let temp = TempDir::new().unwrap();
        let config = config_in(temp.path(), 1);
        std::fs::create_dir_all(&config.output_dir).unwrap();
        let (pool, mut rx) = ConversionPool::new(Arc::clone(&config));

        let jpg = temp.path().join("a.jpg");
        let png = temp.path().join("a.png");
        RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])).save(&jpg).unwrap();
        RgbImage::from_pixel(6, 6, Rgb([0, 0, 255])).save(&png).unwrap();

        let first = image_request(&config, &jpg, "gif");
        let second = image_request(&config, &png, "gif");
        assert_eq!(first.output_path, second.output_path);
        pool.submit(first);
        pool.submit(second);

        for _ in 0..2 {
            let completion = tokio::time::timeout(Duration::from_secs(30), rx.recv())
                .await
                .unwrap()
                .unwrap();
            assert!(completion.outcome.success);
        }

        let out = image::open(config.output_dir.join("a.gif")).unwrap();
        assert!(matches!(out.width(), 4 | 6));
    }
}
