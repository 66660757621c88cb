//! Media conversion backends.
//!
//! - [`dispatcher`]: routes a request to the backend for its category and folds errors into outcomes.
//! - [`image`]: still images through the `image` crate.
//! - [`ffmpeg`]: video and audio through an `ffmpeg` child process.

pub mod dispatcher;
pub mod ffmpeg;
pub mod image;

pub use dispatcher::convert;
