pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ConversionError, ConverterError, ConverterResult, QueueError};
pub use validation::validate_input_path;
pub use formats::{Category, classify, extension_of, is_target_allowed, target_formats};
pub use fs::{ensure_output_dir, extract_filename, output_path_for, remove_partial_output};
