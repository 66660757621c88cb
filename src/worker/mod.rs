mod pool;
mod completion;

pub use pool::ConversionPool;
pub use completion::{apply_completion, run_completion_loop};
