pub mod types;

pub use types::{FetchError, MediaError, TransformError};
