pub mod client;

pub use crate::errors::FetchError;
pub use client::{FetchResult, FetcherOptions, MediaFetcher};
