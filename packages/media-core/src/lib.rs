pub mod constants;
pub mod errors;
pub mod fetch;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{
    BADGE_BOX, CACHE_CONTROL_IMMUTABLE, CACHE_CONTROL_SHORT_LIVED, CONTENT_SECURITY_POLICY,
    MAX_PIXELS, OCTET_STREAM, PREVIEW_BOX, WEBP_QUALITY,
};
pub use errors::{FetchError, MediaError, TransformError};
pub use fetch::{FetchResult, FetcherOptions, MediaFetcher};
pub use transform::{
    CachePolicy, Codec, ImageCodec, MediaImage, OutputFormat, PassthroughReason, RequestFlags,
    TransformOutcome, is_image_eligible, process,
};
pub use validation::require_url;
