pub mod codec;
pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod media_image;
pub mod orientation;
pub mod outcome;
pub mod params;
pub mod pipeline;
pub mod resize;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use codec::{Codec, ImageCodec};
pub use dimensions::{apply_scale, bounding_box_scale};
pub use media_image::{Frame, MediaImage};
pub use orientation::Orientation;
pub use outcome::{CachePolicy, PassthroughReason, TransformOutcome};
pub use params::{OutputFormat, RequestFlags};
pub use pipeline::{is_image_eligible, process};
