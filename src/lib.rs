pub mod buffer;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod pixel;
pub mod transform;

pub use buffer::{ChannelRange, PixelBuffer};
pub use error::{FilterError, FilterResult};
pub use filter::FilterKind;
pub use pipeline::{apply_filter, FilterRequest, RunSummary};
pub use pixel::{Pixel, PixelFn};
