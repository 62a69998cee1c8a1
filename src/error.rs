use image::ImageError;
use std::path::PathBuf;

pub type FilterResult<T> = Result<T, FilterError>;

#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("load failed for {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("filter resolution failed: unknown filter `{0}` (expected grayscale, sepia, warmer or cooler)")]
    InvalidFilterSelector(String),
    #[error("save failed for {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}
