use crate::buffer::{ChannelRange, PixelBuffer};
use crate::error::{FilterError, FilterResult};
use crate::filter::FilterKind;
use crate::transform::{transform, transform_parallel};
use image::{codecs::png::PngEncoder, io::Reader, ColorType, ImageEncoder, ImageError};
use log::{debug, info, warn};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "output_img.png";

/// One run: read `input`, apply `filter`, write PNG to `output`.
#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Filter name, matched ignoring case.
    pub filter: String,
    pub show: bool,
    pub parallel: bool,
}

impl FilterRequest {
    pub fn new(input: impl Into<PathBuf>, filter: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            filter: filter.into(),
            show: false,
            parallel: false,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub filter: FilterKind,
    pub dimensions: (u32, u32),
    pub visited: usize,
    pub range: ChannelRange,
}

pub fn apply_filter(request: &FilterRequest) -> FilterResult<RunSummary> {
    let filter: FilterKind = request.filter.parse()?;
    debug!("resolved filter `{}` to {filter}", request.filter);

    let mut buffer = load(&request.input)?;
    let dimensions = buffer.dimensions();
    debug!(
        "loaded {} ({}x{})",
        request.input.display(),
        dimensions.0,
        dimensions.1
    );

    let visited = if request.parallel {
        transform_parallel(&mut buffer, filter.function())
    } else {
        transform(&mut buffer, filter.function())
    };

    let range = save(&buffer, &request.output)?;
    info!(
        "applied {filter} to {} pixels, wrote {}",
        visited,
        request.output.display()
    );

    if request.show {
        show(&request.output);
    }

    Ok(RunSummary {
        filter,
        dimensions,
        visited,
        range,
    })
}

/// Decode any format `image` understands into an RGB pixel buffer.
/// Alpha is discarded.
pub fn load(path: &Path) -> FilterResult<PixelBuffer> {
    let image = Reader::open(path)
        .and_then(Reader::with_guessed_format)
        .map_err(ImageError::IoError)
        .and_then(Reader::decode)
        .map_err(|source| FilterError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(PixelBuffer::from(&image.to_rgb8()))
}

fn save_error(path: &Path, source: ImageError) -> FilterError {
    FilterError::ImageSave {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `buffer` as PNG to `path`, whatever its extension.
///
/// The image is encoded into a temporary file next to `path` and renamed
/// into place, so a failure never leaves a partial file at `path`. An
/// existing destination keeps its permissions; a new one gets 0o666 minus
/// the umask, like a plain file create.
pub fn save(buffer: &PixelBuffer, path: &Path) -> FilterResult<ChannelRange> {
    let (image, range) = buffer.to_rgb_image();
    if !range.is_clean() {
        warn!(
            "{} channel values outside 0..=255 were saturated while encoding {}",
            range.out_of_range,
            path.display()
        );
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| save_error(path, ImageError::IoError(e)))?;

    if let Some(existing) = fs::metadata(path).ok().filter(|m| m.is_file()) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| save_error(path, ImageError::IoError(e)))?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        PngEncoder::new(&mut writer)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ColorType::Rgb8,
            )
            .map_err(|e| save_error(path, e))?;
        writer
            .flush()
            .map_err(|e| save_error(path, ImageError::IoError(e)))?;
    }

    tmp.persist(path)
        .map_err(|e| save_error(path, ImageError::IoError(e.error)))?;
    debug!("saved {}", path.display());

    Ok(range)
}

/// Open `path` in the default viewer without waiting for it.
pub fn show(path: &Path) {
    if let Err(e) = open::that_detached(path) {
        warn!("could not open viewer for {}: {e}", path.display());
    }
}
