use crate::error::{FilterError, FilterResult};
use crate::pixel::{self, PixelFn};
use std::fmt;
use std::str::FromStr;

/// The closed set of supported filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Grayscale,
    Sepia,
    Warmer,
    Cooler,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Warmer,
        FilterKind::Cooler,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Warmer => "warmer",
            FilterKind::Cooler => "cooler",
        }
    }

    pub fn function(self) -> PixelFn {
        match self {
            FilterKind::Grayscale => pixel::grayscale,
            FilterKind::Sepia => pixel::sepia,
            FilterKind::Warmer => pixel::warmer,
            FilterKind::Cooler => pixel::cooler,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    /// Matches the filter name ignoring ASCII case.
    fn from_str(s: &str) -> FilterResult<Self> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilterError::InvalidFilterSelector(s.to_string()))
    }
}

/// Resolve a selector straight to its pixel function.
pub fn lookup(selector: &str) -> FilterResult<PixelFn> {
    selector.parse::<FilterKind>().map(FilterKind::function)
}
