//! Sample type: a labeled grid of pixel intensities

use crate::distance::ProxyKey;
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest number of rows or columns a sample may have.
pub const MAX_SIDE: usize = 128;

/// A sampled image: `nrows * ncols` pixels stored row-major, an optional
/// class label, and its accumulated intensity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSample", into = "RawSample")]
pub struct Sample {
    pixels: Vec<u8>,
    ncols: usize,
    nrows: usize,
    intensity: i64,
    label: Option<char>,
}

/// On-disk form of a sample. The intensity is derived, never stored.
#[derive(Serialize, Deserialize)]
struct RawSample {
    ncols: usize,
    nrows: usize,
    pixels: Vec<u8>,
    #[serde(default)]
    label: Option<char>,
}

impl TryFrom<RawSample> for Sample {
    type Error = SearchError;

    fn try_from(raw: RawSample) -> Result<Self> {
        let sample = Sample::new(raw.pixels, raw.ncols, raw.nrows)?;
        Ok(match raw.label {
            Some(l) => sample.with_label(l),
            None => sample,
        })
    }
}

impl From<Sample> for RawSample {
    fn from(s: Sample) -> Self {
        RawSample {
            ncols: s.ncols,
            nrows: s.nrows,
            pixels: s.pixels,
            label: s.label,
        }
    }
}

impl Sample {
    /// Create a sample from row-major pixels.
    ///
    /// Fails with `InvalidArgument` when either side exceeds [`MAX_SIDE`] or
    /// when the pixel count does not match `ncols * nrows`.
    pub fn new(pixels: Vec<u8>, ncols: usize, nrows: usize) -> Result<Self> {
        if ncols > MAX_SIDE || nrows > MAX_SIDE {
            return Err(SearchError::InvalidArgument(format!(
                "dimension {}x{} is larger than {}",
                nrows, ncols, MAX_SIDE
            )));
        }
        if pixels.len() != ncols * nrows {
            return Err(SearchError::InvalidArgument(format!(
                "{} pixels do not fill a {}x{} grid",
                pixels.len(),
                nrows,
                ncols
            )));
        }
        let intensity = pixels.iter().map(|&p| i64::from(p)).sum();
        Ok(Self {
            pixels,
            ncols,
            nrows,
            intensity,
            label: None,
        })
    }

    /// Attach a class label.
    pub fn with_label(mut self, label: char) -> Self {
        self.label = Some(label);
        self
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn label(&self) -> Option<char> {
        self.label
    }

    /// Sum of all pixel values.
    pub fn intensity(&self) -> i64 {
        self.intensity
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> Result<u8> {
        if x >= self.ncols || y >= self.nrows {
            return Err(SearchError::OutOfRange {
                index: y * self.ncols + x,
                len: self.pixels.len(),
            });
        }
        Ok(self.pixels[y * self.ncols + x])
    }

    /// Check if this sample has the same grid shape as another
    pub fn has_same_shape(&self, other: &Sample) -> bool {
        self.ncols == other.ncols && self.nrows == other.nrows
    }

    /// Squared Euclidean distance over pixels.
    pub fn distance(&self, other: &Sample) -> Result<u64> {
        self.check_shape(other)?;
        Ok(self
            .pixels
            .iter()
            .zip(other.pixels.iter())
            .map(|(&a, &b)| {
                let d = i64::from(a) - i64::from(b);
                (d * d) as u64
            })
            .sum())
    }

    pub(crate) fn check_shape(&self, other: &Sample) -> Result<()> {
        if !self.has_same_shape(other) {
            return Err(SearchError::DimensionMismatch {
                expected: self.pixels.len(),
                actual: other.pixels.len(),
            });
        }
        Ok(())
    }
}

impl ProxyKey for Sample {
    fn proxy_key(&self) -> i64 {
        self.intensity
    }
}

/// Parses `"<rows>x<cols>:<p0>,<p1>,..."`, e.g. `"2x2:0,255,255,0"`.
impl FromStr for Sample {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| SearchError::InvalidArgument(reason);

        let (shape, data) = s
            .split_once(':')
            .ok_or_else(|| invalid(format!("missing ':' in sample {:?}", s)))?;
        let (rows, cols) = shape
            .trim()
            .split_once('x')
            .ok_or_else(|| invalid(format!("invalid shape {:?}", shape)))?;
        let nrows: usize = rows
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid row count: {}", rows)))?;
        let ncols: usize = cols
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid column count: {}", cols)))?;

        let pixels = data
            .split(',')
            .map(|x| {
                x.trim()
                    .parse::<u8>()
                    .map_err(|_| invalid(format!("invalid pixel: {}", x)))
            })
            .collect::<Result<Vec<u8>>>()?;

        Sample::new(pixels, ncols, nrows)
    }
}
