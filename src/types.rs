use std::fmt;
use std::str::FromStr;

/// Represents errors that can occur while converting a symbol to an image.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// An unknown output format name or extension was given.
    #[error("Unknown output format: {0}")]
    InvalidFormat(String),
    /// An invalid rendering parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// The matrix side length is not a valid QR symbol dimension.
    #[error("Invalid matrix dimension: {0}")]
    InvalidDimension(usize),
    /// A symbol set operation was requested in a state that does not allow it.
    #[error("Invalid symbol set state: {0}")]
    InvalidState(&'static str),
    /// The computed pixel width exceeds the encoder's row buffer capacity.
    #[error("Image width is too large: {0} pixels")]
    WidthTooLarge(usize),
    /// DEFLATE compression failed. Contains the failing compressor stage.
    #[error("Deflate failed: {0}")]
    Deflate(String),
    /// The raster backend failed to emit a GIF header or frame.
    #[error("Frame encoding failed: {0}")]
    ImageFrame(String),
    /// An I/O error occurred during file or stream writing.
    #[error("I/O error occurred")]
    Io,
}

/// Output container formats supported by the converters.
///
/// Dispatch over formats is a closed `match`, so adding a variant forces
/// every encoder call site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Monochrome 1-bit non-interlaced PNG.
    Png,
    /// Big-endian bilevel strip-oriented TIFF.
    Tiff,
    /// SVG 1.1 vector document.
    Svg,
    /// GIF; animated when encoding a structured-append set.
    Gif,
}

impl Format {
    /// MIME type announced for the encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Png => "image/png",
            Format::Tiff => "image/tiff",
            Format::Svg => "image/svg+xml",
            Format::Gif => "image/gif",
        }
    }

    /// Canonical filename extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Tiff => "tif",
            Format::Svg => "svg",
            Format::Gif => "gif",
        }
    }

    /// Looks up a format by filename extension.
    pub fn from_extension(ext: &str) -> Result<Format, Error> {
        ext.parse()
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format, Error> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Format::Png),
            "tiff" | "tif" => Ok(Format::Tiff),
            "svg" => Ok(Format::Svg),
            "gif" => Ok(Format::Gif),
            _ => Err(Error::InvalidFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Rendering parameters shared by all converters.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Quiet-zone width around each symbol, in module units. The QR
    /// specification calls for at least 4.
    pub separator: u32,
    /// Pixels per module.
    pub magnify: u32,
    /// Structured-append placement: 0 chooses a grid as square as possible,
    /// a positive value fixes the column count (row-major fill), a negative
    /// value fixes the row count (column-major fill).
    pub order: i32,
    /// GIF animation frame delay, in centiseconds.
    pub delay: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            separator: 4,
            magnify: 1,
            order: 0,
            delay: 100,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), Error> {
        if self.magnify == 0 {
            return Err(Error::InvalidParameter("magnify must be at least 1"));
        }
        Ok(())
    }
}
