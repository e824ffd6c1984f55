use std::collections::TryReserveError;

/// An error from the `prism` crate.
///
/// None of these are fatal. A failed create or load never leaves a partial
/// [`PixelBuffer`](crate::PixelBuffer) behind, so the caller can keep
/// whatever image it had before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrismError {
  /// Width, height, or max color was zero, or max color was above `65535`.
  InvalidDimensions,

  /// The image is too large.
  ///
  /// The pixel count is limited to [`MAX_PIXELS`](crate::MAX_PIXELS) to
  /// prevent accidental out-of-memory problems.
  TooLarge,

  /// Couldn't parse the `P3` magic, the width, the height, or the max color.
  MalformedHeader,

  /// Fewer pixel triples than the header declared, or a triple that isn't
  /// made of unsigned integers.
  MalformedPixelData,

  /// A coordinate outside of the image.
  OutOfBounds,

  /// The allocator couldn't give us enough space.
  Alloc,

  /// Reading or writing a file failed.
  Io(std::io::ErrorKind),

  /// The session has no image to work on.
  NoImage,

  /// The session has no file path to save to.
  NoPath,
}

/// Shorthand for results with a [`PrismError`].
pub type PrismResult<T> = Result<T, PrismError>;

impl core::fmt::Display for PrismError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::InvalidDimensions => {
        write!(f, "width, height, and max color must be non-zero, and max color at most 65535")
      }
      Self::TooLarge => write!(f, "image has more than {} pixels", crate::MAX_PIXELS),
      Self::MalformedHeader => write!(f, "malformed PPM header"),
      Self::MalformedPixelData => write!(f, "malformed or truncated PPM pixel data"),
      Self::OutOfBounds => write!(f, "coordinate outside of the image"),
      Self::Alloc => write!(f, "allocation failed"),
      Self::Io(kind) => write!(f, "i/o error: {kind}"),
      Self::NoImage => write!(f, "no image is open"),
      Self::NoPath => write!(f, "the image has no file path yet"),
    }
  }
}

impl std::error::Error for PrismError {}

impl From<TryReserveError> for PrismError {
  #[inline]
  fn from(_: TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<std::io::Error> for PrismError {
  #[inline]
  fn from(e: std::io::Error) -> Self {
    Self::Io(e.kind())
  }
}
