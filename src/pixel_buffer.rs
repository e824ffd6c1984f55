#![forbid(unsafe_code)]

//! Provides the heap-allocated image type that the editor works on.

use crate::{PrismError, PrismResult, Rgba, WHITE};

/// The most pixels a [`PixelBuffer`] may hold (`16384 * 16384`).
pub const MAX_PIXELS: u64 = 16384 * 16384;

/// The largest legal `max_color` value.
pub const MAX_COLOR_LIMIT: u32 = u16::MAX as u32;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// You don't ever need to call this function yourself, but it's how
/// [`PixelBuffer`] converts 2d coordinates into index values within its pixel
/// vector.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// An owned RGBA image plus the color depth it declares when serialized.
///
/// Samples in memory are always `0..=255` per channel. The `max_color` value
/// only changes how they're scaled on the way to and from PPM text.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
  width: u32,
  height: u32,
  max_color: u32,
  pixels: Vec<Rgba>,
}
impl PixelBuffer {
  /// Makes a new all-white, fully opaque image.
  ///
  /// ## Failure
  /// * [`PrismError::InvalidDimensions`] if any argument is zero or
  ///   `max_color` is above [`MAX_COLOR_LIMIT`].
  /// * [`PrismError::TooLarge`] if `width * height` is above [`MAX_PIXELS`].
  /// * [`PrismError::Alloc`] if the allocator can't provide the space.
  pub fn create(width: u32, height: u32, max_color: u32) -> PrismResult<Self> {
    let pixel_count = Self::check_dimensions(width, height, max_color)?;
    let mut pixels: Vec<Rgba> = Vec::new();
    pixels.try_reserve_exact(pixel_count)?;
    pixels.resize(pixel_count, WHITE);
    log::trace!("allocated {width}x{height} image, max color {max_color}");
    Ok(Self { width, height, max_color, pixels })
  }

  /// Checks the arguments of [`create`](Self::create) without allocating,
  /// giving the pixel count they'd need.
  ///
  /// ## Failure
  /// Same as `create`, minus [`PrismError::Alloc`].
  pub fn check_dimensions(width: u32, height: u32, max_color: u32) -> PrismResult<usize> {
    if width == 0 || height == 0 || max_color == 0 || max_color > MAX_COLOR_LIMIT {
      log::warn!("rejected image dimensions {width}x{height} with max color {max_color}");
      return Err(PrismError::InvalidDimensions);
    }
    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count > MAX_PIXELS {
      log::warn!("rejected image of {width}x{height}: {pixel_count} > {MAX_PIXELS} pixels");
      return Err(PrismError::TooLarge);
    }
    usize::try_from(pixel_count).map_err(|_| PrismError::TooLarge)
  }

  /// Width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// The declared max color value of the serialized form.
  #[inline]
  #[must_use]
  pub const fn max_color(&self) -> u32 {
    self.max_color
  }

  /// `width * height`
  #[inline]
  #[must_use]
  pub fn pixel_count(&self) -> usize {
    self.pixels.len()
  }

  /// If the (signed) position is inside the image.
  #[inline]
  #[must_use]
  pub fn in_bounds(&self, x: i64, y: i64) -> bool {
    x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width)).copied()
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Rgba> {
    if x < self.width && y < self.height {
      let i = xy_width_to_index(x, y, self.width);
      self.pixels.get_mut(i)
    } else {
      None
    }
  }

  /// Sets the pixel at the position.
  ///
  /// ## Failure
  /// * [`PrismError::OutOfBounds`] if the position isn't inside the image.
  #[inline]
  pub fn set(&mut self, x: u32, y: u32, color: Rgba) -> PrismResult<()> {
    let p = self.get_mut(x, y).ok_or(PrismError::OutOfBounds)?;
    *p = color;
    Ok(())
  }

  /// All pixels, row-major, top-left first.
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[Rgba] {
    &self.pixels
  }

  /// All pixels, row-major, top-left first.
  #[inline]
  #[must_use]
  pub fn pixels_mut(&mut self) -> &mut [Rgba] {
    &mut self.pixels
  }

  /// The pixel data as raw RGBA8 bytes, ready for a texture upload.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.pixels)
  }
}
