#![forbid(unsafe_code)]

//! Mapping between screen positions and image pixels for zoom and pan.
//!
//! An image pixel `(ix, iy)` covers the screen square starting at
//! `(pan_x + ix * zoom, pan_y + iy * zoom)` with side length `zoom`.

/// Smallest zoom reachable by [`ViewTransform::zoom_by`].
pub const MIN_ZOOM: f32 = 0.1;
/// Largest zoom reachable by [`ViewTransform::zoom_by`].
pub const MAX_ZOOM: f32 = 10.0;
/// Zoom change per unit of mouse wheel movement.
pub const ZOOM_STEP: f32 = 0.1;

/// Maps a screen position to the image pixel under it.
///
/// The result isn't bounds checked, it can be negative or past the image.
#[inline]
#[must_use]
pub fn to_image_coords(
  screen_x: f32, screen_y: f32, zoom: f32, pan_x: f32, pan_y: f32,
) -> (i32, i32) {
  let image_x = ((screen_x - pan_x) / zoom).floor();
  let image_y = ((screen_y - pan_y) / zoom).floor();
  // float to int `as` casts saturate
  (image_x as i32, image_y as i32)
}

/// Gives the `(zoom, pan_x, pan_y)` that shows a whole image as large as
/// possible, centered in the viewport.
///
/// The zoom isn't clamped to [`MIN_ZOOM`]`..=`[`MAX_ZOOM`].
#[inline]
#[must_use]
pub fn fit_to_viewport(
  image_width: u32, image_height: u32, viewport_width: f32, viewport_height: f32,
) -> (f32, f32, f32) {
  let (iw, ih) = (image_width as f32, image_height as f32);
  let zoom = (viewport_width / iw).min(viewport_height / ih);
  let pan_x = (viewport_width - iw * zoom) / 2.0;
  let pan_y = (viewport_height - ih * zoom) / 2.0;
  (zoom, pan_x, pan_y)
}

/// Screen space reserved around the canvas for toolbars and panels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[allow(missing_docs)]
pub struct ViewportInsets {
  pub left: f32,
  pub top: f32,
  pub right: f32,
  pub bottom: f32,
}
impl ViewportInsets {
  /// No chrome at all, the canvas gets the full screen.
  pub const NONE: Self = Self { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 };

  /// The editor layout: info and buttons along the top, tools and the color
  /// picker along the bottom.
  pub const EDITOR: Self = Self { left: 10.0, top: 60.0, right: 10.0, bottom: 150.0 };
}

/// The zoom and pan of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
  pub zoom: f32,
  pub pan_x: f32,
  pub pan_y: f32,
}
impl Default for ViewTransform {
  #[inline]
  fn default() -> Self {
    Self { zoom: 1.0, pan_x: 0.0, pan_y: 0.0 }
  }
}
impl ViewTransform {
  /// Maps a screen position to the image pixel under it.
  #[inline]
  #[must_use]
  pub fn to_image(&self, screen_x: f32, screen_y: f32) -> (i32, i32) {
    to_image_coords(screen_x, screen_y, self.zoom, self.pan_x, self.pan_y)
  }

  /// Top-left screen corner of an image pixel.
  #[inline]
  #[must_use]
  pub fn to_screen(&self, image_x: u32, image_y: u32) -> (f32, f32) {
    (self.pan_x + image_x as f32 * self.zoom, self.pan_y + image_y as f32 * self.zoom)
  }

  /// Adjusts zoom by mouse wheel movement, clamped to
  /// [`MIN_ZOOM`]`..=`[`MAX_ZOOM`].
  ///
  /// The pan is left alone, so zooming is anchored at the image's top-left.
  #[inline]
  pub fn zoom_by(&mut self, wheel_delta: f32) {
    self.zoom = (self.zoom + wheel_delta * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
  }

  /// Moves the canvas by a screen space drag.
  #[inline]
  pub fn pan_by(&mut self, dx: f32, dy: f32) {
    self.pan_x += dx;
    self.pan_y += dy;
  }

  /// Fits the image into the screen area left over by `insets`, centered.
  ///
  /// A screen smaller than the insets still leaves a one pixel area, and the
  /// zoom never goes below [`MIN_ZOOM`], so the view stays usable.
  #[inline]
  pub fn fit(
    &mut self, image_width: u32, image_height: u32, screen_width: f32, screen_height: f32,
    insets: ViewportInsets,
  ) {
    let available_width = (screen_width - insets.left - insets.right).max(1.0);
    let available_height = (screen_height - insets.top - insets.bottom).max(1.0);
    let (zoom, _, _) =
      fit_to_viewport(image_width, image_height, available_width, available_height);
    let zoom = zoom.max(MIN_ZOOM);
    self.zoom = zoom;
    self.pan_x = (available_width - image_width as f32 * zoom) / 2.0 + insets.left;
    self.pan_y = (available_height - image_height as f32 * zoom) / 2.0 + insets.top;
    log::trace!("fit {image_width}x{image_height} image: {:?}", self);
  }
}
