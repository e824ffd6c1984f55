#![forbid(unsafe_code)]

//! The state of one editing session, with no window system attached.
//!
//! A UI shell (or the `prism` command line tool) owns a [`Session`], feeds it
//! already decoded input, and draws [`Session::image`] using
//! [`Session::view`]. The session never shows dialogs itself: paths come in
//! from the shell, and errors go back out to it.
//!
//! Every transition that can fail leaves the session exactly as it was, so a
//! bad file or bad numbers never cost the user their current image.

use std::path::{Path, PathBuf};

use crate::{
  apply_tool, ppm_load_path, ppm_save_path, PixelBuffer, PrismError, PrismResult, Rgba, Tool,
  ToolState, ViewTransform, ViewportInsets, MAX_BRUSH_RADIUS,
};

/// Startup settings for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
  /// Initial screen size, in screen pixels.
  pub screen_width: f32,
  pub screen_height: f32,
  /// Space kept free of canvas when fitting the view.
  pub insets: ViewportInsets,
  /// Pre-filled values of the "create new image" form.
  pub new_width: u32,
  pub new_height: u32,
  pub new_max_color: u32,
  /// Tool settings at startup.
  pub tools: ToolState,
}
impl Default for SessionConfig {
  #[inline]
  fn default() -> Self {
    Self {
      screen_width: 800.0,
      screen_height: 600.0,
      insets: ViewportInsets::EDITOR,
      new_width: 512,
      new_height: 512,
      new_max_color: 255,
      tools: ToolState::default(),
    }
  }
}

/// What the session is currently showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
  /// No image yet: the shell shows the create/open form.
  #[default]
  CreateImage,
  /// An image is open on the canvas.
  Editing,
}

/// One image being edited, along with its view and tool settings.
#[derive(Debug, Clone)]
pub struct Session {
  config: SessionConfig,
  mode: Mode,
  image: Option<PixelBuffer>,
  current_path: Option<PathBuf>,
  view: ViewTransform,
  tools: ToolState,
  screen_width: f32,
  screen_height: f32,
}
impl Default for Session {
  #[inline]
  fn default() -> Self {
    Self::new(SessionConfig::default())
  }
}
impl Session {
  /// Starts in [`Mode::CreateImage`] with no image.
  #[must_use]
  pub fn new(config: SessionConfig) -> Self {
    Self {
      config,
      mode: Mode::CreateImage,
      image: None,
      current_path: None,
      view: ViewTransform::default(),
      tools: config.tools,
      screen_width: config.screen_width,
      screen_height: config.screen_height,
    }
  }

  #[inline]
  #[must_use]
  pub fn config(&self) -> &SessionConfig {
    &self.config
  }
  #[inline]
  #[must_use]
  pub fn mode(&self) -> Mode {
    self.mode
  }
  #[inline]
  #[must_use]
  pub fn image(&self) -> Option<&PixelBuffer> {
    self.image.as_ref()
  }
  #[inline]
  #[must_use]
  pub fn view(&self) -> &ViewTransform {
    &self.view
  }
  #[inline]
  #[must_use]
  pub fn tools(&self) -> &ToolState {
    &self.tools
  }
  #[inline]
  #[must_use]
  pub fn current_path(&self) -> Option<&Path> {
    self.current_path.as_deref()
  }

  /// The file name to show, or `[Untitled]` for an image never saved.
  #[must_use]
  pub fn title(&self) -> String {
    match &self.current_path {
      Some(p) => p.display().to_string(),
      None => String::from("[Untitled]"),
    }
  }

  /// Replaces the image with a new blank one.
  ///
  /// The new image has no path yet, so the next [`save`](Self::save) needs
  /// [`save_as`](Self::save_as) first.
  pub fn new_image(&mut self, width: u32, height: u32, max_color: u32) -> PrismResult<()> {
    let image = PixelBuffer::create(width, height, max_color)?;
    self.current_path = None;
    self.replace_image(image);
    log::info!("created {width}x{height} image with max color {max_color}");
    Ok(())
  }

  /// Replaces the image with one loaded from a file.
  pub fn open(&mut self, path: impl AsRef<Path>) -> PrismResult<()> {
    let path = path.as_ref();
    let image = ppm_load_path(path)?;
    self.current_path = Some(path.to_path_buf());
    self.replace_image(image);
    log::info!("opened {}", path.display());
    Ok(())
  }

  /// Writes the image back to the file it came from.
  ///
  /// ## Failure
  /// * [`PrismError::NoImage`] if there's no image open.
  /// * [`PrismError::NoPath`] if the image was never saved or loaded.
  pub fn save(&self) -> PrismResult<()> {
    let image = self.image.as_ref().ok_or(PrismError::NoImage)?;
    let path = self.current_path.as_deref().ok_or(PrismError::NoPath)?;
    ppm_save_path(image, path)?;
    log::info!("saved to {}", path.display());
    Ok(())
  }

  /// Writes the image to a new file, which becomes the current path.
  pub fn save_as(&mut self, path: impl AsRef<Path>) -> PrismResult<()> {
    let path = path.as_ref();
    let image = self.image.as_ref().ok_or(PrismError::NoImage)?;
    ppm_save_path(image, path)?;
    self.current_path = Some(path.to_path_buf());
    log::info!("saved to {}", path.display());
    Ok(())
  }

  /// Drops the image and goes back to [`Mode::CreateImage`].
  pub fn close(&mut self) {
    self.image = None;
    self.current_path = None;
    self.mode = Mode::CreateImage;
  }

  /// Call when the window changes size.
  #[inline]
  pub fn resize_screen(&mut self, width: f32, height: f32) {
    self.screen_width = width;
    self.screen_height = height;
  }

  /// Zooms and pans so the whole image is visible.
  pub fn fit_view(&mut self) {
    if let Some(image) = &self.image {
      self.view.fit(
        image.width(),
        image.height(),
        self.screen_width,
        self.screen_height,
        self.config.insets,
      );
    }
  }

  /// Applies the current tool at an image position.
  ///
  /// ## Failure
  /// * [`PrismError::NoImage`] if there's no image open.
  /// * [`PrismError::OutOfBounds`] if the position is outside the image.
  pub fn apply_at(&mut self, x: i32, y: i32) -> PrismResult<()> {
    let image = self.image.as_mut().ok_or(PrismError::NoImage)?;
    if !image.in_bounds(i64::from(x), i64::from(y)) {
      return Err(PrismError::OutOfBounds);
    }
    apply_tool(image, x, y, &self.tools);
    Ok(())
  }

  /// A left click (or drag step) at a screen position.
  ///
  /// Returns if the image was painted. Clicks off the canvas do nothing.
  pub fn pointer_down(&mut self, screen_x: f32, screen_y: f32) -> bool {
    if self.mode != Mode::Editing {
      return false;
    }
    let (x, y) = self.view.to_image(screen_x, screen_y);
    self.apply_at(x, y).is_ok()
  }

  /// Mouse wheel movement zooms the canvas.
  #[inline]
  pub fn scroll(&mut self, wheel_delta: f32) {
    if self.mode == Mode::Editing {
      self.view.zoom_by(wheel_delta);
    }
  }

  /// A pan drag (middle button, or space plus left button) moves the canvas.
  #[inline]
  pub fn drag(&mut self, dx: f32, dy: f32) {
    if self.mode == Mode::Editing {
      self.view.pan_by(dx, dy);
    }
  }

  #[inline]
  pub fn set_tool(&mut self, tool: Tool) {
    self.tools.tool = tool;
  }

  /// Brush color. The color picker has no alpha slider, so this is usually
  /// opaque, but any color is accepted.
  #[inline]
  pub fn set_color(&mut self, color: Rgba) {
    self.tools.color = color;
  }

  /// Brush radius, clamped to `1..=`[`MAX_BRUSH_RADIUS`].
  #[inline]
  pub fn set_radius(&mut self, radius: u32) {
    self.tools.radius = radius.clamp(1, MAX_BRUSH_RADIUS);
  }

  fn replace_image(&mut self, image: PixelBuffer) {
    // the old buffer drops here, there's never two alive in the session
    self.image = Some(image);
    self.mode = Mode::Editing;
    self.fit_view();
  }
}
