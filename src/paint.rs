#![forbid(unsafe_code)]

//! The paint tools: a round brush and a bucket fill.
//!
//! Both take signed image coordinates, since positions mapped from the screen
//! can easily land outside the image. Nothing here ever fails. A position
//! with nothing to paint is just a no-op.

use crate::{PixelBuffer, Rgba, BLACK};

/// The largest brush radius the editor offers.
pub const MAX_BRUSH_RADIUS: u32 = 50;

/// Sets every pixel within `radius` of `(cx, cy)` to `color`.
///
/// A pixel is painted when `(px-cx)^2 + (py-cy)^2 <= radius^2`, so a radius
/// of 0 paints just the center. The center itself may be outside the image,
/// only the in-bounds part of the disc gets painted.
pub fn brush_stamp(buffer: &mut PixelBuffer, cx: i32, cy: i32, color: Rgba, radius: u32) {
  let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
  // far off centers and huge radii square past i64
  let r_squared = i128::from(r) * i128::from(r);
  let y_start = (cy - r).max(0);
  let y_end = (cy + r).min(i64::from(buffer.height()) - 1);
  let x_start = (cx - r).max(0);
  let x_end = (cx + r).min(i64::from(buffer.width()) - 1);
  for py in y_start..=y_end {
    let dy = i128::from(py - cy);
    for px in x_start..=x_end {
      let dx = i128::from(px - cx);
      if dx * dx + dy * dy <= r_squared {
        // both are inside `0..width` and `0..height` here
        if let Some(p) = buffer.get_mut(px as u32, py as u32) {
          *p = color;
        }
      }
    }
  }
}

/// Replaces the 4-connected region of same-colored pixels containing
/// `(x, y)` with `new_color`.
///
/// Colors must match exactly on all four channels. If the start is out of
/// bounds, or already `new_color`, nothing happens.
///
/// Returns how many pixels were repainted.
pub fn flood_fill(buffer: &mut PixelBuffer, x: i32, y: i32, new_color: Rgba) -> usize {
  if !buffer.in_bounds(i64::from(x), i64::from(y)) {
    return 0;
  }
  let (x, y) = (x as u32, y as u32);
  let target = match buffer.get(x, y) {
    Some(c) if c != new_color => c,
    _ => return 0,
  };
  let (width, height) = (buffer.width(), buffer.height());
  // Note: Being *literally* recursive can blow out the stack on a big uniform
  // region. Instead each pixel is painted as it goes onto the worklist, so it
  // can't be pushed twice and the list never outgrows the image.
  let mut worklist: Vec<(u32, u32)> = Vec::new();
  let mut painted = 0_usize;
  let mut visit = |buffer: &mut PixelBuffer, worklist: &mut Vec<(u32, u32)>, px: u32, py: u32| {
    if let Some(p) = buffer.get_mut(px, py) {
      if *p == target {
        *p = new_color;
        painted += 1;
        worklist.push((px, py));
      }
    }
  };
  visit(&mut *buffer, &mut worklist, x, y);
  while let Some((cx, cy)) = worklist.pop() {
    if cx + 1 < width {
      visit(&mut *buffer, &mut worklist, cx + 1, cy);
    }
    if cx > 0 {
      visit(&mut *buffer, &mut worklist, cx - 1, cy);
    }
    if cy + 1 < height {
      visit(&mut *buffer, &mut worklist, cx, cy + 1);
    }
    if cy > 0 {
      visit(&mut *buffer, &mut worklist, cx, cy - 1);
    }
  }
  log::trace!("flood fill at ({x},{y}) repainted {painted} pixels");
  painted
}

/// Which tool a click applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tool {
  /// Paint a disc with [`brush_stamp`].
  #[default]
  Brush,
  /// Bucket fill with [`flood_fill`].
  Fill,
}

/// The current tool settings of an editing session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
  pub tool: Tool,
  pub color: Rgba,
  /// Only used by the brush.
  pub radius: u32,
}
impl Default for ToolState {
  #[inline]
  fn default() -> Self {
    Self { tool: Tool::Brush, color: BLACK, radius: 5 }
  }
}

/// Applies the current tool at an image position.
#[inline]
pub fn apply_tool(buffer: &mut PixelBuffer, x: i32, y: i32, tools: &ToolState) {
  match tools.tool {
    Tool::Brush => brush_stamp(buffer, x, y, tools.color, tools.radius),
    Tool::Fill => {
      flood_fill(buffer, x, y, tools.color);
    }
  }
}
