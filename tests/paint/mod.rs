use prism::*;

use super::{striped, RED};

const TEAL: Rgba = Rgba { r: 10, g: 20, b: 30, a: 255 };

/// The 4-connected component of `start`'s color, found independently of
/// `flood_fill` by repeated relaxation.
fn component(b: &PixelBuffer, sx: u32, sy: u32) -> Vec<bool> {
  let target = b.get(sx, sy).unwrap();
  let w = b.width() as usize;
  let mut inside = vec![false; b.pixel_count()];
  inside[sy as usize * w + sx as usize] = true;
  let mut changed = true;
  while changed {
    changed = false;
    for y in 0..b.height() {
      for x in 0..b.width() {
        let i = y as usize * w + x as usize;
        if inside[i] || b.get(x, y) != Some(target) {
          continue;
        }
        let touches = (x > 0 && inside[i - 1])
          || (x + 1 < b.width() && inside[i + 1])
          || (y > 0 && inside[i - w])
          || (y + 1 < b.height() && inside[i + w]);
        if touches {
          inside[i] = true;
          changed = true;
        }
      }
    }
  }
  inside
}

#[test]
fn test_fill_whole_white_image() {
  let mut b = PixelBuffer::create(4, 4, 255).unwrap();
  assert!(b.pixels().iter().all(|p| *p == WHITE));
  assert_eq!(flood_fill(&mut b, 0, 0, TEAL), 16);
  assert!(b.pixels().iter().all(|p| *p == TEAL));
  let text = ppm_serialize(&b);
  let mut lines = text.lines();
  assert_eq!(lines.next(), Some("P3"));
  assert_eq!(lines.next(), Some("4 4"));
  assert_eq!(lines.next(), Some("255"));
  let pixel_lines: Vec<&str> = lines.collect();
  assert_eq!(pixel_lines.len(), 16);
  assert!(pixel_lines.iter().all(|l| *l == "10 20 30"));
}

#[test]
fn test_fill_is_four_connected() {
  // a diagonal line of red splits the image into two white halves
  let mut b = PixelBuffer::create(5, 5, 255).unwrap();
  for i in 0..5 {
    b.set(i, i, RED).unwrap();
  }
  // below the diagonal: (0,1) (0,2) (1,2) ... 10 pixels
  assert_eq!(flood_fill(&mut b, 0, 4, TEAL), 10);
  assert_eq!(b.get(4, 0), Some(WHITE));
  assert_eq!(b.get(2, 2), Some(RED));
  assert_eq!(b.get(1, 3), Some(TEAL));
  assert_eq!(b.get(3, 1), Some(WHITE));
}

/// Few colors in rectangular patches, so regions are bigger than one pixel.
fn blocky(width: u32, height: u32) -> PixelBuffer {
  let mut b = PixelBuffer::create(width, height, 255).unwrap();
  for y in 0..height {
    for x in 0..width {
      if ((x / 3) * 7 + (y / 2) * 5) % 4 == 0 {
        b.set(x, y, RED).unwrap();
      }
    }
  }
  b
}

#[test]
fn test_fill_containment_matches_reference() {
  let b = blocky(23, 17);
  for (sx, sy) in [(0, 0), (5, 9), (22, 16), (11, 3)] {
    let expected = component(&b, sx, sy);
    let mut filled = b.clone();
    let count = flood_fill(&mut filled, sx as i32, sy as i32, TEAL);
    assert_eq!(count, expected.iter().filter(|&&x| x).count());
    for (i, (before, after)) in b.pixels().iter().zip(filled.pixels()).enumerate() {
      if expected[i] {
        assert_eq!(*after, TEAL);
      } else {
        assert_eq!(after, before);
      }
    }
  }
}

#[test]
fn test_fill_is_idempotent() {
  let mut once = striped(12, 12, 255);
  flood_fill(&mut once, 6, 6, RED);
  let mut twice = once.clone();
  assert_eq!(flood_fill(&mut twice, 6, 6, RED), 0);
  assert_eq!(once, twice);
}

#[test]
fn test_fill_noops() {
  let mut b = striped(6, 6, 255);
  let before = b.clone();
  assert_eq!(flood_fill(&mut b, -1, 0, TEAL), 0);
  assert_eq!(flood_fill(&mut b, 0, -1, TEAL), 0);
  assert_eq!(flood_fill(&mut b, 6, 0, TEAL), 0);
  assert_eq!(flood_fill(&mut b, 0, 6, TEAL), 0);
  let here = b.get(2, 3).unwrap();
  assert_eq!(flood_fill(&mut b, 2, 3, here), 0);
  assert_eq!(b, before);
}

#[test]
fn test_fill_compares_alpha() {
  let mut b = PixelBuffer::create(3, 1, 255).unwrap();
  b.set(1, 0, Rgba { a: 0, ..WHITE }).unwrap();
  assert_eq!(flood_fill(&mut b, 0, 0, RED), 1);
  assert_eq!(b.get(2, 0), Some(WHITE));
}

#[test_log::test]
fn test_fill_large_uniform_image() {
  // big enough that a recursive fill would blow the stack
  let mut b = PixelBuffer::create(1024, 1024, 255).unwrap();
  assert_eq!(flood_fill(&mut b, 512, 0, RED), 1024 * 1024);
  assert!(b.pixels().iter().all(|p| *p == RED));
}

#[test]
fn test_brush_plus_shape() {
  let mut b = PixelBuffer::create(5, 5, 255).unwrap();
  brush_stamp(&mut b, 2, 2, RED, 1);
  for y in 0..5 {
    for x in 0..5 {
      let plus = matches!((x, y), (2, 2) | (1, 2) | (3, 2) | (2, 1) | (2, 3));
      let expected = if plus { RED } else { WHITE };
      assert_eq!(b.get(x, y), Some(expected), "at ({x},{y})");
    }
  }
}

#[test]
fn test_brush_radius_zero() {
  let mut b = PixelBuffer::create(3, 3, 255).unwrap();
  brush_stamp(&mut b, 1, 1, RED, 0);
  assert_eq!(b.pixels().iter().filter(|p| **p == RED).count(), 1);
  assert_eq!(b.get(1, 1), Some(RED));
}

#[test]
fn test_brush_containment() {
  for (cx, cy, r) in [(4, 4, 3), (0, 0, 5), (-2, 7, 4), (12, 3, 2), (5, 5, 20), (100, 100, 3)] {
    let mut b = PixelBuffer::create(9, 9, 255).unwrap();
    brush_stamp(&mut b, cx, cy, RED, r);
    for y in 0..9_i32 {
      for x in 0..9_i32 {
        let (dx, dy) = (x - cx, y - cy);
        let inside = dx * dx + dy * dy <= (r * r) as i32;
        let expected = if inside { RED } else { WHITE };
        assert_eq!(b.get(x as u32, y as u32), Some(expected), "({x},{y}) c=({cx},{cy}) r={r}");
      }
    }
  }
}

#[test]
fn test_brush_extreme_coordinates() {
  let mut b = PixelBuffer::create(4, 4, 255).unwrap();
  brush_stamp(&mut b, i32::MAX, i32::MIN, RED, 3);
  assert!(b.pixels().iter().all(|p| *p == WHITE));
  // about 3.04e9 away, well within a radius of 4.29e9
  brush_stamp(&mut b, i32::MIN, i32::MAX, RED, u32::MAX);
  assert!(b.pixels().iter().all(|p| *p == RED));
}

#[test]
fn test_apply_tool_dispatch() {
  let mut b = PixelBuffer::create(8, 8, 255).unwrap();
  let mut tools = ToolState { tool: Tool::Brush, color: RED, radius: 0 };
  apply_tool(&mut b, 3, 3, &tools);
  assert_eq!(b.pixels().iter().filter(|p| **p == RED).count(), 1);
  tools.tool = Tool::Fill;
  tools.color = TEAL;
  apply_tool(&mut b, 0, 0, &tools);
  assert_eq!(b.pixels().iter().filter(|p| **p == TEAL).count(), 63);
}
