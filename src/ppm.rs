#![forbid(unsafe_code)]

//! Reading and writing the plain text PPM format (`P3`).
//!
//! ```text
//! P3
//! <width> <height>
//! <max_color>
//! <r> <g> <b>      (width * height times, row-major, top-left first)
//! ```
//!
//! Any whitespace can separate the numbers, and following the Netpbm
//! convention a `#` starts a comment that runs to the end of the line.
//!
//! Channel values in a file are in `0..=max_color`, while a [`PixelBuffer`]
//! always holds `0..=255`, so every channel is rescaled on the way in and on
//! the way out. When `max_color` is 255 this is exact. For other depths a
//! round trip can move each channel by up to one quantization step.
//!
//! Only the ASCII `P3` variant is supported. Binary `P6` files are rejected
//! as a [`PrismError::MalformedHeader`].

use core::fmt::Write;
use std::path::Path;

use crate::{PixelBuffer, PrismError, PrismResult, Rgba};

/// The header values of a `P3` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmHeader {
  pub width: u32,
  pub height: u32,
  /// Max value per channel entry.
  pub max_color: u32,
}

/// Skips leading whitespace and `#` comments.
#[inline]
#[must_use]
pub fn ppm_trim(mut bytes: &[u8]) -> &[u8] {
  loop {
    match bytes {
      [u, tail @ ..] if u.is_ascii_whitespace() => bytes = tail,
      [b'#', tail @ ..] => {
        let mut it = tail.splitn(2, |&u| u == b'\n');
        drop(it.next());
        bytes = it.next().unwrap_or(&[]);
      }
      _ => return bytes,
    }
  }
}

/// Pulls an unsigned decimal integer off the front of the bytes.
///
/// Gives `None` if the bytes don't start with a digit or the value doesn't
/// fit in a `u32`. The spare bytes are already trimmed.
#[inline]
#[must_use]
pub fn ppm_pull_ascii_u32(bytes: &[u8]) -> Option<(u32, &[u8])> {
  let digit_count = bytes.iter().take_while(|u| u.is_ascii_digit()).count();
  if digit_count == 0 {
    return None;
  }
  let (digits, spare) = bytes.split_at(digit_count);
  let mut number: u32 = 0;
  for d in digits {
    number = number.checked_mul(10)?.checked_add(u32::from(d - b'0'))?;
  }
  Some((number, ppm_trim(spare)))
}

#[inline]
fn ppm_pull_tag(bytes: &[u8]) -> Option<&[u8]> {
  match bytes {
    [b'P', b'3'] => Some(&[]),
    [b'P', b'3', sep, ..] if sep.is_ascii_whitespace() || *sep == b'#' => {
      Some(ppm_trim(&bytes[2..]))
    }
    _ => None,
  }
}

/// Parses the header, giving it along with the pixel data bytes that follow.
///
/// ## Failure
/// * [`PrismError::MalformedHeader`] if the magic isn't exactly `P3`, or the
///   width, height, or max color is missing or not an unsigned integer.
///
/// The values themselves aren't checked here, that happens when the buffer
/// gets allocated.
#[inline]
pub fn ppm_pull_header(bytes: &[u8]) -> PrismResult<(PpmHeader, &[u8])> {
  let rest = ppm_pull_tag(ppm_trim(bytes)).ok_or(PrismError::MalformedHeader)?;
  let (width, rest) = ppm_pull_ascii_u32(rest).ok_or(PrismError::MalformedHeader)?;
  let (height, rest) = ppm_pull_ascii_u32(rest).ok_or(PrismError::MalformedHeader)?;
  let (max_color, rest) = ppm_pull_ascii_u32(rest).ok_or(PrismError::MalformedHeader)?;
  Ok((PpmHeader { width, height, max_color }, rest))
}

/// Iterates the `[r, g, b]` triples of the pixel data.
///
/// The iterator ends at the first triple that can't be fully parsed, so a
/// caller can spot truncated data by counting.
#[inline]
pub fn ppm_iter_p3(mut bytes: &[u8]) -> impl Iterator<Item = [u32; 3]> + '_ {
  core::iter::from_fn(move || {
    let (r, tail) = ppm_pull_ascii_u32(bytes)?;
    let (g, tail) = ppm_pull_ascii_u32(tail)?;
    let (b, tail) = ppm_pull_ascii_u32(tail)?;
    bytes = tail;
    Some([r, g, b])
  })
}

/// Rescales a `0..=max_color` file value into `0..=255`, rounding to
/// nearest.
///
/// Values above `max_color` clamp to 255.
#[inline]
#[must_use]
pub const fn scale_to_255(value: u32, max_color: u32) -> u8 {
  let max = if max_color == 0 { 1 } else { max_color as u64 };
  let scaled = (2 * (value as u64) * 255 + max) / (2 * max);
  if scaled > 255 {
    255
  } else {
    scaled as u8
  }
}

/// Rescales a `0..=255` channel into `0..=max_color`, rounding to nearest.
#[inline]
#[must_use]
pub const fn scale_from_255(channel: u8, max_color: u32) -> u32 {
  ((2 * (channel as u64) * (max_color as u64) + 255) / 510) as u32
}

/// Writes the buffer as `P3` text, one pixel triple per line.
///
/// Alpha isn't written, the format has no alpha channel.
pub fn ppm_write<W: Write>(buffer: &PixelBuffer, w: &mut W) -> core::fmt::Result {
  let max = buffer.max_color();
  write!(w, "P3\n{} {}\n{}\n", buffer.width(), buffer.height(), max)?;
  for p in buffer.pixels() {
    writeln!(
      w,
      "{} {} {}",
      scale_from_255(p.r, max),
      scale_from_255(p.g, max),
      scale_from_255(p.b, max)
    )?;
  }
  Ok(())
}

/// Serializes the buffer as `P3` text.
#[must_use]
pub fn ppm_serialize(buffer: &PixelBuffer) -> String {
  // up to "65535 65535 65535\n" per pixel, but most lines are far shorter
  let mut out = String::with_capacity(16 + buffer.pixel_count() * 12);
  // formatting into a String can't fail
  let _ = ppm_write(buffer, &mut out);
  out
}

/// Parses `P3` text into a new buffer.
///
/// See [`ppm_deserialize_bytes`].
#[inline]
pub fn ppm_deserialize(text: &str) -> PrismResult<PixelBuffer> {
  ppm_deserialize_bytes(text.as_bytes())
}

/// Parses `P3` data into a new buffer.
///
/// Every pixel comes out fully opaque. Data after the last declared triple is
/// ignored.
///
/// ## Failure
/// * [`PrismError::MalformedHeader`] as per [`ppm_pull_header`].
/// * [`PrismError::InvalidDimensions`], [`PrismError::TooLarge`], or
///   [`PrismError::Alloc`] from [`PixelBuffer::create`].
/// * [`PrismError::MalformedPixelData`] if there are fewer triples than
///   `width * height`. Data too short to possibly hold them all is rejected
///   before the buffer is allocated.
pub fn ppm_deserialize_bytes(bytes: &[u8]) -> PrismResult<PixelBuffer> {
  let (header, pixel_data) = ppm_pull_header(bytes)?;
  let PpmHeader { width, height, max_color } = header;
  let pixel_count = PixelBuffer::check_dimensions(width, height, max_color)?;
  // the shortest triple is "0 0 0", with one separator before each after it
  let min_len = (pixel_count as u64) * 6 - 1;
  if (pixel_data.len() as u64) < min_len {
    let len = pixel_data.len();
    log::warn!("PPM data is {len} bytes, {pixel_count} pixels need at least {min_len}");
    return Err(PrismError::MalformedPixelData);
  }
  let mut buffer = PixelBuffer::create(width, height, max_color)?;
  let mut filled = 0_usize;
  for (dst, [r, g, b]) in buffer.pixels_mut().iter_mut().zip(ppm_iter_p3(pixel_data)) {
    *dst = Rgba {
      r: scale_to_255(r, max_color),
      g: scale_to_255(g, max_color),
      b: scale_to_255(b, max_color),
      a: u8::MAX,
    };
    filled += 1;
  }
  if filled < buffer.pixel_count() {
    log::warn!("PPM data ended after {filled} of {} pixels", buffer.pixel_count());
    return Err(PrismError::MalformedPixelData);
  }
  Ok(buffer)
}

/// Reads and parses a `P3` file.
pub fn ppm_load_path(path: impl AsRef<Path>) -> PrismResult<PixelBuffer> {
  let path = path.as_ref();
  let bytes = std::fs::read(path).map_err(|e| {
    log::warn!("can't read {}: {e}", path.display());
    PrismError::from(e)
  })?;
  let buffer = ppm_deserialize_bytes(&bytes)?;
  log::debug!("loaded {} ({}x{})", path.display(), buffer.width(), buffer.height());
  Ok(buffer)
}

/// Serializes the buffer and writes it to a file, replacing the file if it
/// exists.
pub fn ppm_save_path(buffer: &PixelBuffer, path: impl AsRef<Path>) -> PrismResult<()> {
  let path = path.as_ref();
  std::fs::write(path, ppm_serialize(buffer)).map_err(|e| {
    log::warn!("can't write {}: {e}", path.display());
    PrismError::from(e)
  })?;
  log::debug!("saved {} ({}x{})", path.display(), buffer.width(), buffer.height());
  Ok(())
}
