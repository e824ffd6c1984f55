#![forbid(unsafe_code)]

//! The core of a minimal editor for plain text PPM (`P3`) images.
//!
//! * [`PixelBuffer`] is the image: a grid of RGBA8 pixels plus the max color
//!   value it declares when written out.
//! * The [`ppm`] module converts between buffers and `P3` text.
//! * The [`paint`] module has the brush and the bucket fill.
//! * The [`view`] module maps screen positions to image pixels for zoom and
//!   pan.
//! * The [`session`] module ties those together into the state of an editor,
//!   for a UI shell to drive.
//!
//! ```
//! use prism::*;
//!
//! let mut image = PixelBuffer::create(4, 4, 255).unwrap();
//! let teal = Rgba { r: 10, g: 20, b: 30, a: 255 };
//! assert_eq!(flood_fill(&mut image, 0, 0, teal), 16);
//! let text = ppm_serialize(&image);
//! assert!(text.starts_with("P3\n4 4\n255\n10 20 30\n"));
//! assert_eq!(ppm_deserialize(&text).unwrap(), image);
//! ```
//!
//! The crate logs through the [`log`] facade but never sets up a logger.

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod error;
pub use error::*;

pub mod pixel_buffer;
pub use pixel_buffer::*;

pub mod ppm;
pub use ppm::*;

pub mod paint;
pub use paint::*;

pub mod view;
pub use view::*;

pub mod session;
pub use session::*;

/// The in-memory pixel type: 8 bits per channel, `r g b a` order.
pub type Rgba = pixel_formats::r8g8b8a8_Srgb;

/// Opaque white, the color of a new image.
pub const WHITE: Rgba = Rgba { r: 255, g: 255, b: 255, a: 255 };

/// Opaque black, the default brush color.
pub const BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 255 };
