#![no_std]
#![forbid(unsafe_code)]

//! A crate for decoding PNG files into GPU-ready pixel data.
//!
//! The decoder scans the chunk stream into a parse state, inflates the
//! accumulated image data in one shot, reverses the per-scanline filters,
//! and hands back an [`Image`]: a flat, row-major, channel-interleaved byte
//! buffer plus dimensions and channel count. Rows are stored bottom-up
//! because that's the orientation the engine's texture upload path expects.
//!
//! ```no_run
//! let bytes: &[u8] = unimplemented!("data from somewhere");
//! let image = pngtex::decode_png_to_image(bytes).unwrap();
//! assert_eq!(image.data.len(), (image.width * image.height * image.channels) as usize);
//! ```
//!
//! ## Known gaps
//!
//! These are documented behavior, not accidents:
//!
//! * Interlaced (Adam7) images are not supported.
//! * Samples are assumed to be 8 bits deep.
//! * Indexed-color images parse (including their palette), but the pixels
//!   are not expanded; their output stays zeroed.
//! * Chunk CRCs are read and exposed, never verified.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

mod raw_chunk;
pub use raw_chunk::*;

#[cfg(feature = "alloc")]
mod parse;
#[cfg(feature = "alloc")]
pub use parse::*;

mod inflate;
pub use inflate::*;

mod unfilter;
pub use unfilter::*;

#[cfg(feature = "alloc")]
mod image;
#[cfg(feature = "alloc")]
pub use image::*;

/// Decodes a PNG datastream into an [`Image`].
///
/// The input must be the complete file bytes, signature first. On success
/// the caller owns the returned image; on failure nothing partial escapes,
/// every intermediate buffer is released.
///
/// An image whose pixel buffer would be zero-sized (a dimension is zero, or
/// the header's color-type code was unrecognized) decodes to an [`Image`]
/// with an empty `data` and no decompression is attempted.
#[cfg(feature = "alloc")]
pub fn decode_png_to_image(png: &[u8]) -> PngResult<Image> {
  use alloc::{vec, vec::Vec};

  let state = parse_png_bytes(png)?;
  let width = state.width as usize;
  let height = state.height as usize;
  let channels = state.channels as usize;

  let image_size = width
    .checked_mul(height)
    .and_then(|n| n.checked_mul(channels))
    .ok_or(PngError::OutputOverflow)?;
  let mut image =
    Image { width: state.width, height: state.height, channels: state.channels, data: Vec::new() };
  if image_size == 0 {
    return Ok(image);
  }
  let color_type = match state.color_type {
    Some(color_type) => color_type,
    None => return Ok(image),
  };

  let line_len = width
    .checked_mul(color_type.filter_bpp())
    .and_then(|n| n.checked_add(1))
    .ok_or(PngError::OutputOverflow)?;
  let inflated_size = line_len.checked_mul(height).ok_or(PngError::OutputOverflow)?;
  let mut inflated = vec![0_u8; inflated_size];
  let produced = decompress_zlib_to(&mut inflated, &state.zlib_data)?;
  log::debug!(
    "decoding {}x{} ({channels} channels, {:?}): inflated {produced} scanline bytes",
    state.width,
    state.height,
    color_type
  );

  image.data = vec![0_u8; image_size];
  unfilter::reconstruct_scanlines(&state, &inflated, &mut image.data);
  Ok(image)
}

/// Reads a file from disk and decodes it with [`decode_png_to_image`].
#[cfg(feature = "std")]
pub fn decode_png_file<P: AsRef<std::path::Path>>(path: P) -> PngResult<Image> {
  let bytes = std::fs::read(path).map_err(|_| PngError::FileRead)?;
  decode_png_to_image(&bytes)
}
