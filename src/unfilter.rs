//! Reverses the per-scanline filters and expands rows into the output
//! buffer.
//!
//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.

#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

#[cfg(feature = "alloc")]
use crate::parse::{PngColorType, PngParseState};

/// The Paeth predictor: whichever of `a`, `b`, `c` is closest to
/// `a + b - c`.
///
/// The order of the comparisons is load-bearing; ties go to `a`, then `b`,
/// then `c`.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Undoes one scanline's filter, writing the reconstructed bytes to `out`.
///
/// * `line` is the row as it came out of decompression: one filter-type
///   byte, then `out.len()` data bytes.
/// * `prev` is the *reconstructed* previous row, or `None` for the first
///   row (all upward references then read as zero).
/// * `bpp` is the filter distance in bytes, see
///   [`PngColorType::filter_bpp`](crate::PngColorType::filter_bpp).
///
/// All byte arithmetic wraps modulo 256. A filter byte outside 0..=4 is
/// treated as filter 0 and the row passes through unchanged.
pub fn unfilter_line(out: &mut [u8], line: &[u8], prev: Option<&[u8]>, bpp: usize) {
  debug_assert_eq!(line.len(), out.len() + 1);
  debug_assert!(prev.map_or(true, |p| p.len() == out.len()));
  debug_assert!(bpp > 0);
  let (filter, raw) = match line.split_first() {
    Some((filter, raw)) => (*filter, raw),
    None => return,
  };
  let len = out.len();
  match filter {
    1 => {
      // Sub: the first bpp bytes have no left neighbor.
      let lead = bpp.min(len);
      out[..lead].copy_from_slice(&raw[..lead]);
      for i in lead..len {
        out[i] = raw[i].wrapping_add(out[i - bpp]);
      }
    }
    2 => {
      // Up
      match prev {
        Some(prev) => {
          for (o, (x, b)) in out.iter_mut().zip(raw.iter().zip(prev.iter())) {
            *o = x.wrapping_add(*b);
          }
        }
        None => out.copy_from_slice(raw),
      }
    }
    3 => {
      // Average
      for i in 0..len {
        let a = if i >= bpp { out[i - bpp] as u32 } else { 0 };
        let b = prev.map_or(0, |p| p[i] as u32);
        out[i] = raw[i].wrapping_add(((a + b) / 2) as u8);
      }
    }
    4 => {
      // Paeth
      for i in 0..len {
        let a = if i >= bpp { out[i - bpp] } else { 0 };
        let b = prev.map_or(0, |p| p[i]);
        let c = match prev {
          Some(p) if i >= bpp => p[i - bpp],
          _ => 0,
        };
        out[i] = raw[i].wrapping_add(paeth_predict(a, b, c));
      }
    }
    _ => out.copy_from_slice(raw),
  }
}

/// Unfilters every row of `inflated` into `out`, expanding the color format
/// along the way.
///
/// Row `i` of the image lands in `out` row `height - 1 - i`, so the buffer
/// comes out bottom-up, which is what the texture upload path wants.
///
/// * Truecolor rows (with or without alpha) are reconstructed directly in
///   the output buffer and the next row's filter reads them from there.
/// * Grayscale rows are reconstructed into a scratch row first, then each
///   scratch byte is broadcast to R=G=B of its output pixel. The two
///   scratch rows swap roles every iteration so the filters can keep
///   referring to the previous reconstructed row without a copy.
/// * Indexed rows are left zeroed.
///
/// The caller guarantees `out.len() == width * height * channels` and
/// `inflated.len() == height * (width * bpp + 1)`.
#[cfg(feature = "alloc")]
pub(crate) fn reconstruct_scanlines(state: &PngParseState, inflated: &[u8], out: &mut [u8]) {
  let width = state.width as usize;
  let height = state.height as usize;
  let channels = state.channels as usize;
  let color_type = match state.color_type {
    Some(color_type) => color_type,
    None => return,
  };
  let bpp = color_type.filter_bpp();
  let stride = width * channels;
  let line_len = width * bpp + 1;

  // TODO: handle bit depths other than 8.

  let (mut scratch, mut prior_scratch) = match color_type {
    PngColorType::Grayscale | PngColorType::GrayscaleAlpha => {
      (vec![0_u8; width * bpp], vec![0_u8; width * bpp])
    }
    _ => (Vec::new(), Vec::new()),
  };
  let mut have_prior = false;

  let mut prev_row: Option<&[u8]> = None;
  for (i, out_row) in out.rchunks_exact_mut(stride).take(height).enumerate() {
    let line = &inflated[i * line_len..][..line_len];
    match color_type {
      PngColorType::Truecolor | PngColorType::TruecolorAlpha => {
        unfilter_line(out_row, line, prev_row, bpp);
        prev_row = Some(out_row);
      }
      PngColorType::Grayscale | PngColorType::GrayscaleAlpha => {
        unfilter_line(&mut scratch, line, have_prior.then_some(&prior_scratch[..]), bpp);
        for (pixel, sample) in out_row.chunks_exact_mut(channels).zip(scratch.iter()) {
          pixel[0] = *sample;
          pixel[1] = *sample;
          pixel[2] = *sample;
        }
        core::mem::swap(&mut scratch, &mut prior_scratch);
        have_prior = true;
      }
      PngColorType::Indexed => {
        // TODO: expand indexed pixels through the palette.
      }
    }
  }
}
