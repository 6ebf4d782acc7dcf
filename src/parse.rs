use alloc::vec::Vec;

use crate::{PngError, PngRawChunk, PngRawChunkIter, PngRawChunkType, PngResult, PNG_SIGNATURE};

/// The color layouts a PNG header can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngColorType {
  Grayscale,
  GrayscaleAlpha,
  Truecolor,
  TruecolorAlpha,
  /// Palette-indexed pixels. Parsed, but this decoder never expands them.
  Indexed,
}
impl PngColorType {
  /// The byte distance between a sample and its left neighbor during
  /// defiltering.
  ///
  /// For the grayscale layouts this is smaller than the output channel
  /// count, because expansion to RGB happens after the filters are undone.
  #[inline]
  #[must_use]
  pub const fn filter_bpp(self) -> usize {
    match self {
      Self::Grayscale | Self::Indexed => 1,
      Self::GrayscaleAlpha => 2,
      Self::Truecolor => 3,
      Self::TruecolorAlpha => 4,
    }
  }
}

/// The color space the image's samples live in.
///
/// Standard RGB is both the default and the only tag an optional color-space
/// chunk can currently set, so for now this records that the chunk was seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PngColorSpace {
  #[default]
  Srgb,
}

/// Everything gathered while scanning a PNG's chunks.
///
/// One of these is built up fresh per decode call: the dispatcher mutates
/// it, the scanline reconstruction consumes it, and it drops with the call.
#[derive(Debug, Clone, Default)]
pub struct PngParseState {
  pub width: u32,
  pub height: u32,
  /// Output channel count, 3 or 4. Stays 0 until a header chunk with a
  /// known color-type code has been dispatched.
  pub channels: u32,
  pub bit_depth: u8,
  pub color_type: Option<PngColorType>,
  pub color_space: PngColorSpace,
  /// Raw palette bytes, always a multiple of 3.
  pub palette: Vec<u8>,
  /// The zlib stream, concatenated across all image-data chunks in file
  /// order.
  pub zlib_data: Vec<u8>,
  /// Set by the image trailer chunk, ends the scan.
  pub done: bool,
}
impl PngParseState {
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// The palette as RGB triples.
  #[inline]
  #[must_use]
  pub fn palette_entries(&self) -> &[[u8; 3]] {
    bytemuck::try_cast_slice(&self.palette).unwrap_or(&[])
  }

  /// Dispatches one chunk to its handler.
  ///
  /// Chunk types this decoder doesn't know are successfully ignored, which
  /// is what makes ancillary chunks harmless. Ordering between chunks is
  /// not enforced.
  pub fn feed(&mut self, chunk: PngRawChunk<'_>) -> PngResult<()> {
    match chunk.type_() {
      PngRawChunkType::IHDR => self.handle_header(chunk.data()),
      PngRawChunkType::PLTE => self.handle_palette(chunk.data()),
      PngRawChunkType::IDAT => {
        self.zlib_data.extend_from_slice(chunk.data());
        Ok(())
      }
      PngRawChunkType::sRGB => {
        self.color_space = PngColorSpace::Srgb;
        Ok(())
      }
      PngRawChunkType::IEND => {
        self.done = true;
        Ok(())
      }
      _ => Ok(()),
    }
  }

  fn handle_header(&mut self, data: &[u8]) -> PngResult<()> {
    if data.len() < 13 {
      return Err(PngError::UnexpectedEndOfInput);
    }
    self.width = u32::from_be_bytes(data[0..4].try_into().unwrap());
    self.height = u32::from_be_bytes(data[4..8].try_into().unwrap());
    self.bit_depth = data[8];
    // An unknown color-type code leaves `channels` at 0, which later makes
    // the decode come out as an empty image rather than an error.
    match data[9] {
      0 => {
        self.channels = 3;
        self.color_type = Some(PngColorType::Grayscale);
      }
      2 => {
        self.channels = 3;
        self.color_type = Some(PngColorType::Truecolor);
      }
      3 => {
        self.channels = 3;
        self.color_type = Some(PngColorType::Indexed);
      }
      4 => {
        self.channels = 4;
        self.color_type = Some(PngColorType::GrayscaleAlpha);
      }
      6 => {
        self.channels = 4;
        self.color_type = Some(PngColorType::TruecolorAlpha);
      }
      _ => (),
    }

    let compression = data[10];
    if compression != 0 {
      log::warn!("PNG file has unsupported compression method {compression}");
      return Err(PngError::UnsupportedHeaderField);
    }

    let filter = data[11];
    if filter != 0 {
      log::warn!("PNG file has unsupported filter method {filter}");
      return Err(PngError::UnsupportedHeaderField);
    }

    let interlace = data[12];
    if interlace != 0 {
      log::warn!("PNG file has unsupported interlace method {interlace}");
      return Err(PngError::UnsupportedHeaderField);
    }

    Ok(())
  }

  fn handle_palette(&mut self, data: &[u8]) -> PngResult<()> {
    if data.len() % 3 != 0 {
      return Err(PngError::MalformedPalette);
    }
    self.palette.extend_from_slice(data);
    Ok(())
  }
}

/// Scans a PNG's chunks into a fresh [`PngParseState`].
///
/// The input must begin with the PNG signature. Scanning stops at the image
/// trailer chunk, so bytes trailing after it are never looked at. Running
/// out of chunks before the trailer is an error.
pub fn parse_png_bytes(png: &[u8]) -> PngResult<PngParseState> {
  if png.len() < 8 || &png[..8] != PNG_SIGNATURE {
    return Err(PngError::BytesAreNotPng);
  }
  let mut state = PngParseState::new();
  for chunk in PngRawChunkIter::new(png) {
    state.feed(chunk)?;
    if state.done {
      return Ok(state);
    }
  }
  Err(PngError::UnexpectedEndOfInput)
}
