/// Things that can go wrong while decoding a PNG.
///
/// All of these are local to the decode call that hit them. There is no
/// recoverable out-of-memory variant: buffer allocation failure aborts, the
/// same as everywhere else in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PngError {
  /// The input doesn't begin with the PNG signature.
  BytesAreNotPng,

  /// The chunk stream was cut short before the image trailer chunk.
  UnexpectedEndOfInput,

  /// The header declares a compression, filter, or interlace method that
  /// this decoder doesn't handle.
  UnsupportedHeaderField,

  /// A palette chunk's payload length wasn't a multiple of 3.
  MalformedPalette,

  /// The accumulated image data wasn't a valid zlib stream.
  IdatDecompressionFailed,

  /// Decompression produced more bytes than the scanline buffer can hold.
  IdatOutputOverflow,

  /// Computing a buffer size overflowed `usize`.
  OutputOverflow,

  /// The file couldn't be read from disk.
  #[cfg(feature = "std")]
  FileRead,
}

pub type PngResult<T> = Result<T, PngError>;
