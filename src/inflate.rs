use miniz_oxide::inflate::{
  core::{
    decompress,
    inflate_flags::{
      TINFL_FLAG_IGNORE_ADLER32, TINFL_FLAG_PARSE_ZLIB_HEADER,
      TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF,
    },
    DecompressorOxide,
  },
  TINFLStatus,
};

use crate::{PngError, PngResult};

/// Decompresses a whole zlib stream into `out` in one blocking call.
///
/// The caller sizes `out` up front (for scanline data that's `height *
/// (bytes_per_scanline + 1)`, one leading filter byte per row). On success
/// you get the number of bytes actually produced. A truncated or corrupt
/// stream, or a destination too small for it, fails the call; no partial
/// result is exposed either way.
///
/// The stream's adler32 checksum is not checked, matching the rest of the
/// decoder's trust-the-payload policy.
pub fn decompress_zlib_to(out: &mut [u8], zlib_data: &[u8]) -> PngResult<usize> {
  let r = &mut DecompressorOxide::new();
  let flags = TINFL_FLAG_PARSE_ZLIB_HEADER
    | TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF
    | TINFL_FLAG_IGNORE_ADLER32;
  let (status, _bytes_read, bytes_written) = decompress(r, zlib_data, out, 0, flags);
  match status {
    TINFLStatus::Done | TINFLStatus::Adler32Mismatch => Ok(bytes_written),
    TINFLStatus::HasMoreOutput => Err(PngError::IdatOutputOverflow),
    _ => Err(PngError::IdatDecompressionFailed),
  }
}
