//! Prints the chunk table of a PNG file.

use pngtex::PngRawChunkIter;

fn main() {
  env_logger::init();
  let path = match std::env::args().nth(1) {
    Some(path) => path,
    None => {
      println!("run this with a filename to list that file's chunks.");
      return;
    }
  };
  let bytes = match std::fs::read(&path) {
    Ok(bytes) => bytes,
    Err(e) => {
      println!("{path}: {e}");
      return;
    }
  };
  for chunk in PngRawChunkIter::new(&bytes) {
    println!("{chunk:?}");
  }
}
