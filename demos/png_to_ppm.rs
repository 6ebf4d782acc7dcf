//! Decodes a PNG file and writes it back out as an ASCII PPM.

use std::io::BufWriter;

use pngtex::decode_png_file;

fn main() {
  env_logger::init();
  let mut args = std::env::args().skip(1);
  let (src, dst) = match (args.next(), args.next()) {
    (Some(src), Some(dst)) => (src, dst),
    _ => {
      println!("usage: png_to_ppm <input.png> <output.ppm>");
      return;
    }
  };
  let image = match decode_png_file(&src) {
    Ok(image) => image,
    Err(e) => {
      println!("{src}: {e:?}");
      return;
    }
  };
  println!("{src}: {}x{}, {} channels", image.width, image.height, image.channels);
  let file = std::fs::File::create(&dst).unwrap();
  image.write_ppm(&mut BufWriter::new(file)).unwrap();
}
