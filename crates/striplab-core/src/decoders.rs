//! Image decoders
//!
//! Support for PNG and JPEG file formats, decoding to the in-memory 8-bit
//! RGB grid the engine consumes. Decoding is the only I/O boundary on the
//! image side; the engine itself never touches a file.

use crate::models::RgbImage;
use std::path::Path;

/// Decode an image from a file path
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<RgbImage, String> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    match extension.as_str() {
        "png" => decode_png(path),
        "jpg" | "jpeg" => decode_jpeg(path),
        _ => Err(format!("Unsupported file format: {}", extension)),
    }
}

/// Decode a PNG file
fn decode_png<P: AsRef<Path>>(path: P) -> Result<RgbImage, String> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;

    let width = frame_info.width;
    let height = frame_info.height;
    let bytes = &buf[..frame_info.buffer_size()];

    if frame_info.bit_depth != png::BitDepth::Eight {
        return Err(format!(
            "Unsupported PNG bit depth: {:?} (only 8-bit images are supported)",
            frame_info.bit_depth
        ));
    }

    // Expand every supported layout to interleaved RGB
    let data = match frame_info.color_type {
        png::ColorType::Rgb => bytes.to_vec(),
        png::ColorType::Rgba => bytes
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
        png::ColorType::Grayscale => bytes.iter().flat_map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0]])
            .collect(),
        png::ColorType::Indexed => {
            return Err("Indexed PNG not supported".to_string());
        }
    };

    RgbImage::from_raw(width, height, data)
}

/// Decode a JPEG file
fn decode_jpeg<P: AsRef<Path>>(path: P) -> Result<RgbImage, String> {
    let decoded =
        image::open(path.as_ref()).map_err(|e| format!("Failed to decode JPEG file: {}", e))?;
    let rgb = decoded.to_rgb8();
    RgbImage::from_raw(rgb.width(), rgb.height(), rgb.into_raw())
}
