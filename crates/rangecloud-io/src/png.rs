use std::{fs, fs::File, path::Path};

use png::{BitDepth, ColorType, Decoder, Encoder};
use rangecloud_image::{ImageSize, RangeImage};

use crate::error::IoError;

/// Read a PNG range image with a single 16-bit channel (mono16).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A range image holding the raw 16-bit samples.
///
/// # Errors
///
/// Fails if the file is missing, is not a `.png`, or is not a 16-bit grayscale PNG.
pub fn read_image_png_mono16(file_path: impl AsRef<Path>) -> Result<RangeImage, IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    if !has_png_extension(file_path) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = fs::File::open(file_path)?;
    let mut reader = Decoder::new(file)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Sixteen {
        return Err(IoError::PngDecodeError(format!(
            "expected a 16-bit grayscale image, got {:?} {:?}",
            info.bit_depth, info.color_type
        )));
    }

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };
    buf.truncate(info.buffer_size());

    Ok(RangeImage::new(size, convert_buf_u8_u16(&buf))?)
}

/// Writes the given range image as a 16-bit grayscale PNG.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The range image to write.
pub fn write_image_png_mono16(
    file_path: impl AsRef<Path>,
    image: &RangeImage,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;
    let image_buf = convert_buf_u16_u8(image.as_slice());

    let mut encoder = Encoder::new(file, image.width() as u32, image.height() as u32);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Sixteen);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(&image_buf)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}

pub(crate) fn has_png_extension(file_path: &Path) -> bool {
    file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

// png stores 16-bit samples big endian
fn convert_buf_u8_u16(buf: &[u8]) -> Vec<u16> {
    buf.chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

fn convert_buf_u16_u8(buf: &[u16]) -> Vec<u8> {
    buf.iter().flat_map(|v| v.to_be_bytes()).collect()
}
