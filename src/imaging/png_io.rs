//! PNG decoding and encoding between files/uploads and the core `Image`.

use crate::error::ImageError;
use scribble_colorize::{Image, MarkMask};
use std::io::Cursor;

/// Decode a PNG into an RGB image.
///
/// 16-bit samples are stripped to 8 bits and palette/low-bit images are
/// expanded, so every frame arrives as 8-bit gray, gray+alpha, RGB or RGBA.
/// Alpha is composited over white, which makes transparent regions of a
/// scribble layer read as untouched.
pub fn decode_png(bytes: &[u8]) -> Result<Image, ImageError> {
    decode_png_limited(bytes, usize::MAX)
}

/// Like [`decode_png`], but rejects images with more than `max_pixels`
/// pixels using the dimensions from the PNG header, before any frame
/// buffer is allocated.
pub fn decode_png_limited(bytes: &[u8], max_pixels: usize) -> Result<Image, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::PngDecode(e.to_string()))?;

    let header = reader.info();
    let pixels = (header.width as usize).saturating_mul(header.height as usize);
    if pixels > max_pixels {
        return Err(ImageError::TooLarge {
            pixels,
            max: max_pixels,
        });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::UnsupportedFormat(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let rgb: Vec<u8> = match info.color_type {
        png::ColorType::Rgb => data.to_vec(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .flat_map(|p| {
                let a = p[3];
                [over_white(p[0], a), over_white(p[1], a), over_white(p[2], a)]
            })
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| {
                let v = over_white(p[0], p[1]);
                [v, v, v]
            })
            .collect(),
        png::ColorType::Indexed => {
            return Err(ImageError::UnsupportedFormat(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    Image::from_rgb8(info.width as usize, info.height as usize, &rgb)
        .map_err(|e| ImageError::PngDecode(e.to_string()))
}

/// Composite one channel over a white background.
#[inline]
fn over_white(c: u8, a: u8) -> u8 {
    let (c, a) = (c as u32, a as u32);
    ((c * a + 255 * (255 - a)) / 255) as u8
}

/// Encode an image as 8-bit RGB PNG.
pub fn encode_png(image: &Image) -> Result<Vec<u8>, ImageError> {
    encode_raw(
        &image.to_rgb8(),
        image.width(),
        image.height(),
        png::ColorType::Rgb,
    )
}

/// Encode a mark mask as 8-bit grayscale PNG, marked pixels white.
pub fn encode_mask_png(mask: &MarkMask) -> Result<Vec<u8>, ImageError> {
    let data: Vec<u8> = mask
        .as_slice()
        .iter()
        .map(|&marked| if marked { 255 } else { 0 })
        .collect();
    encode_raw(&data, mask.width(), mask.height(), png::ColorType::Grayscale)
}

fn encode_raw(
    data: &[u8],
    width: usize,
    height: usize,
    color: png::ColorType,
) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width as u32, height as u32);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| ImageError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
