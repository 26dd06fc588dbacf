//! Test fixtures: small PNG images and request bodies.

use base64::Engine;
use huebrush::imaging::{decode_png, encode_png};
use scribble_colorize::{Image, Rgb};
use serde_json::json;

pub const RED: Rgb = Rgb {
    r: 1.0,
    g: 0.0,
    b: 0.0,
};

/// Uniform gray image as PNG bytes
pub fn gray_png(width: usize, height: usize) -> Vec<u8> {
    let image = Image::filled(width, height, Rgb::from_u8(128, 128, 128)).unwrap();
    encode_png(&image).unwrap()
}

/// Left half dark, right half light
pub fn split_png(width: usize, height: usize) -> Vec<u8> {
    let pixels = (0..width * height)
        .map(|i| {
            if i % width < width / 2 {
                Rgb::from_u8(50, 50, 50)
            } else {
                Rgb::from_u8(205, 205, 205)
            }
        })
        .collect();
    encode_png(&Image::new(width, height, pixels).unwrap()).unwrap()
}

/// All-white scribble with the given strokes
pub fn scribble_png(width: usize, height: usize, strokes: &[(usize, usize, Rgb)]) -> Vec<u8> {
    let mut image = Image::filled(width, height, Rgb::WHITE).unwrap();
    for &(x, y, color) in strokes {
        image.set(x, y, color);
    }
    encode_png(&image).unwrap()
}

pub fn to_base64(png: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(png)
}

/// JSON body for `/api/colorize` and `/api/mask`
pub fn request_body(reference: &[u8], scribble: &[u8]) -> serde_json::Value {
    json!({
        "reference": to_base64(reference),
        "scribble": to_base64(scribble),
    })
}

/// Same as [`request_body`] with an `options` object
pub fn request_body_with_options(
    reference: &[u8],
    scribble: &[u8],
    options: serde_json::Value,
) -> serde_json::Value {
    json!({
        "reference": to_base64(reference),
        "scribble": to_base64(scribble),
        "options": options,
    })
}

/// Decode a PNG response body
pub fn decode(png: &[u8]) -> Image {
    decode_png(png).expect("Response should be a decodable PNG")
}

/// PNG with a valid header for `width x height` but no real image data
pub fn declared_only_png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_chunk(png::chunk::IDAT, &[0; 8]).unwrap();
    }
    buf
}

/// Left half blue, right half orange
pub fn two_color_png(width: usize, height: usize) -> Vec<u8> {
    let pixels = (0..width * height)
        .map(|i| {
            if i % width < width / 2 {
                Rgb::from_u8(40, 60, 200)
            } else {
                Rgb::from_u8(230, 140, 30)
            }
        })
        .collect();
    encode_png(&Image::new(width, height, pixels).unwrap()).unwrap()
}
