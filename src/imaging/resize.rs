use scribble_colorize::{ColorizeError, Image};

/// Nearest-neighbor resample to `width` x `height`.
///
/// Used to fit a scribble drawn at another resolution onto the reference
/// grid. No colors are blended, so white stays exactly white and a stroke
/// keeps its exact color.
pub fn resize_nearest(image: &Image, width: usize, height: usize) -> Result<Image, ColorizeError> {
    let (src_w, src_h) = image.dimensions();
    if (src_w, src_h) == (width, height) {
        return Ok(image.clone());
    }

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let sy = (y * src_h) / height.max(1);
        for x in 0..width {
            let sx = (x * src_w) / width.max(1);
            pixels.push(image.get(sx, sy));
        }
    }
    Image::new(width, height, pixels)
}
