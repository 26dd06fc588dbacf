use crate::error::{ApiError, ImageError};
use crate::imaging::{decode_png_limited, encode_png, resize_nearest};
use crate::models::{AppConfig, ColorizeOverrides};
use scribble_colorize::{
    constraint::extract_constraints, ColorizeOptions, ColorizeReport, Colorizer, Image, MarkMask,
};
use std::sync::Arc;

/// Result of one colorization, ready to hand back to a client
#[derive(Debug, Clone)]
pub struct ColorizeOutcome {
    /// Encoded 8-bit RGB PNG
    pub png: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub report: ColorizeReport,
    pub mask: MarkMask,
}

/// Runs the colorization pipeline on encoded PNG inputs
///
/// Holds the loaded configuration, which supplies the default options and
/// the input limits. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ColorizeService {
    config: Arc<AppConfig>,
}

impl ColorizeService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Configured options with per-request overrides applied, validated.
    pub fn options_with(&self, overrides: &ColorizeOverrides) -> Result<ColorizeOptions, ApiError> {
        let mut options = self.config.colorize_options();
        overrides.apply(&mut options);
        options.validate()?;
        Ok(options)
    }

    /// Colorize on the blocking pool.
    ///
    /// Decoding, the solve and encoding are all CPU-bound, so the whole job
    /// runs inside `spawn_blocking` to keep the async runtime responsive.
    pub async fn colorize(
        &self,
        reference_png: Vec<u8>,
        scribble_png: Vec<u8>,
        overrides: ColorizeOverrides,
    ) -> Result<ColorizeOutcome, ApiError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || {
            service.colorize_blocking(&reference_png, &scribble_png, &overrides)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Colorize task failed: {e}")))?
    }

    /// Extract the mark mask on the blocking pool, without solving.
    pub async fn inspect_mask(
        &self,
        reference_png: Vec<u8>,
        scribble_png: Vec<u8>,
        overrides: ColorizeOverrides,
    ) -> Result<MarkMask, ApiError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || {
            service.inspect_mask_blocking(&reference_png, &scribble_png, &overrides)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Mask task failed: {e}")))?
    }

    pub fn colorize_blocking(
        &self,
        reference_png: &[u8],
        scribble_png: &[u8],
        overrides: &ColorizeOverrides,
    ) -> Result<ColorizeOutcome, ApiError> {
        let options = self.options_with(overrides)?;
        let (reference, scribble) = self.prepare(reference_png, scribble_png)?;

        let result = Colorizer::from_options(options).colorize(&reference, &scribble)?;
        let png = encode_png(result.image())?;

        Ok(ColorizeOutcome {
            png,
            width: result.width(),
            height: result.height(),
            report: *result.report(),
            mask: result.mask().clone(),
        })
    }

    pub fn inspect_mask_blocking(
        &self,
        reference_png: &[u8],
        scribble_png: &[u8],
        overrides: &ColorizeOverrides,
    ) -> Result<MarkMask, ApiError> {
        let options = self.options_with(overrides)?;
        let (reference, scribble) = self.prepare(reference_png, scribble_png)?;

        let constraints = extract_constraints(&reference, &scribble, &options.constraint)?;
        Ok(constraints.mask)
    }

    /// Decode both inputs under the pixel limit and fit the scribble.
    fn prepare(&self, reference_png: &[u8], scribble_png: &[u8]) -> Result<(Image, Image), ApiError> {
        let max = self.config.server.max_pixels;
        let reference = decode_png_limited(reference_png, max)?;
        let scribble = decode_png_limited(scribble_png, max)?;

        let (w, h) = reference.dimensions();
        if scribble.dimensions() == (w, h) || !self.config.input.fit_scribble {
            return Ok((reference, scribble));
        }

        tracing::debug!(
            from = ?scribble.dimensions(),
            to = ?(w, h),
            "Fitting scribble to reference"
        );
        let scribble = resize_nearest(&scribble, w, h)?;
        Ok((reference, scribble))
    }
}

/// Decode a base64 upload, tolerating a `data:image/png;base64,` prefix.
pub fn decode_base64_png(data: &str) -> Result<Vec<u8>, ApiError> {
    use base64::Engine;

    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ApiError::Image(ImageError::Base64(e)))
}
