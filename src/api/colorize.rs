use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ColorizeOverrides;
use crate::services::{decode_base64_png, ColorizeService};

pub const QUALITY_HEADER: &str = "x-colorize-quality";
pub const ITERATIONS_HEADER: &str = "x-colorize-iterations";
pub const MARKED_HEADER: &str = "x-colorize-marked";

/// Reference and scribble images, shared by `/api/colorize` and `/api/mask`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ColorizeRequest {
    /// Base64 PNG of the image to colorize (a `data:` URL prefix is accepted)
    pub reference: String,
    /// Base64 PNG of the same image with color strokes; white means untouched
    pub scribble: String,
    /// Overrides of the configured pipeline parameters
    #[serde(default)]
    pub options: ColorizeOverrides,
}

impl ColorizeRequest {
    pub(crate) fn decode(&self) -> Result<(Vec<u8>, Vec<u8>), ApiError> {
        Ok((
            decode_base64_png(&self.reference)?,
            decode_base64_png(&self.scribble)?,
        ))
    }
}

/// Colorize an image from scribbles
///
/// Spreads the scribble colors over the reference, following its luminance
/// edges, and returns the result as an RGB PNG. Solver diagnostics are
/// reported in `X-Colorize-*` headers; a `degraded` quality means the solver
/// hit its iteration cap and the best approximation was returned.
#[utoipa::path(
    post,
    path = "/api/colorize",
    request_body = ColorizeRequest,
    responses(
        (status = 200, description = "Colorized PNG", content_type = "image/png",
            headers(
                ("X-Colorize-Quality" = String, description = "full or degraded"),
                ("X-Colorize-Iterations" = usize, description = "Solver iterations, larger of the two chroma channels"),
                ("X-Colorize-Marked" = usize, description = "Pixels pinned by the scribble"),
            )
        ),
        (status = 400, description = "Invalid base64, PNG or options"),
        (status = 413, description = "Image exceeds the configured pixel limit"),
        (status = 422, description = "Reference and scribble sizes differ"),
    ),
    tag = "Colorize"
)]
pub async fn handle_colorize(
    State(service): State<Arc<ColorizeService>>,
    Json(request): Json<ColorizeRequest>,
) -> Result<Response, ApiError> {
    let (reference, scribble) = request.decode()?;
    tracing::debug!(
        reference_bytes = reference.len(),
        scribble_bytes = scribble.len(),
        options = ?request.options,
        "Colorize request"
    );

    let outcome = service
        .colorize(reference, scribble, request.options)
        .await?;

    tracing::info!(
        width = outcome.width,
        height = outcome.height,
        marked = outcome.report.marked_pixels,
        iterations = outcome.report.iterations(),
        quality = %outcome.report.quality,
        "Colorize request served"
    );

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (header::CONTENT_LENGTH, outcome.png.len().to_string()),
        (
            HeaderName::from_static(QUALITY_HEADER),
            outcome.report.quality.as_str().to_string(),
        ),
        (
            HeaderName::from_static(ITERATIONS_HEADER),
            outcome.report.iterations().to_string(),
        ),
        (
            HeaderName::from_static(MARKED_HEADER),
            outcome.report.marked_pixels.to_string(),
        ),
    ];

    Ok((StatusCode::OK, headers, Bytes::from(outcome.png)).into_response())
}
