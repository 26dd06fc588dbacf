use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::ColorizeRequest;
use crate::error::ApiError;
use crate::services::ColorizeService;

/// Which pixels a scribble pins, without solving
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaskResponse {
    pub width: usize,
    pub height: usize,
    /// Pixels the scribble marks as constraints
    pub marked_pixels: usize,
    pub total_pixels: usize,
}

/// Inspect the scribble mask
///
/// Classifies every pixel as marked or free exactly as `/api/colorize`
/// would, then stops. Useful to check a scribble layer before paying for a
/// solve: zero marked pixels means the result will be plain grayscale.
#[utoipa::path(
    post,
    path = "/api/mask",
    request_body = ColorizeRequest,
    responses(
        (status = 200, description = "Mask summary", body = MaskResponse),
        (status = 400, description = "Invalid base64, PNG or options"),
        (status = 413, description = "Image exceeds the configured pixel limit"),
        (status = 422, description = "Reference and scribble sizes differ"),
    ),
    tag = "Colorize"
)]
pub async fn handle_mask(
    State(service): State<Arc<ColorizeService>>,
    Json(request): Json<ColorizeRequest>,
) -> Result<Json<MaskResponse>, ApiError> {
    let (reference, scribble) = request.decode()?;
    let mask = service
        .inspect_mask(reference, scribble, request.options)
        .await?;

    tracing::debug!(marked = mask.marked_count(), total = mask.len(), "Mask inspected");

    Ok(Json(MaskResponse {
        width: mask.width(),
        height: mask.height(),
        marked_pixels: mask.marked_count(),
        total_pixels: mask.len(),
    }))
}
