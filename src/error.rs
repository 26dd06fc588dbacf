use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scribble_colorize::ColorizeError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Image error: {0}")]
    Image(ImageError),

    #[error("Image too large: {pixels} pixels (max {max})")]
    TooLarge { pixels: usize, max: usize },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ColorizeError> for ApiError {
    fn from(e: ColorizeError) -> Self {
        match e {
            ColorizeError::DimensionMismatch { .. } => ApiError::DimensionMismatch(e.to_string()),
            ColorizeError::EmptyImage
            | ColorizeError::PixelCount { .. }
            | ColorizeError::InvalidOptions(_) => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl From<ImageError> for ApiError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::TooLarge { pixels, max } => ApiError::TooLarge { pixels, max },
            other => ApiError::Image(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG format: {0}")]
    UnsupportedFormat(String),

    #[error("PNG declares {pixels} pixels (max {max})")]
    TooLarge { pixels: usize, max: usize },

    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Image(ImageError::PngEncode(_) | ImageError::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Image(_) => StatusCode::BAD_REQUEST,
            ApiError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::DimensionMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
