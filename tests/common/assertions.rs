//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert an error response carries the expected status in its JSON body
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected.as_u16(),
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert the colorize diagnostics headers are present and return
/// `(quality, iterations, marked)`
pub fn assert_colorize_headers(response: &TestResponse) -> (String, usize, usize) {
    let quality = response
        .header("x-colorize-quality")
        .expect("Missing X-Colorize-Quality")
        .to_string();
    assert!(
        quality == "full" || quality == "degraded",
        "Unexpected quality {quality}"
    );
    let iterations = response
        .header("x-colorize-iterations")
        .expect("Missing X-Colorize-Iterations")
        .parse()
        .expect("Iterations should be a number");
    let marked = response
        .header("x-colorize-marked")
        .expect("Missing X-Colorize-Marked")
        .parse()
        .expect("Marked should be a number");
    (quality, iterations, marked)
}
