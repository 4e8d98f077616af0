//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
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

/// Assert response is a BMP image
pub fn assert_bmp(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_bmp(),
        "Expected BMP image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..2.min(response.body.len())]
    );
}

/// Assert JSON error response carries the expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert a `{filename}` response names the expected image ("" for none)
pub fn assert_filename(response: &TestResponse, expected: &str) {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["filename"], expected);
}

/// Assert a stored image id has the generated shape
pub fn assert_image_id(id: &str) {
    assert_eq!(id.len(), 36, "Unexpected id length: {id}");
    assert!(id.ends_with(".bmp"), "Id should end with .bmp: {id}");
    assert!(
        id[..32]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
        "Id should be lowercase hex: {id}"
    );
}
