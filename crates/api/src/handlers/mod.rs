pub mod place;
pub mod place_photo;

use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// `201 Created` with a `Location` header and the given body.
pub fn created(location: String, body: impl IntoResponse) -> impl IntoResponse {
    (StatusCode::CREATED, [(header::LOCATION, location)], body)
}
