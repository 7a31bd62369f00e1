//! Handler for uploading a photo of a place.
//!
//! The object store write happens first and the database is only touched if
//! it succeeds. A database failure after a successful upload leaves the
//! object orphaned in storage.

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use places_core::object_name::{generated_object_name, sanitize_object_name};
use places_core::types::DbId;
use places_db::models::place_photo::CreatePlacePhoto;
use places_db::repositories::{PlacePhotoRepo, PlaceRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::created;
use crate::state::AppState;

/// Name of the multipart field carrying the photo.
pub const FILE_FIELD: &str = "file";

/// The photo read from the multipart body.
struct UploadedFile {
    file_name: String,
    data: Bytes,
}

/// POST /places/{id}/photos
///
/// Accepts a multipart form with a single `file` field. Responds 201 with the
/// place and all its photos. The place is not checked beforehand: for an
/// unknown id the photo is still stored and the body is `null`.
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(place_id): Path<DbId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    let mut multipart = multipart
        .map_err(|e| AppError::BadRequest(format!("Expected a multipart form: {e}")))?;

    let upload = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{FILE_FIELD}' field")))?;

    let object_name = sanitize_object_name(&upload.file_name);
    let size_bytes = upload.data.len();

    let photo_upload_url = state
        .object_store
        .upload(&state.config.upload_container, &object_name, upload.data)
        .await?;

    let photo = PlacePhotoRepo::create(
        &state.pool,
        &CreatePlacePhoto {
            place_id,
            photo_upload_url,
        },
    )
    .await?;

    tracing::info!(
        place_id,
        photo_id = photo.id,
        object_name = %object_name,
        size_bytes,
        "Place photo uploaded",
    );

    let place = PlaceRepo::find_by_id(&state.pool, place_id).await?;
    if place.is_none() {
        tracing::warn!(place_id, photo_id = photo.id, "Photo recorded for unknown place");
    }

    Ok(created(format!("/places/{place_id}"), Json(place)))
}

/// Read fields until the `file` field is found. Other fields are skipped.
async fn read_file_field(multipart: &mut Multipart) -> AppResult<Option<UploadedFile>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(generated_object_name);
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(UploadedFile { file_name, data }));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
