//! Place photo model and DTO.

use places_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `place_photos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePhoto {
    pub id: DbId,
    pub place_id: DbId,
    pub photo_upload_url: String,
}

/// DTO for recording an uploaded photo.
#[derive(Debug, Clone)]
pub struct CreatePlacePhoto {
    pub place_id: DbId,
    pub photo_upload_url: String,
}
