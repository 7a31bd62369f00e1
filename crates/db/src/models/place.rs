//! Place entity model and DTOs.

use places_core::coordinate::Coordinate;
use places_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::place_photo::PlacePhoto;

/// A place row from the `places` table, with its photos attached.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    /// Not a column; filled by the repository after the row is read.
    #[sqlx(skip)]
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// DTO for creating a new place.
///
/// Accepts a full `Place` payload; `id` and `photos` are ignored, missing
/// fields default to zero / empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePlace {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}
