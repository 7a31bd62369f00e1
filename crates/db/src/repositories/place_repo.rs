//! Repository for the `places` table.
//!
//! Every read returns places with their photos loaded.

use places_core::coordinate::BoundingBox;
use places_core::types::DbId;

use crate::models::place::{CreatePlace, Place};
use crate::repositories::PlacePhotoRepo;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, latitude, longitude, name";

/// Create, read and search operations for places.
pub struct PlaceRepo;

impl PlaceRepo {
    /// Insert a new place, returning the created row with no photos.
    pub async fn create(pool: &DbPool, input: &CreatePlace) -> Result<Place, sqlx::Error> {
        let query = format!(
            "INSERT INTO places (latitude, longitude, name)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a place by id, with its photos.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places WHERE id = ?");
        let place = sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match place {
            Some(mut place) => {
                place.photos = PlacePhotoRepo::list_by_place(pool, place.id).await?;
                Ok(Some(place))
            }
            None => Ok(None),
        }
    }

    /// List all places ordered by id.
    pub async fn list(pool: &DbPool) -> Result<Vec<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places ORDER BY id");
        let mut places = sqlx::query_as::<_, Place>(&query).fetch_all(pool).await?;
        PlacePhotoRepo::attach_to(pool, &mut places).await?;
        Ok(places)
    }

    /// Places whose name contains `query`. Case-sensitive (`instr` compares
    /// bytes, unlike SQLite's `LIKE`).
    pub async fn search_by_name(pool: &DbPool, query: &str) -> Result<Vec<Place>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM places WHERE instr(name, ?) > 0 ORDER BY id");
        let mut places = sqlx::query_as::<_, Place>(&sql)
            .bind(query)
            .fetch_all(pool)
            .await?;
        PlacePhotoRepo::attach_to(pool, &mut places).await?;
        Ok(places)
    }

    /// Places inside `bounds`, edges included.
    pub async fn search_within_bounds(
        pool: &DbPool,
        bounds: &BoundingBox,
    ) -> Result<Vec<Place>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM places
             WHERE latitude BETWEEN ? AND ?
               AND longitude BETWEEN ? AND ?
             ORDER BY id"
        );
        let mut places = sqlx::query_as::<_, Place>(&sql)
            .bind(bounds.min_latitude)
            .bind(bounds.max_latitude)
            .bind(bounds.min_longitude)
            .bind(bounds.max_longitude)
            .fetch_all(pool)
            .await?;
        PlacePhotoRepo::attach_to(pool, &mut places).await?;
        Ok(places)
    }
}
