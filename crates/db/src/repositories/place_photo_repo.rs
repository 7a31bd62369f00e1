//! Repository for the `place_photos` table.

use std::collections::HashMap;

use places_core::types::DbId;
use sqlx::{QueryBuilder, Sqlite};

use crate::models::place::Place;
use crate::models::place_photo::{CreatePlacePhoto, PlacePhoto};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, place_id, photo_upload_url";

/// Place ids bound per `IN (...)` query, well under SQLite's variable limit.
const IN_CHUNK_SIZE: usize = 500;

/// Create and read operations for place photos.
pub struct PlacePhotoRepo;

impl PlacePhotoRepo {
    /// Insert a new photo row, returning the created row.
    ///
    /// The place id is not checked against `places`.
    pub async fn create(
        pool: &DbPool,
        input: &CreatePlacePhoto,
    ) -> Result<PlacePhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO place_photos (place_id, photo_upload_url)
             VALUES (?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlacePhoto>(&query)
            .bind(input.place_id)
            .bind(&input.photo_upload_url)
            .fetch_one(pool)
            .await
    }

    /// List the photos of one place, oldest first.
    pub async fn list_by_place(
        pool: &DbPool,
        place_id: DbId,
    ) -> Result<Vec<PlacePhoto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM place_photos WHERE place_id = ? ORDER BY id");
        sqlx::query_as::<_, PlacePhoto>(&query)
            .bind(place_id)
            .fetch_all(pool)
            .await
    }

    /// List the photos of many places at once, oldest first.
    pub async fn list_by_places(
        pool: &DbPool,
        place_ids: &[DbId],
    ) -> Result<Vec<PlacePhoto>, sqlx::Error> {
        let mut photos = Vec::new();

        for chunk in place_ids.chunks(IN_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                "SELECT {COLUMNS} FROM place_photos WHERE place_id IN ("
            ));
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(") ORDER BY id");

            photos.extend(
                builder
                    .build_query_as::<PlacePhoto>()
                    .fetch_all(pool)
                    .await?,
            );
        }

        photos.sort_by_key(|p| p.id);
        Ok(photos)
    }

    /// Fill `photos` on every place in `places` with a batched lookup.
    pub async fn attach_to(pool: &DbPool, places: &mut [Place]) -> Result<(), sqlx::Error> {
        if places.is_empty() {
            return Ok(());
        }

        let ids: Vec<DbId> = places.iter().map(|p| p.id).collect();
        let mut by_place: HashMap<DbId, Vec<PlacePhoto>> = HashMap::new();
        for photo in Self::list_by_places(pool, &ids).await? {
            by_place.entry(photo.place_id).or_default().push(photo);
        }

        for place in places.iter_mut() {
            place.photos = by_place.remove(&place.id).unwrap_or_default();
        }
        Ok(())
    }
}
