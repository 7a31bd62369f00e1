//! Handlers for place creation, lookup and search.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use places_core::coordinate::{BoundingBox, Coordinate, DEFAULT_SEARCH_RADIUS_DEGREES};
use places_core::error::CoreError;
use places_core::types::DbId;
use places_db::models::place::{CreatePlace, Place};
use places_db::repositories::PlaceRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::created;
use crate::state::AppState;

/// Query parameters for the location search.
#[derive(Debug, Deserialize)]
pub struct LocationSearchParams {
    /// Half-side of the search box in degrees.
    pub radius: Option<f64>,
}

/// GET /places
pub async fn list_places(State(state): State<AppState>) -> AppResult<Json<Vec<Place>>> {
    let places = PlaceRepo::list(&state.pool).await?;
    Ok(Json(places))
}

/// POST /places/
///
/// Any `id` or `photos` in the payload are ignored.
pub async fn create_place(
    State(state): State<AppState>,
    Json(input): Json<CreatePlace>,
) -> AppResult<impl IntoResponse> {
    let place = PlaceRepo::create(&state.pool, &input).await?;

    tracing::info!(place_id = place.id, name = %place.name, "Place created");

    Ok(created(format!("/places/{}", place.id), Json(place)))
}

/// GET /places/{id}
pub async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Place>> {
    let place = PlaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Place",
            id,
        }))?;
    Ok(Json(place))
}

/// GET /places/search/{query}
///
/// No match is an empty list with 200, not a 404.
pub async fn search_by_name(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<Vec<Place>>> {
    let places = PlaceRepo::search_by_name(&state.pool, &query).await?;

    tracing::debug!(query = %query, results = places.len(), "Name search executed");

    Ok(Json(places))
}

/// GET /places/search/location/{coordinate}?radius=
///
/// `coordinate` is `"<lat>,<lon>"`, the centre of an inclusive square box.
pub async fn search_by_location(
    State(state): State<AppState>,
    Path(coordinate): Path<String>,
    Query(params): Query<LocationSearchParams>,
) -> AppResult<Json<Vec<Place>>> {
    let center: Coordinate = coordinate
        .parse()
        .map_err(|e| AppError::BadRequest(format!("Invalid coordinate: {e}")))?;
    let radius = params.radius.unwrap_or(DEFAULT_SEARCH_RADIUS_DEGREES);
    let bounds = BoundingBox::around(center, radius)?;

    let places = PlaceRepo::search_within_bounds(&state.pool, &bounds).await?;

    tracing::debug!(%center, radius, results = places.len(), "Location search executed");

    Ok(Json(places))
}
