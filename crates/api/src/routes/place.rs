//! Route definitions for places and their photos.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{place, place_photo};
use crate::state::AppState;

/// Place routes.
///
/// ```text
/// GET    /places                                -> list_places
/// POST   /places                                -> create_place
/// POST   /places/                               -> create_place
/// GET    /places/{id}                           -> get_place
/// POST   /places/{id}/photos                    -> upload_photo
/// GET    /places/search/{query}                 -> search_by_name
/// GET    /places/search/location/{coordinate}   -> search_by_location
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/places", get(place::list_places).post(place::create_place))
        .route("/places/", post(place::create_place))
        .route("/places/{id}", get(place::get_place))
        .route("/places/{id}/photos", post(place_photo::upload_photo))
        .route("/places/search/{query}", get(place::search_by_name))
        .route(
            "/places/search/location/{coordinate}",
            get(place::search_by_location),
        )
}
