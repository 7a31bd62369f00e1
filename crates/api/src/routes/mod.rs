pub mod health;
pub mod place;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /places                                   list, create
/// /places/                                  create
/// /places/{id}                              get
/// /places/{id}/photos                      upload photo (multipart)
/// /places/search/{query}                    search by name substring
/// /places/search/location/{coordinate}      search around "lat,lon"
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(place::router())
}
