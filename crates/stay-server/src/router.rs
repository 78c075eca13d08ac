use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{amenities, cities, places, reviews, states, status, users};
use crate::state::AppState;

/// Build the axum router with every Stay endpoint.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/status", get(status::status))
        .route("/api/v1/stats", get(status::stats))
        .route("/api/v1/users", get(users::list).post(users::create))
        .route(
            "/api/v1/users/:id",
            get(users::fetch).put(users::update).delete(users::destroy),
        )
        .route("/api/v1/places", get(places::list).post(places::create))
        .route(
            "/api/v1/places/:id",
            get(places::fetch)
                .put(places::update)
                .delete(places::destroy),
        )
        .route("/api/v1/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/api/v1/reviews/:id",
            get(reviews::fetch)
                .put(reviews::update)
                .delete(reviews::destroy),
        )
        .route(
            "/api/v1/amenities",
            get(amenities::list).post(amenities::create),
        )
        .route(
            "/api/v1/amenities/:id",
            get(amenities::fetch)
                .put(amenities::update)
                .delete(amenities::destroy),
        )
        .route("/api/v1/cities", get(cities::list).post(cities::create))
        .route(
            "/api/v1/cities/:id",
            get(cities::fetch)
                .put(cities::update)
                .delete(cities::destroy),
        )
        .route("/api/v1/states", get(states::list).post(states::create))
        .route(
            "/api/v1/states/:id",
            get(states::fetch)
                .put(states::update)
                .delete(states::destroy),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
