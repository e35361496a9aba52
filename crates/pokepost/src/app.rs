use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use pokepost_core::store::RecordStore;

use crate::{
    config::Config,
    handlers::{
        health::livez,
        records::{
            create_record, delete_record, get_record, list_limited_records, list_records,
            update_record,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/livez", get(livez))
        .nest("/pokemon", record_routes(state.pokemon))
        .nest("/posts", record_routes(state.posts))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
}

/// The CRUD routes of one collection, bound to its store.
fn record_routes(store: RecordStore) -> Router {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route("/limit/{count}", get(list_limited_records))
        .route(
            "/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .with_state(store)
}
