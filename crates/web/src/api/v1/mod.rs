use axum::{
    extract::State,
    routing::{get, on},
    Json, Router,
};

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    MapConfig, WebState,
};

mod checkpoints;
mod drivers;
mod entry_points;
mod geometry;
mod stats;
mod trips;
mod vehicles;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/map-config", get(map_config))
        .nest_service("/trips", trips::routes(state.clone()))
        .nest_service("/entry-points", entry_points::routes(state.clone()))
        .nest_service("/checkpoints", checkpoints::routes(state.clone()))
        .nest_service("/vehicles", vehicles::routes(state.clone()))
        .nest_service("/drivers", drivers::routes(state.clone()))
        .nest_service("/stats", stats::routes(state.clone()))
        .nest_service("/geometry", geometry::routes())
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn map_config(State(map_config): State<MapConfig>) -> Json<MapConfig> {
    Json(map_config)
}
