use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Json, Router,
};
use model::{driver::Driver, WithId};

use crate::{
    common::{route_not_found, schema, RouteErrorResponse, VecResponse, METHOD_FILTER_ALL},
    RouteResult, WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<WithId<Driver>>))
        .route("/", get(get_drivers))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_drivers(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
) -> RouteResult<Json<VecResponse<WithId<Driver>>>> {
    client
        .get_drivers()
        .await
        .map(|drivers| VecResponse::non_paginated(drivers).json())
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}
