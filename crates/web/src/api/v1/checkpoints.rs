use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use model::{checkpoint::Checkpoint, WithId};

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<WithId<Checkpoint>>))
        .route("/", get(get_checkpoints))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_checkpoints(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Checkpoint>>>> {
    client
        .get_checkpoints()
        .await
        .map(|checkpoints| {
            VecResponse::non_paginated(checkpoints)
                .map(|checkpoint| {
                    let location = checkpoint.content.location;
                    hateoas::Response::builder(checkpoint, base_url.clone())
                        .link(
                            "entry-points-nearby",
                            super::entry_points::resource!(
                                "/nearby?latitude={}&longitude={}",
                                location.lat,
                                location.lng
                            ),
                        )
                        .build()
                })
                .hateoas()
                .json()
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}
