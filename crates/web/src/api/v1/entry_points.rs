use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use model::{
    entry_point::{EntryPoint, EntryPointType},
    WithDistance, WithId,
};
use serde::Deserialize;

use crate::{
    common::{
        route_not_found, schema, HateoasResult, Query, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

/// km.
const DEFAULT_NEARBY_RADIUS: f64 = 50.0;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/entry-points{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<WithId<EntryPoint>>))
        .route("/", get(get_entry_points))
        .route("/nearby", get(nearby))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Deserialize)]
struct EntryPointsQuery {
    #[serde(rename = "type")]
    entry_point_type: Option<EntryPointType>,
}

async fn get_entry_points(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
    Query(params): Query<EntryPointsQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<EntryPoint>>>> {
    client
        .get_entry_points(params.entry_point_type)
        .await
        .map(|entry_points| {
            VecResponse::non_paginated(entry_points)
                .map(|entry_point| entry_point_hateoas(entry_point, base_url.clone()))
                .hateoas()
                .json()
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

#[derive(Deserialize)]
struct NearbyQuery {
    latitude: f64,
    longitude: f64,
    /// km.
    radius: Option<f64>,
}

async fn nearby(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
    Query(params): Query<NearbyQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithDistance<WithId<EntryPoint>>>>> {
    let radius = params.radius.unwrap_or(DEFAULT_NEARBY_RADIUS);
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(RouteErrorResponse::bad_request("radius must be a non-negative number of km.")
            .at(&Method::GET, &original_uri));
    }
    client
        .get_entry_points_nearby(params.latitude, params.longitude, radius)
        .await
        .map(|entry_points| {
            VecResponse::non_paginated(entry_points)
                .map(|entry_point| nearby_hateoas(entry_point, base_url.clone()))
                .hateoas()
                .json()
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

fn nearby_link(entry_point: &EntryPoint) -> String {
    resource!(
        "/nearby?latitude={}&longitude={}&radius={}",
        entry_point.location.lat,
        entry_point.location.lng,
        DEFAULT_NEARBY_RADIUS
    )
}

fn entry_point_hateoas(
    entry_point: WithId<EntryPoint>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithId<EntryPoint>> {
    let nearby = nearby_link(&entry_point.content);
    hateoas::Response::builder(entry_point, base_url)
        .link("nearby", nearby)
        .build()
}

fn nearby_hateoas(
    entry_point: WithDistance<WithId<EntryPoint>>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithDistance<WithId<EntryPoint>>> {
    let nearby = nearby_link(&entry_point.content.content);
    hateoas::Response::builder(entry_point, base_url)
        .link("nearby", nearby)
        .build()
}
