use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{get, on, put},
    Extension, Router,
};
use logistics::none_to_not_found;
use model::{location::Location, vehicle::Vehicle, WithId};
use utility::id::Id;

use crate::{
    common::{
        route_not_found, schema, HateoasResult, JsonBody, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/vehicles{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<WithId<Vehicle>>))
        .route("/", get(get_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/location", put(update_location))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_vehicles(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Vehicle>>>> {
    client
        .get_vehicles()
        .await
        .map(|vehicles| {
            VecResponse::non_paginated(vehicles)
                .map(|vehicle| vehicle_hateoas(vehicle, base_url.clone()))
                .hateoas()
                .json()
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn get_vehicle(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<WithId<Vehicle>> {
    none_to_not_found(client.get_vehicle_by_id(&Id::new(id)).await)
        .map(|vehicle| vehicle_hateoas(vehicle, base_url).json())
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn update_location(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    JsonBody(location): JsonBody<Location>,
) -> HateoasResult<WithId<Vehicle>> {
    if !(-90.0..=90.0).contains(&location.lat) || !(-180.0..=180.0).contains(&location.lng) {
        return Err(RouteErrorResponse::bad_request("location out of range.")
            .at(&Method::PUT, &original_uri));
    }
    none_to_not_found(
        client
            .update_vehicle_location(&Id::new(id), location)
            .await,
    )
    .map(|vehicle| vehicle_hateoas(vehicle, base_url).json())
    .map_err(|why| RouteErrorResponse::from(why).at(&Method::PUT, &original_uri))
}

fn vehicle_hateoas(
    vehicle: WithId<Vehicle>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithId<Vehicle>> {
    let id = vehicle.id.raw();
    let trips = trips_by_plate(&vehicle.content.plate_number);
    hateoas::Response::builder(vehicle, base_url)
        .link("self", resource!("/{}", id))
        .link("trips", trips)
        .action("location", "PUT", resource!("/{}/location", id))
        .build()
}

fn trips_by_plate(plate_number: &str) -> String {
    let plate = url::form_urlencoded::byte_serialize(plate_number.as_bytes()).collect::<String>();
    super::trips::resource!("?plate={}", plate)
}
