use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    routing::{get, on, post, put},
    Extension, Json, Router,
};
use logistics::none_to_not_found;
use model::{
    filter::TripFilters,
    trip::{NewTrip, Trip, TripStatus},
    vehicle::VehicleType,
    WithId,
};
use serde::Deserialize;
use utility::{id::Id, serde::comma_separated};

use crate::{
    common::{
        route_not_found, schema, HateoasResult, JsonBody, Query, RouteErrorResponse,
        VecResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    RouteResult, WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/trips{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Trip>))
        .route("/", get(get_trips).post(create_trip))
        .route("/search/:query", get(search_trips))
        .route("/:id", get(get_trip))
        .route("/:id/status", put(update_trip_status))
        .route("/:id/alerts/:alert_id/acknowledge", post(acknowledge_alert))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TripsQuery {
    #[serde(deserialize_with = "comma_separated::deserialize_option", default)]
    status: Option<Vec<TripStatus>>,

    #[serde(deserialize_with = "comma_separated::deserialize_option", default)]
    vehicle_type: Option<Vec<VehicleType>>,

    plate: Option<String>,

    driver: Option<String>,

    page: Option<usize>,

    page_size: Option<usize>,
}

impl TripsQuery {
    fn filters(&self) -> TripFilters {
        TripFilters {
            status: self.status.clone(),
            vehicle_type: self.vehicle_type.clone(),
            plate_number: self.plate.clone(),
            driver_name: self.driver.clone(),
        }
    }
}

async fn get_trips(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
    Query(params): Query<TripsQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Trip>>>> {
    client
        .get_trips(Some(params.filters()))
        .await
        .map(|trips| {
            VecResponse::maybe_paginated(trips, params.page, params.page_size)
                .map(|trip| trip_hateoas(trip, base_url.clone()))
                .hateoas()
                .json()
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn get_trip(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<WithId<Trip>> {
    none_to_not_found(client.get_trip_by_id(&Id::new(id)).await)
        .map(|trip| trip_hateoas(trip, base_url).json())
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn search_trips(
    OriginalUri(original_uri): OriginalUri,
    Path(query): Path<String>,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Trip>>>> {
    client
        .search_trips(query)
        .await
        .map(|trips| {
            VecResponse::non_paginated(trips)
                .map(|trip| trip_hateoas(trip, base_url.clone()))
                .hateoas()
                .json()
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn create_trip(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    JsonBody(trip): JsonBody<NewTrip>,
) -> RouteResult<(StatusCode, Json<hateoas::Response<WithId<Trip>>>)> {
    client
        .create_trip(trip)
        .await
        .map(|trip| (StatusCode::CREATED, trip_hateoas(trip, base_url).json()))
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::POST, &original_uri))
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: TripStatus,
}

async fn update_trip_status(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> HateoasResult<WithId<Trip>> {
    none_to_not_found(
        client
            .update_trip_status(&Id::new(id), update.status)
            .await,
    )
    .map(|trip| trip_hateoas(trip, base_url).json())
    .map_err(|why| RouteErrorResponse::from(why).at(&Method::PUT, &original_uri))
}

async fn acknowledge_alert(
    OriginalUri(original_uri): OriginalUri,
    Path((id, alert_id)): Path<(String, String)>,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<WithId<Trip>> {
    none_to_not_found(
        client
            .acknowledge_alert(&Id::new(id), &Id::new(alert_id))
            .await,
    )
    .map(|trip| trip_hateoas(trip, base_url).json())
    .map_err(|why| RouteErrorResponse::from(why).at(&Method::POST, &original_uri))
}

pub(crate) fn trip_hateoas(
    trip: WithId<Trip>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithId<Trip>> {
    let id = trip.id.raw();
    let vehicle = trip.content.vehicle.id.raw();
    let destination = trip.content.destination.content.location;
    let open_alerts = trip
        .content
        .alerts
        .iter()
        .filter(|alert| !alert.acknowledged)
        .map(|alert| alert.id.raw())
        .collect::<Vec<_>>();

    let builder = hateoas::Response::builder(trip, base_url)
        .link("self", resource!("/{}", id))
        .link("vehicle", super::vehicles::resource!("/{}", vehicle))
        .link(
            "destination-nearby",
            super::entry_points::resource!(
                "/nearby?latitude={}&longitude={}&radius=50",
                destination.lat,
                destination.lng
            ),
        )
        .action("status", "PUT", resource!("/{}/status", id));
    open_alerts
        .into_iter()
        .fold(builder, |builder, alert| {
            builder.action(
                "acknowledge",
                "POST",
                resource!("/{}/alerts/{}/acknowledge", id, alert),
            )
        })
        .build()
}
