use axum::{
    routing::{on, post},
    Json, Router,
};
use drawing::shape::{Measurements, Shape};
use model::location::Location;
use serde::{Deserialize, Serialize};
use utility::geo;

use crate::{
    common::{route_not_found, JsonBody, METHOD_FILTER_ALL},
    RouteResult,
};

pub(crate) fn routes() -> Router {
    Router::new()
        .route("/measure", post(measure))
        .route("/distance", post(distance))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeasuredShape {
    shape: Shape,
    measurements: Measurements,
}

async fn measure(JsonBody(shape): JsonBody<Shape>) -> RouteResult<Json<MeasuredShape>> {
    let measurements = shape.measure()?;
    Ok(Json(MeasuredShape {
        shape,
        measurements,
    }))
}

#[derive(Debug, Deserialize)]
struct DistanceRequest {
    from: Location,
    to: Location,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DistanceResponse {
    haversine_km: f64,
    spherical_km: f64,
}

async fn distance(JsonBody(request): JsonBody<DistanceRequest>) -> Json<DistanceResponse> {
    let (from, to) = (request.from, request.to);
    Json(DistanceResponse {
        haversine_km: from.distance_to(&to),
        spherical_km: geo::spherical_distance(from.lat, from.lng, to.lat, to.lng),
    })
}
