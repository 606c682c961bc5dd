use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use model::{stats::SystemStats, trip::TripStatus};

use crate::{
    common::{route_not_found, schema, HateoasResult, RouteErrorResponse, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<SystemStats>))
        .route("/", get(get_stats))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_stats(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<SystemStats> {
    let stats = client
        .get_system_stats()
        .await
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))?;

    let by_status = |status: TripStatus| {
        super::trips::resource!(
            "?status={}",
            serde_json::to_value(status)
                .ok()
                .and_then(|value| value.as_str().map(str::to_owned))
                .unwrap_or_default()
        )
    };
    Ok(hateoas::Response::builder(stats, base_url)
        .link("active-trips", by_status(TripStatus::InProgress))
        .link("delayed-trips", by_status(TripStatus::Delayed))
        .link("completed-trips", by_status(TripStatus::Completed))
        .link("vehicles", super::vehicles::resource!(""))
        .build()
        .json())
}
