pub use crate::common::RouteResult;

use std::path::Path;

use axum::{extract::FromRef, Router};
use logistics::client::Client;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod api;
pub mod common;
pub mod config;
pub mod hateoas;
pub mod middleware;

/// Settings the browser needs to render the map.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub api_key: String,
}

#[derive(Clone, FromRef)]
pub struct WebState {
    pub client: Client,
    pub map_config: MapConfig,
}

/// The api under `/api`, everything else is served from `static_dir`.
pub fn app(state: WebState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    let static_content = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(static_dir.join("error404.html")));
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(
    listener: TcpListener,
    state: WebState,
    static_dir: impl AsRef<Path>,
) -> std::io::Result<()> {
    log::info!("web server listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, static_dir).into_make_service()).await
}
