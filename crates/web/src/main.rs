use std::sync::Arc;

use logistics::{
    fixtures::FixtureSet,
    latency::SimulatedLatency,
    server::Server,
    simulator::Simulator,
    store::LogisticsStore,
};
use tokio::net::TcpListener;
use web::{config::WebConfig, start_web_server, MapConfig, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = WebConfig::from_env().expect("invalid configuration in env.");

    // fixtures
    let fixtures = match &config.fixtures_dir {
        Some(directory) => FixtureSet::load_dir(directory).await,
        None => FixtureSet::bundled(),
    }
    .expect("could not load fixtures.");
    let store = LogisticsStore::from_fixtures(fixtures).expect("inconsistent fixtures.");

    // server
    let server = Server::start(
        store,
        Arc::new(SimulatedLatency::new(config.latency_scale)),
    );
    if let Some(tick) = config.simulation_tick {
        Simulator::new(server.client("simulator"), tick).spawn();
    }

    if config.maps_api_key.is_empty() {
        log::warn!("no maps api key configured, the map will not load.");
    }

    // web server
    let listener = TcpListener::bind(config.bind_address)
        .await
        .expect("could not bind web server address.");
    let state = WebState {
        client: server.client("REST API"),
        map_config: MapConfig {
            api_key: config.maps_api_key,
        },
    };

    if let Err(why) = start_web_server(listener, state, &config.static_dir).await {
        log::error!("web server stopped: {}", why);
    }
}
