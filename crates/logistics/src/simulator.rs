use std::time::Duration;

use futures::future::join_all;
use model::{
    filter::TripFilters,
    location::Location,
    trip::{Trip, TripStatus},
    WithId,
};
use tokio::{task::JoinHandle, time};

use crate::{client::Client, RequestResult};

pub const DEFAULT_TICK: Duration = Duration::from_secs(5);

/// The planned point following the one closest to `current`, or `None` once
/// the closest point is the end of the route.
pub fn next_waypoint(route: &[Location], current: Location) -> Option<Location> {
    let (closest, _) = route
        .iter()
        .enumerate()
        .map(|(index, point)| (index, current.distance_to(point)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))?;
    route.get(closest + 1).copied()
}

/// Drives the vehicles of trips in progress along their planned routes.
#[derive(Debug, Clone)]
pub struct Simulator {
    client: Client,
    tick: Duration,
}

impl Simulator {
    pub fn new(client: Client, tick: Duration) -> Self {
        Self { client, tick }
    }

    fn advance(trip: &WithId<Trip>) -> Option<Location> {
        let current = trip.content.vehicle.content.current_location;
        next_waypoint(&trip.content.planned_route, current)
    }

    /// Moves every vehicle of an in progress trip one waypoint ahead. Returns
    /// how many vehicles moved.
    pub async fn step(&self) -> RequestResult<usize> {
        let trips = self
            .client
            .get_trips(Some(
                TripFilters::default().with_status(vec![TripStatus::InProgress]),
            ))
            .await?;

        let moves = trips
            .iter()
            .filter_map(|trip| Self::advance(trip).map(|next| (trip, next)))
            .map(|(trip, next)| async move {
                let vehicle_id = &trip.content.vehicle.id;
                match self.client.update_vehicle_location(vehicle_id, next).await {
                    Ok(Some(_)) => true,
                    Ok(None) => {
                        log::warn!(
                            "trip {} uses unknown vehicle {}, not moved",
                            trip.id,
                            vehicle_id
                        );
                        false
                    }
                    Err(why) => {
                        log::error!("can not move vehicle {}: {}", vehicle_id, why);
                        false
                    }
                }
            });
        let moved = join_all(moves).await.into_iter().filter(|moved| *moved).count();
        Ok(moved)
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            log::info!("simulator started, tick every {:?}", self.tick);
            let mut interval = time::interval(self.tick);
            loop {
                interval.tick().await;
                match self.step().await {
                    Ok(moved) => log::debug!("simulator tick moved {} vehicles", moved),
                    Err(why) => log::error!("simulator tick failed: {}", why),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Vec<Location> {
        vec![
            Location::new(24.7136, 46.6753),
            Location::new(25.0, 47.5),
            Location::new(25.5, 48.5),
            Location::new(26.4207, 50.0888),
        ]
    }

    #[test]
    fn moves_to_point_after_closest() {
        let next = next_waypoint(&route(), Location::new(24.72, 46.68));
        assert_eq!(next, Some(Location::new(25.0, 47.5)));
    }

    #[test]
    fn stops_at_route_end() {
        assert_eq!(next_waypoint(&route(), Location::new(26.4207, 50.0888)), None);
    }

    #[test]
    fn empty_route_has_no_waypoint() {
        assert_eq!(next_waypoint(&[], Location::new(24.0, 46.0)), None);
    }
}
