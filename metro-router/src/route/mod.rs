//! Display-ready itineraries.
//!
//! Turns the solver's raw steps into the structure a map client renders:
//! the origin station first, then one step per hop, with a transfer flag
//! wherever the line changes.

use serde::Serialize;
use tracing::warn;

use crate::domain::{Station, StationId};
use crate::planner::PathStep;
use crate::topology::StationIndex;

/// One displayed step of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub station_id: StationId,
    pub station_name: String,
    pub lat: f64,
    pub lng: f64,

    /// Line used to arrive at this station. `None` on the origin step.
    pub line_name: Option<String>,

    /// Set to the new line's name when this step changes line.
    pub transfer_line: Option<String>,
}

/// A complete display itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub path: Vec<RouteStep>,

    /// Number of stations in the path, origin included.
    pub total_stations: usize,

    /// Estimated duration in whole minutes, rounded up.
    #[serde(rename = "estimated_time")]
    pub estimated_time_mins: u32,
}

impl Route {
    /// Assemble the itinerary from the origin station and the solver's
    /// steps.
    ///
    /// The origin is emitted first with no line and no transfer flag. Each
    /// subsequent step carries the line used to reach it; its
    /// `transfer_line` is set exactly when a previous line exists and
    /// differs, so the flag never appears on the origin or on the first
    /// hop out of it. A step whose station is missing from the index is
    /// dropped and logged.
    pub fn assemble(
        start: &Station,
        steps: &[PathStep],
        stations: &StationIndex,
        total_secs: u32,
    ) -> Route {
        let mut path = Vec::with_capacity(steps.len() + 1);
        path.push(RouteStep {
            station_id: start.id.clone(),
            station_name: start.name.clone(),
            lat: start.lat,
            lng: start.lng,
            line_name: None,
            transfer_line: None,
        });

        let mut current_line: Option<&str> = None;

        for step in steps {
            let Some(station) = stations.get(&step.station) else {
                warn!(station = %step.station, "dropping step for unknown station");
                continue;
            };

            let line_name = step.line.name.as_str();
            let transfer = match current_line {
                Some(previous) if previous != line_name => Some(line_name.to_string()),
                _ => None,
            };
            current_line = Some(line_name);

            path.push(RouteStep {
                station_id: station.id.clone(),
                station_name: station.name.clone(),
                lat: station.lat,
                lng: station.lng,
                line_name: Some(line_name.to_string()),
                transfer_line: transfer,
            });
        }

        let total_stations = path.len();
        Route {
            path,
            total_stations,
            estimated_time_mins: total_secs.div_ceil(60),
        }
    }
}
