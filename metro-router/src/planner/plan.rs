//! Route planning: the operation a caller invokes per request.
//!
//! Each call loads the facts, builds a fresh graph, runs one search, and
//! formats one itinerary. Nothing is shared between calls, so concurrent
//! requests need no locking; they each own their graph.

use crate::domain::StationId;
use crate::graph::Graph;
use crate::route::Route;
use crate::topology::{StationIndex, TopologyError, TopologyProvider};

use super::search::shortest_path;

/// Error from route planning.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// Start or end identifier missing or empty in caller input
    #[error("invalid route request: {0}")]
    InvalidRequest(String),

    /// The stations exist apart but no path connects them, or an endpoint
    /// is unknown
    #[error("no route between {start} and {end}")]
    NoRoute { start: StationId, end: StationId },

    /// The facts provider failed
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// A request to plan a route between two stations.
///
/// Carries raw caller input; identifiers are validated before any graph
/// work begins.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub end: String,
}

impl RouteRequest {
    /// Create a request from raw identifiers.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Validate the request, returning the parsed endpoint identifiers.
    pub fn validate(&self) -> Result<(StationId, StationId), PlanError> {
        let start = StationId::parse(&self.start)
            .map_err(|_| PlanError::InvalidRequest("missing start station id".to_string()))?;
        let end = StationId::parse(&self.end)
            .map_err(|_| PlanError::InvalidRequest("missing end station id".to_string()))?;

        Ok((start, end))
    }
}

/// Fastest-route planner over a topology provider.
pub struct Planner<'a, P: TopologyProvider> {
    provider: &'a P,
}

impl<'a, P: TopologyProvider> Planner<'a, P> {
    /// Create a planner over the given provider.
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Plan the fastest route between the requested stations.
    ///
    /// A request whose start equals its end yields a single-station
    /// itinerary with zero duration.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidRequest`] if an identifier is missing or
    ///   empty.
    /// - [`PlanError::NoRoute`] if either station is unknown or the two
    ///   lie in disconnected parts of the network.
    /// - [`PlanError::Topology`] if the facts provider fails.
    pub fn plan(&self, request: &RouteRequest) -> Result<Route, PlanError> {
        let (start, end) = request.validate()?;

        let stations = StationIndex::new(self.provider.stations()?);
        let memberships = self.provider.memberships()?;
        let timings = self.provider.timings()?;

        let origin = stations
            .get(&start)
            .cloned()
            .ok_or_else(|| PlanError::NoRoute {
                start: start.clone(),
                end: end.clone(),
            })?;

        if !stations.contains(&end) {
            return Err(PlanError::NoRoute { start, end });
        }

        let graph = Graph::build(&stations, &memberships, &timings);
        let solved = shortest_path(&graph, &start, &end).ok_or(PlanError::NoRoute {
            start: start.clone(),
            end,
        })?;

        Ok(Route::assemble(
            &origin,
            &solved.steps,
            &stations,
            solved.total_secs,
        ))
    }
}
