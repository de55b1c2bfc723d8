//! Fastest-route planning.
//!
//! This module implements the core routing algorithm that answers:
//! "what is the fastest path between these two stations?"
//!
//! The search is a minimum-weight Dijkstra over the station graph built
//! from the provider's facts; [`Planner::plan`] wires validation, graph
//! construction, search, and itinerary formatting into one request-scoped
//! operation.

mod plan;
mod search;

pub use plan::{PlanError, Planner, RouteRequest};
pub use search::{PathStep, SolvedPath, shortest_path};
