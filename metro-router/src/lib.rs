//! Metro shortest-path routing core.
//!
//! Answers "what is the fastest path between two stations?" over a
//! fixed-topology metro network: raw station, line-membership, and timing
//! facts are assembled into a weighted undirected graph, a minimum-time
//! search finds the path, and the result is formatted as a display
//! itinerary with transfer annotations.
//!
//! All I/O lives behind [`topology::TopologyProvider`]; the core itself is
//! pure computation and needs no runtime.

pub mod domain;
pub mod geo;
pub mod graph;
pub mod planner;
pub mod route;
pub mod topology;
