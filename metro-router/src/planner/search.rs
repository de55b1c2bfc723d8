//! Single-pair minimum-time search over the station graph.
//!
//! Classic Dijkstra over a binary-heap frontier: a station is finalized the
//! first time it pops with its smallest accumulated time, and the search
//! stops as soon as the end station pops, which is sound because every edge
//! weight is non-negative. Instead of carrying the path inside each
//! frontier entry, a predecessor map records `(previous station, line)`
//! whenever a shorter time to a station is found; the step list is
//! reconstructed backward from the end only after termination.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;

use crate::domain::{Line, StationId};
use crate::graph::Graph;

/// One hop of a solved path: the station reached and the line used.
#[derive(Debug, Clone)]
pub struct PathStep {
    pub station: StationId,
    pub line: Arc<Line>,
}

/// A minimum-time path between two stations.
///
/// `steps` runs from the station after the start through the end; it is
/// empty when start and end coincide.
#[derive(Debug, Clone)]
pub struct SolvedPath {
    pub total_secs: u32,
    pub steps: Vec<PathStep>,
}

/// Frontier entry ordered by accumulated time.
#[derive(Clone, PartialEq, Eq)]
struct Frontier {
    secs: u32,
    station: StationId,
}

// BinaryHeap is a max-heap, so flip the comparison to pop the cheapest
// entry first. The station participates in the ordering to keep `Ord`
// consistent with `PartialEq`; among equal-cost entries the smallest
// identifier pops first.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .secs
            .cmp(&self.secs)
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the minimum-time path from `start` to `end`.
///
/// Returns `None` when no path exists, including when either endpoint has
/// no edges in the graph. `start == end` yields a zero-cost empty path.
pub fn shortest_path(graph: &Graph, start: &StationId, end: &StationId) -> Option<SolvedPath> {
    let mut best: HashMap<StationId, u32> = HashMap::new();
    let mut prev: HashMap<StationId, (StationId, Arc<Line>)> = HashMap::new();
    let mut done: HashSet<StationId> = HashSet::new();

    let mut frontier = BinaryHeap::new();
    best.insert(start.clone(), 0);
    frontier.push(Frontier {
        secs: 0,
        station: start.clone(),
    });

    while let Some(Frontier { secs, station }) = frontier.pop() {
        if !done.insert(station.clone()) {
            continue;
        }

        if station == *end {
            return Some(SolvedPath {
                total_secs: secs,
                steps: reconstruct(&prev, start, end),
            });
        }

        for (neighbor, edge) in graph.neighbors(&station) {
            if done.contains(neighbor) {
                continue;
            }

            let candidate = secs + edge.travel_secs;
            if candidate < best.get(neighbor).copied().unwrap_or(u32::MAX) {
                best.insert(neighbor.clone(), candidate);
                prev.insert(neighbor.clone(), (station.clone(), edge.line.clone()));
                frontier.push(Frontier {
                    secs: candidate,
                    station: neighbor.clone(),
                });
            }
        }
    }

    None
}

/// Walk the predecessor map backward from `end`, then reverse.
fn reconstruct(
    prev: &HashMap<StationId, (StationId, Arc<Line>)>,
    start: &StationId,
    end: &StationId,
) -> Vec<PathStep> {
    let mut steps = Vec::new();
    let mut current = end;

    while current != start {
        match prev.get(current) {
            Some((before, line)) => {
                steps.push(PathStep {
                    station: current.clone(),
                    line: line.clone(),
                });
                current = before;
            }
            None => break,
        }
    }

    steps.reverse();
    steps
}
