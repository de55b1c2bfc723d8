//! Weighted station graph construction.
//!
//! Builds the undirected adjacency used by the shortest-path solver from
//! the raw facts: consecutive memberships on a line become edges weighted
//! by the coordinate estimate, then explicit timings override the weights
//! of already-adjacent pairs. Construction is tolerant: facts referencing
//! unknown stations are skipped and logged, never fatal, so a partial
//! graph is preferred to no graph at all.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Line, LineId, StationId};
use crate::geo;
use crate::topology::{ExplicitTiming, LineMembership, StationIndex};

/// One direction of a station-to-station connection.
///
/// The graph is undirected for traversal (every edge is stored in both
/// directions with the same weight), but each edge keeps the line that
/// produced it so the route formatter can detect transfers.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Traversal time in seconds. Non-negative by construction.
    pub travel_secs: u32,

    /// The line this edge belongs to.
    pub line: Arc<Line>,
}

/// Station adjacency keyed by identifier.
///
/// Built fresh per routing request and owned by that request; nothing here
/// is shared or cached.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<StationId, HashMap<StationId, Edge>>,
}

impl Graph {
    /// Build a graph from the raw facts.
    ///
    /// Memberships are sorted by `(line, position)`; each consecutive pair
    /// on the same line whose positions differ by exactly 1 yields an edge
    /// weighted by [`geo::travel_time_secs`]. If more than one line
    /// connects the same pair of stations, the lower weight wins and ties
    /// keep the first edge encountered. Explicit timings then overwrite
    /// the weight of pairs that are already adjacent, in both directions;
    /// timings for any other pair are ignored.
    pub fn build(
        stations: &StationIndex,
        memberships: &[LineMembership],
        timings: &[ExplicitTiming],
    ) -> Self {
        let mut graph = Graph::default();
        let mut lines: HashMap<LineId, Arc<Line>> = HashMap::new();

        let mut ordered: Vec<&LineMembership> = memberships.iter().collect();
        ordered.sort_by(|a, b| {
            a.line_id
                .cmp(&b.line_id)
                .then_with(|| a.position.cmp(&b.position))
        });

        for pair in ordered.windows(2) {
            let (curr, next) = (pair[0], pair[1]);

            if curr.line_id != next.line_id || next.position != curr.position + 1 {
                continue;
            }

            let (Some(u), Some(v)) = (stations.get(&curr.station), stations.get(&next.station))
            else {
                warn!(
                    line = %curr.line_id,
                    from = %curr.station,
                    to = %next.station,
                    "skipping adjacency referencing unknown station"
                );
                continue;
            };

            let travel_secs = geo::travel_time_secs(u.lat, u.lng, v.lat, v.lng);
            let line = lines
                .entry(curr.line_id.clone())
                .or_insert_with(|| {
                    Arc::new(Line::new(curr.line_id.clone(), curr.line_name.clone()))
                })
                .clone();

            graph.insert_if_lighter(&curr.station, &next.station, travel_secs, line);
        }

        for timing in timings {
            if graph.edge(&timing.from, &timing.to).is_some() {
                graph.set_weight(&timing.from, &timing.to, timing.seconds);
            } else {
                debug!(
                    from = %timing.from,
                    to = %timing.to,
                    "ignoring timing for pair with no line adjacency"
                );
            }
        }

        graph
    }

    /// Insert an undirected edge unless an edge at most as heavy already
    /// connects the pair.
    fn insert_if_lighter(
        &mut self,
        u: &StationId,
        v: &StationId,
        travel_secs: u32,
        line: Arc<Line>,
    ) {
        if let Some(existing) = self.edge(u, v) {
            if existing.travel_secs <= travel_secs {
                return;
            }
        }

        let edge = Edge { travel_secs, line };
        self.adjacency
            .entry(u.clone())
            .or_default()
            .insert(v.clone(), edge.clone());
        self.adjacency
            .entry(v.clone())
            .or_default()
            .insert(u.clone(), edge);
    }

    /// Overwrite the weight of an existing edge, in both directions.
    fn set_weight(&mut self, u: &StationId, v: &StationId, travel_secs: u32) {
        for (a, b) in [(u, v), (v, u)] {
            if let Some(edge) = self.adjacency.get_mut(a).and_then(|n| n.get_mut(b)) {
                edge.travel_secs = travel_secs;
            }
        }
    }

    /// The edge between two stations, if they are adjacent.
    pub fn edge(&self, u: &StationId, v: &StationId) -> Option<&Edge> {
        self.adjacency.get(u).and_then(|n| n.get(v))
    }

    /// Neighbors of a station. Empty for stations not in the graph.
    pub fn neighbors(&self, station: &StationId) -> impl Iterator<Item = (&StationId, &Edge)> {
        self.adjacency
            .get(station)
            .into_iter()
            .flat_map(|n| n.iter())
    }

    /// True if the station has at least one edge.
    pub fn contains(&self, station: &StationId) -> bool {
        self.adjacency.contains_key(station)
    }

    /// Number of stations with at least one edge.
    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Station;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn station(id: &str, lat: f64, lng: f64) -> Station {
        Station::new(sid(id), id, lat, lng)
    }

    fn membership(line: &str, station: &str, position: u32) -> LineMembership {
        LineMembership {
            line_id: LineId::new(line),
            line_name: line.to_string(),
            station: sid(station),
            position,
        }
    }

    fn timing(from: &str, to: &str, seconds: u32) -> ExplicitTiming {
        ExplicitTiming {
            from: sid(from),
            to: sid(to),
            seconds,
        }
    }

    fn index(stations: &[Station]) -> StationIndex {
        StationIndex::new(stations.to_vec())
    }

    #[test]
    fn consecutive_memberships_become_symmetric_edges() {
        let stations = [station("A", 0.0, 0.0), station("B", 0.1, 0.0)];
        let memberships = [membership("L1", "A", 1), membership("L1", "B", 2)];

        let graph = Graph::build(&index(&stations), &memberships, &[]);

        let forward = graph.edge(&sid("A"), &sid("B")).unwrap();
        let backward = graph.edge(&sid("B"), &sid("A")).unwrap();

        assert_eq!(forward.travel_secs, backward.travel_secs);
        assert_eq!(
            forward.travel_secs,
            geo::travel_time_secs(0.0, 0.0, 0.1, 0.0)
        );
        assert_eq!(forward.line.name, "L1");
        assert_eq!(graph.station_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn non_consecutive_positions_do_not_connect() {
        let stations = [station("A", 0.0, 0.0), station("B", 0.1, 0.0)];
        let memberships = [membership("L1", "A", 1), membership("L1", "B", 3)];

        let graph = Graph::build(&index(&stations), &memberships, &[]);

        assert!(graph.edge(&sid("A"), &sid("B")).is_none());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn line_boundary_does_not_connect() {
        // The last station of L1 and the first of L2 are adjacent rows
        // after sorting, but belong to different lines.
        let stations = [
            station("A", 0.0, 0.0),
            station("B", 0.1, 0.0),
            station("C", 0.2, 0.0),
            station("D", 0.3, 0.0),
        ];
        let memberships = [
            membership("L1", "A", 1),
            membership("L1", "B", 2),
            membership("L2", "C", 1),
            membership("L2", "D", 2),
        ];

        let graph = Graph::build(&index(&stations), &memberships, &[]);

        assert!(graph.edge(&sid("B"), &sid("C")).is_none());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn duplicate_pair_tie_keeps_first_line() {
        // Two lines connect the same pair: the estimate is identical, so
        // the first edge (L1, by sort order) survives.
        let stations = [station("A", 0.0, 0.0), station("B", 0.1, 0.0)];
        let memberships = [
            membership("L1", "A", 1),
            membership("L1", "B", 2),
            membership("L2", "A", 1),
            membership("L2", "B", 2),
        ];

        let graph = Graph::build(&index(&stations), &memberships, &[]);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge(&sid("A"), &sid("B")).unwrap().line.name, "L1");
    }

    #[test]
    fn lighter_edge_replaces_heavier() {
        let mut graph = Graph::default();
        let l1 = Arc::new(Line::new(LineId::new("L1"), "L1"));
        let l2 = Arc::new(Line::new(LineId::new("L2"), "L2"));

        graph.insert_if_lighter(&sid("A"), &sid("B"), 300, l1);
        graph.insert_if_lighter(&sid("A"), &sid("B"), 200, l2.clone());

        let edge = graph.edge(&sid("A"), &sid("B")).unwrap();
        assert_eq!(edge.travel_secs, 200);
        assert_eq!(edge.line.name, "L2");

        // Equal weight does not replace.
        graph.insert_if_lighter(&sid("A"), &sid("B"), 200, Arc::new(Line::new(LineId::new("L3"), "L3")));
        assert_eq!(graph.edge(&sid("A"), &sid("B")).unwrap().line.name, "L2");
    }

    #[test]
    fn unknown_station_is_skipped() {
        let stations = [station("A", 0.0, 0.0), station("B", 0.1, 0.0)];
        let memberships = [
            membership("L1", "A", 1),
            membership("L1", "ghost", 2),
            membership("L2", "A", 1),
            membership("L2", "B", 2),
        ];

        let graph = Graph::build(&index(&stations), &memberships, &[]);

        // The L1 pair is dropped; the L2 pair still builds.
        assert!(!graph.contains(&sid("ghost")));
        assert_eq!(graph.edge(&sid("A"), &sid("B")).unwrap().line.name, "L2");
    }

    #[test]
    fn explicit_timing_overrides_both_directions() {
        let stations = [station("A", 0.0, 0.0), station("B", 0.1, 0.0)];
        let memberships = [membership("L1", "A", 1), membership("L1", "B", 2)];
        let timings = [timing("A", "B", 100)];

        let graph = Graph::build(&index(&stations), &memberships, &timings);

        assert_eq!(graph.edge(&sid("A"), &sid("B")).unwrap().travel_secs, 100);
        assert_eq!(graph.edge(&sid("B"), &sid("A")).unwrap().travel_secs, 100);
        // The line metadata survives the override.
        assert_eq!(graph.edge(&sid("A"), &sid("B")).unwrap().line.name, "L1");
    }

    #[test]
    fn timing_for_non_adjacent_pair_is_ignored() {
        let stations = [
            station("A", 0.0, 0.0),
            station("B", 0.1, 0.0),
            station("C", 0.2, 0.0),
        ];
        let memberships = [
            membership("L1", "A", 1),
            membership("L1", "B", 2),
            membership("L1", "C", 3),
        ];
        // A and C are on the same line but not adjacent: no edge appears.
        let timings = [timing("A", "C", 50), timing("A", "ghost", 10)];

        let graph = Graph::build(&index(&stations), &memberships, &timings);

        assert!(graph.edge(&sid("A"), &sid("C")).is_none());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn station_without_membership_is_absent() {
        let stations = [
            station("A", 0.0, 0.0),
            station("B", 0.1, 0.0),
            station("lonely", 5.0, 5.0),
        ];
        let memberships = [membership("L1", "A", 1), membership("L1", "B", 2)];

        let graph = Graph::build(&index(&stations), &memberships, &[]);

        assert!(!graph.contains(&sid("lonely")));
        assert!(graph.neighbors(&sid("lonely")).next().is_none());
    }

    #[test]
    fn empty_facts_build_empty_graph() {
        let graph = Graph::build(&StationIndex::default(), &[], &[]);
        assert_eq!(graph.station_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn unsorted_memberships_are_ordered_before_pairing() {
        let stations = [
            station("A", 0.0, 0.0),
            station("B", 0.1, 0.0),
            station("C", 0.2, 0.0),
        ];
        // Shuffled input rows; sorting must recover A-B-C adjacency.
        let memberships = [
            membership("L1", "C", 3),
            membership("L1", "A", 1),
            membership("L1", "B", 2),
        ];

        let graph = Graph::build(&index(&stations), &memberships, &[]);

        assert!(graph.edge(&sid("A"), &sid("B")).is_some());
        assert!(graph.edge(&sid("B"), &sid("C")).is_some());
        assert!(graph.edge(&sid("A"), &sid("C")).is_none());
    }
}
