//! Facts consumed from the external data provider.
//!
//! The router does no I/O of its own: stations, line memberships, and
//! explicit timings are read-only collections supplied by whatever durable
//! store the caller uses. [`TopologyProvider`] is the seam;
//! [`InMemoryTopology`] is the implementation used in tests and by callers
//! that already hold the facts.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::{LineId, Station, StationId};

/// Membership of a station in a line, at an ordinal position.
///
/// Two memberships on the same line at consecutive ordinal positions imply
/// a direct edge between their stations. The line display name travels with
/// the row, the way the upstream store joins it in.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMembership {
    pub line_id: LineId,
    pub line_name: String,
    pub station: StationId,

    /// Ordinal position of the station within the line.
    pub position: u32,
}

/// An authoritative traversal time between two stations.
///
/// Assumed symmetric: the same value applies to both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitTiming {
    pub from: StationId,
    pub to: StationId,
    pub seconds: u32,
}

/// Error from a topology provider.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to load {collection}: {message}")]
pub struct TopologyError {
    /// Which facts collection failed to load.
    pub collection: &'static str,
    pub message: String,
}

impl TopologyError {
    /// Create a provider error for the named collection.
    pub fn new(collection: &'static str, message: impl Into<String>) -> Self {
        Self {
            collection,
            message: message.into(),
        }
    }
}

/// Read-only access to the three facts collections.
///
/// This abstraction keeps the routing core free of storage concerns and
/// allows the planner to be tested with in-memory data.
pub trait TopologyProvider {
    /// All stations in the network.
    fn stations(&self) -> Result<Vec<Station>, TopologyError>;

    /// All line memberships, in no particular order.
    fn memberships(&self) -> Result<Vec<LineMembership>, TopologyError>;

    /// All explicit timing facts.
    fn timings(&self) -> Result<Vec<ExplicitTiming>, TopologyError>;
}

/// A provider backed by owned vectors. Never fails.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTopology {
    stations: Vec<Station>,
    memberships: Vec<LineMembership>,
    timings: Vec<ExplicitTiming>,
}

impl InMemoryTopology {
    /// Create a provider over the given facts.
    pub fn new(
        stations: Vec<Station>,
        memberships: Vec<LineMembership>,
        timings: Vec<ExplicitTiming>,
    ) -> Self {
        Self {
            stations,
            memberships,
            timings,
        }
    }
}

impl TopologyProvider for InMemoryTopology {
    fn stations(&self) -> Result<Vec<Station>, TopologyError> {
        Ok(self.stations.clone())
    }

    fn memberships(&self) -> Result<Vec<LineMembership>, TopologyError> {
        Ok(self.memberships.clone())
    }

    fn timings(&self) -> Result<Vec<ExplicitTiming>, TopologyError> {
        Ok(self.timings.clone())
    }
}

/// Stations indexed by identifier, for coordinate and name lookup.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    by_id: HashMap<StationId, Station>,
}

impl StationIndex {
    /// Build the index. A duplicated identifier keeps the last record.
    pub fn new(stations: Vec<Station>) -> Self {
        let by_id = stations.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self { by_id }
    }

    /// Look up a station by identifier.
    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.by_id.get(id)
    }

    /// True if the identifier is known.
    pub fn contains(&self, id: &StationId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of indexed stations.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True if the index holds no stations.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Summary statistics over the network topology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    /// Number of distinct lines appearing in the memberships.
    pub line_count: usize,

    /// Number of stations in the stations collection.
    pub station_count: usize,

    /// The station belonging to the most distinct lines, if any.
    pub busiest_station: Option<BusiestStation>,
}

/// The station belonging to the most distinct lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusiestStation {
    pub name: String,
    pub line_count: usize,
}

/// Compute summary statistics from the provider's facts.
///
/// Ties on the busiest station keep the smallest station identifier.
/// Memberships whose station is absent from the stations collection are
/// ignored.
pub fn network_stats<P: TopologyProvider>(provider: &P) -> Result<NetworkStats, TopologyError> {
    let index = StationIndex::new(provider.stations()?);
    let memberships = provider.memberships()?;

    let mut lines: HashSet<&LineId> = HashSet::new();
    let mut lines_per_station: HashMap<&StationId, HashSet<&LineId>> = HashMap::new();

    for membership in &memberships {
        lines.insert(&membership.line_id);
        if index.contains(&membership.station) {
            lines_per_station
                .entry(&membership.station)
                .or_default()
                .insert(&membership.line_id);
        }
    }

    let busiest = lines_per_station
        .iter()
        .max_by(|(a_id, a), (b_id, b)| a.len().cmp(&b.len()).then_with(|| b_id.cmp(a_id)))
        .and_then(|(id, station_lines)| {
            index.get(id).map(|station| BusiestStation {
                name: station.name.clone(),
                line_count: station_lines.len(),
            })
        });

    Ok(NetworkStats {
        line_count: lines.len(),
        station_count: index.len(),
        busiest_station: busiest,
    })
}
