//! Line-oriented scenario loader.
//!
//! # Format
//!
//! Four sections, each introduced by a count.  Blank lines are ignored and
//! every field is trimmed.
//!
//! ```text
//! 3                 station count
//! A                 one station name per line
//! B
//! C
//! 2                 edge count
//! E1,A,B,10         name,station,station,distance
//! E2,B,C,5
//! 1                 package count
//! K1,A,C,4          name,source,destination,weight
//! 1                 vehicle count
//! Q1,B,6            name,start,capacity
//! ```
//!
//! Record lines are decoded with the `csv` crate, so quoted fields work as
//! usual.  Parsing only checks shape; station names are resolved against the
//! network by [`Scenario::resolve`].

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use fleet_dispatch::{Package, Vehicle};
use fleet_itinerary::PlannerBuilder;
use fleet_network::{Network, NetworkBuilder};

use crate::{InputError, InputResult};

// ── Records ───────────────────────────────────────────────────────────────────

/// `name,station,station,distance`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EdgeRecord {
    pub name:     String,
    pub a:        String,
    pub b:        String,
    pub distance: u64,
}

/// `name,source,destination,weight`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageRecord {
    pub name:        String,
    pub source:      String,
    pub destination: String,
    pub weight:      u64,
}

/// `name,start,capacity`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VehicleRecord {
    pub name:     String,
    pub start:    String,
    pub capacity: u64,
}

/// A comma-separated record type with a fixed field count.
trait Record: DeserializeOwned {
    const WHAT:   &'static str;
    const FIELDS: usize;
}

impl Record for EdgeRecord {
    const WHAT:   &'static str = "edge";
    const FIELDS: usize = 4;
}

impl Record for PackageRecord {
    const WHAT:   &'static str = "package";
    const FIELDS: usize = 4;
}

impl Record for VehicleRecord {
    const WHAT:   &'static str = "vehicle";
    const FIELDS: usize = 3;
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A parsed scenario, still referring to stations by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    pub stations: Vec<String>,
    pub edges:    Vec<EdgeRecord>,
    pub packages: Vec<PackageRecord>,
    pub vehicles: Vec<VehicleRecord>,
}

/// A scenario with every station name resolved to a `StationId`.
pub struct ResolvedScenario {
    pub network:  Network,
    pub packages: Vec<Package>,
    pub vehicles: Vec<Vehicle>,
}

impl Scenario {
    /// Build the network and resolve package and vehicle stations.
    ///
    /// # Errors
    ///
    /// [`InputError::Network`] for a duplicate station name, an unknown
    /// station, a self-loop edge, or an out-of-range distance.
    pub fn resolve(&self) -> InputResult<ResolvedScenario> {
        let mut b = NetworkBuilder::with_capacity(self.stations.len(), self.edges.len());
        for name in &self.stations {
            b.add_station(name.as_str())?;
        }
        for e in &self.edges {
            b.add_edge_between(e.name.as_str(), &e.a, &e.b, e.distance)?;
        }
        let network = b.build();

        let packages = self
            .packages
            .iter()
            .map(|p| {
                Ok(Package {
                    name:        p.name.clone(),
                    source:      network.station_id(&p.source)?,
                    destination: network.station_id(&p.destination)?,
                    weight:      p.weight,
                })
            })
            .collect::<InputResult<Vec<_>>>()?;

        let vehicles = self
            .vehicles
            .iter()
            .map(|v| {
                Ok(Vehicle {
                    name:     v.name.clone(),
                    start:    network.station_id(&v.start)?,
                    capacity: v.capacity,
                })
            })
            .collect::<InputResult<Vec<_>>>()?;

        Ok(ResolvedScenario { network, packages, vehicles })
    }
}

impl ResolvedScenario {
    /// Hand everything to a [`PlannerBuilder`] with default settings.
    pub fn planner(self) -> PlannerBuilder {
        PlannerBuilder::new(self.network, self.packages, self.vehicles)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a scenario from a file.
pub fn load_scenario(path: &Path) -> InputResult<Scenario> {
    let file = std::fs::File::open(path)?;
    parse_scenario(file)
}

/// Like [`load_scenario`] but accepts any `Read` source.
///
/// Useful for stdin or tests (pass a `&[u8]` or `std::io::Cursor`).
/// Anything after the vehicle section is ignored.
pub fn parse_scenario<R: Read>(mut reader: R) -> InputResult<Scenario> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut lines = Lines::new(&text);

    let station_count = lines.count("station count")?;
    let mut stations = Vec::with_capacity(station_count.min(1 << 16));
    for _ in 0..station_count {
        let (_, name) = lines.next_line("station name")?;
        stations.push(name.to_owned());
    }

    let edges    = lines.records::<EdgeRecord>("edge count")?;
    let packages = lines.records::<PackageRecord>("package count")?;
    let vehicles = lines.records::<VehicleRecord>("vehicle count")?;

    tracing::debug!(
        stations = stations.len(),
        edges = edges.len(),
        packages = packages.len(),
        vehicles = vehicles.len(),
        "scenario parsed",
    );

    Ok(Scenario { stations, edges, packages, vehicles })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Cursor over the non-blank, trimmed lines of the input.
struct Lines<'t> {
    inner:   std::iter::Enumerate<std::str::Lines<'t>>,
    last:    usize,
    builder: csv::ReaderBuilder,
}

impl<'t> Lines<'t> {
    fn new(text: &'t str) -> Self {
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(false).flexible(true).trim(csv::Trim::All);
        Self { inner: text.lines().enumerate(), last: 0, builder }
    }

    fn next_line(&mut self, expected: &'static str) -> InputResult<(usize, &'t str)> {
        for (i, line) in self.inner.by_ref() {
            self.last = i + 1;
            let line = line.trim();
            if !line.is_empty() {
                return Ok((i + 1, line));
            }
        }
        Err(InputError::UnexpectedEof { line: self.last, expected })
    }

    fn count(&mut self, what: &'static str) -> InputResult<usize> {
        let (line, text) = self.next_line(what)?;
        text.parse().map_err(|_| InputError::InvalidCount {
            line,
            what,
            value: text.to_owned(),
        })
    }

    fn records<T: Record>(&mut self, what: &'static str) -> InputResult<Vec<T>> {
        let n = self.count(what)?;
        let mut out = Vec::with_capacity(n.min(1 << 16));
        for _ in 0..n {
            let (line, text) = self.next_line(T::WHAT)?;
            out.push(self.decode(line, text)?);
        }
        Ok(out)
    }

    fn decode<T: Record>(&self, line: usize, text: &str) -> InputResult<T> {
        let mut reader = self.builder.from_reader(text.as_bytes());
        let mut record = csv::StringRecord::new();
        reader
            .read_record(&mut record)
            .map_err(|source| InputError::Csv { line, source })?;
        if record.len() != T::FIELDS {
            return Err(InputError::FieldCount {
                line,
                what:     T::WHAT,
                expected: T::FIELDS,
                found:    record.len(),
            });
        }
        record
            .deserialize(None)
            .map_err(|source| InputError::Csv { line, source })
    }
}
