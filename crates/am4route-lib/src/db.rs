use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row};
use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::aircraft::{Aircraft, AircraftSearchType};
use crate::airport::{Airport, AirportId, AirportSearchType};
use crate::demand::PaxDemand;
use crate::error::{Error, Result};
use crate::search::{Suggestion, MAX_SUGGESTIONS};
use crate::source::DataSource;

/// One row of the route demand table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandRecord {
    pub origin_id: AirportId,
    pub destination_id: AirportId,
    pub demand: PaxDemand,
}

/// In-memory, indexed snapshot of airports, aircraft and route demand.
///
/// Immutable once built, so a single instance can be shared freely between
/// threads and requests.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    airports: Vec<Airport>,
    airport_names: Vec<String>,
    airport_ids: HashMap<AirportId, usize>,
    airport_keys: HashMap<(AirportSearchType, String), usize>,
    aircraft: Vec<Aircraft>,
    aircraft_names: Vec<(String, String)>,
    aircraft_ids: HashMap<u16, usize>,
    aircraft_keys: HashMap<(AircraftSearchType, String), usize>,
    demand: HashMap<(AirportId, AirportId), PaxDemand>,
}

impl ReferenceData {
    /// Validate raw records and build the lookup indexes.
    ///
    /// Airports sharing an id or text key keep the first record. Aircraft
    /// engine variants share an id; lookups resolve to the lowest priority.
    /// Demand rows naming unknown airports are skipped.
    pub fn from_parts(
        airports: Vec<Airport>,
        aircraft: Vec<Aircraft>,
        demand: Vec<DemandRecord>,
    ) -> Result<Self> {
        let mut data = ReferenceData::default();

        let mut airports = airports
            .into_iter()
            .map(Airport::validated)
            .collect::<Result<Vec<_>>>()?;
        airports.sort_by_key(|airport| airport.id);
        for airport in airports {
            data.insert_airport(airport);
        }

        let mut aircraft = aircraft
            .into_iter()
            .map(Aircraft::validated)
            .collect::<Result<Vec<_>>>()?;
        aircraft.sort_by_key(|ac| (ac.id, ac.priority));
        for ac in aircraft {
            data.insert_aircraft(ac);
        }

        let mut skipped_routes = 0usize;
        for record in demand {
            if !data.airport_ids.contains_key(&record.origin_id)
                || !data.airport_ids.contains_key(&record.destination_id)
            {
                skipped_routes += 1;
                continue;
            }
            data.demand
                .entry((record.origin_id, record.destination_id))
                .or_insert(record.demand);
        }
        if skipped_routes > 0 {
            warn!(
                skipped_routes,
                "ignored demand rows referencing unknown airports"
            );
        }

        debug!(
            airports = data.airports.len(),
            aircraft = data.aircraft.len(),
            routes = data.demand.len(),
            "reference data indexed"
        );
        Ok(data)
    }

    fn insert_airport(&mut self, airport: Airport) {
        if self.airport_ids.contains_key(&airport.id) {
            warn!(id = airport.id, "duplicate airport id; keeping first record");
            return;
        }
        let index = self.airports.len();
        let name = airport.name.to_uppercase();
        for (search_type, key) in [
            (AirportSearchType::Iata, airport.iata.clone()),
            (AirportSearchType::Icao, airport.icao.clone()),
            (AirportSearchType::Name, name.clone()),
        ] {
            if key.is_empty() {
                continue;
            }
            if let Some(&existing) = self.airport_keys.get(&(search_type, key.clone())) {
                warn!(
                    %search_type,
                    key = %key,
                    kept = self.airports[existing].id,
                    ignored = airport.id,
                    "duplicate airport key"
                );
                continue;
            }
            self.airport_keys.insert((search_type, key), index);
        }
        self.airport_ids.insert(airport.id, index);
        self.airport_names.push(name);
        self.airports.push(airport);
    }

    // callers insert in (id, priority) order, so the first variant seen is the default engine
    fn insert_aircraft(&mut self, aircraft: Aircraft) {
        let index = self.aircraft.len();
        let shortname = aircraft.shortname.to_uppercase();
        let name = aircraft.name.to_uppercase();

        self.aircraft_ids.entry(aircraft.id).or_insert(index);
        for (search_type, key) in [
            (AircraftSearchType::Shortname, shortname.clone()),
            (AircraftSearchType::Name, name.clone()),
        ] {
            match self.aircraft_keys.get(&(search_type, key.clone())) {
                Some(&existing) => {
                    let kept = &self.aircraft[existing];
                    if kept.id != aircraft.id {
                        warn!(
                            %search_type,
                            key = %key,
                            kept = kept.id,
                            ignored = aircraft.id,
                            "duplicate aircraft key"
                        );
                    }
                }
                None => {
                    self.aircraft_keys.insert((search_type, key), index);
                }
            }
        }
        self.aircraft_names.push((shortname, name));
        self.aircraft.push(aircraft);
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    /// Number of distinct aircraft models (engine variants excluded).
    pub fn aircraft_count(&self) -> usize {
        self.aircraft_ids.len()
    }

    pub fn route_count(&self) -> usize {
        self.demand.len()
    }

    /// Indexes of the default engine variant of each model, in id order.
    fn default_variants(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.aircraft.len())
            .filter(|&index| self.aircraft_ids.get(&self.aircraft[index].id) == Some(&index))
    }
}

/// Score `query` against each candidate key and keep the best matches.
///
/// Candidates are visited in storage order and the sort is stable, so equal
/// scores keep that order.
fn rank<T>(
    query: &str,
    candidates: impl Iterator<Item = (T, String)>,
) -> Vec<Suggestion<T>> {
    let mut scored: Vec<Suggestion<T>> = candidates
        .filter(|(_, key)| !key.is_empty())
        .map(|(item, key)| Suggestion {
            score: jaro_winkler(query, &key),
            item,
        })
        .filter(|suggestion| suggestion.score > 0.0)
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(MAX_SUGGESTIONS);
    scored
}

impl DataSource for ReferenceData {
    fn airport_by_id(&self, id: AirportId) -> Result<Option<Airport>> {
        Ok(self
            .airport_ids
            .get(&id)
            .map(|&index| self.airports[index].clone()))
    }

    fn airport_by_key(
        &self,
        search_type: AirportSearchType,
        key: &str,
    ) -> Result<Option<Airport>> {
        Ok(self
            .airport_keys
            .get(&(search_type, key.to_uppercase()))
            .map(|&index| self.airports[index].clone()))
    }

    fn suggest_airports(
        &self,
        search_type: AirportSearchType,
        query: &str,
    ) -> Result<Vec<Suggestion<Airport>>> {
        let query = query.to_uppercase();
        let candidates = self.airports.iter().zip(&self.airport_names);
        let suggestions = match search_type {
            AirportSearchType::Iata => rank(
                &query,
                candidates.map(|(airport, _)| (airport, airport.iata.clone())),
            ),
            AirportSearchType::Icao => rank(
                &query,
                candidates.map(|(airport, _)| (airport, airport.icao.clone())),
            ),
            AirportSearchType::Name => rank(
                &query,
                candidates.map(|(airport, name)| (airport, name.clone())),
            ),
            AirportSearchType::All | AirportSearchType::Id => Vec::new(),
        };
        Ok(suggestions
            .into_iter()
            .map(|s| Suggestion {
                item: s.item.clone(),
                score: s.score,
            })
            .collect())
    }

    fn aircraft_by_id(&self, id: u16) -> Result<Option<Aircraft>> {
        Ok(self
            .aircraft_ids
            .get(&id)
            .map(|&index| self.aircraft[index].clone()))
    }

    fn aircraft_by_key(
        &self,
        search_type: AircraftSearchType,
        key: &str,
    ) -> Result<Option<Aircraft>> {
        Ok(self
            .aircraft_keys
            .get(&(search_type, key.to_uppercase()))
            .map(|&index| self.aircraft[index].clone()))
    }

    fn suggest_aircraft(
        &self,
        search_type: AircraftSearchType,
        query: &str,
    ) -> Result<Vec<Suggestion<Aircraft>>> {
        let query = query.to_uppercase();
        let key = |index: usize| -> Option<String> {
            let (shortname, name) = &self.aircraft_names[index];
            match search_type {
                AircraftSearchType::Shortname => Some(shortname.clone()),
                AircraftSearchType::Name => Some(name.clone()),
                AircraftSearchType::All | AircraftSearchType::Id => None,
            }
        };
        let ranked = rank(
            &query,
            self.default_variants()
                .filter_map(|index| key(index).map(|key| (index, key))),
        );
        Ok(ranked
            .into_iter()
            .map(|s| Suggestion {
                item: self.aircraft[s.item].clone(),
                score: s.score,
            })
            .collect())
    }

    fn pax_demand(&self, origin: AirportId, destination: AirportId) -> Result<PaxDemand> {
        if let Some(demand) = self.demand.get(&(origin, destination)) {
            return Ok(*demand);
        }
        if let Some(demand) = self.demand.get(&(destination, origin)) {
            return Ok(*demand);
        }
        debug!(origin, destination, "no demand recorded for route");
        Ok(PaxDemand::default())
    }

    fn airports(&self) -> Result<Box<dyn Iterator<Item = &Airport> + '_>> {
        Ok(Box::new(self.airports.iter()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemandLayout {
    Suffixed,
    Plain,
}

impl fmt::Display for DemandLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            DemandLayout::Suffixed => "yd/jd/fd",
            DemandLayout::Plain => "y/j/f",
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DemandColumns {
    layout: DemandLayout,
    y: &'static str,
    j: &'static str,
    f: &'static str,
}

const DEMAND_CANDIDATES: [DemandColumns; 2] = [
    DemandColumns {
        layout: DemandLayout::Suffixed,
        y: "yd",
        j: "jd",
        f: "fd",
    },
    DemandColumns {
        layout: DemandLayout::Plain,
        y: "y",
        j: "j",
        f: "f",
    },
];

/// Required columns, then optional columns with the SQL literal used when absent.
struct TableSchema {
    table: &'static str,
    required: &'static [&'static str],
    optional: &'static [(&'static str, &'static str)],
}

const AIRPORTS: TableSchema = TableSchema {
    table: "airports",
    required: &["id", "iata", "icao", "name", "lat", "lng", "rwy"],
    optional: &[
        ("fullname", "''"),
        ("country", "''"),
        ("continent", "''"),
        ("market", "0"),
        ("hub_cost", "0"),
        ("rwy_codes", "''"),
    ],
};

const AIRCRAFTS: TableSchema = TableSchema {
    table: "aircrafts",
    required: &[
        "id", "shortname", "name", "type", "speed", "capacity", "rwy", "range",
    ],
    optional: &[
        ("manufacturer", "''"),
        ("priority", "0"),
        ("eid", "0"),
        ("ename", "''"),
        ("fuel", "0.0"),
        ("co2", "0.0"),
        ("cost", "0"),
        ("check_cost", "0"),
        ("ceil", "0"),
        ("maint", "0"),
        ("pilots", "0"),
        ("crew", "0"),
        ("engineers", "0"),
        ("technicians", "0"),
        ("img", "''"),
        ("wingspan", "0"),
        ("length", "0"),
    ],
};

const ROUTES_TABLE: &str = "routes";
const ROUTE_KEY_COLUMNS: [&str; 2] = ["origin_id", "destination_id"];

/// Load airports, aircraft and route demand from a SQLite dataset.
///
/// `airports` and `aircrafts` must exist with at least their identifying
/// columns; descriptive columns that are missing fall back to empty values.
/// The `routes` table is optional and may store demand as `yd/jd/fd` or
/// `y/j/f`. Without it every route has zero demand.
pub fn load_reference_data(db_path: &Path) -> Result<ReferenceData> {
    if !db_path.is_file() {
        return Err(Error::DatasetNotFound {
            path: db_path.to_path_buf(),
        });
    }
    let connection = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    debug!(path = %db_path.display(), "loading reference data");

    let airports = load_rows(&connection, &AIRPORTS, row_to_airport)?;
    let aircraft = load_rows(&connection, &AIRCRAFTS, row_to_aircraft)?
        .into_iter()
        .map(|(mut aircraft, kind)| {
            aircraft.ac_type = kind.parse()?;
            Ok(aircraft)
        })
        .collect::<Result<Vec<_>>>()?;
    let demand = load_demand(&connection)?;

    ReferenceData::from_parts(airports, aircraft, demand)
}

fn load_rows<T>(
    connection: &Connection,
    schema: &TableSchema,
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    if !table_exists(connection, schema.table)? {
        return Err(Error::UnsupportedSchema {
            detail: format!("missing table '{}'", schema.table),
        });
    }
    if !table_has_columns(connection, schema.table, schema.required)? {
        return Err(Error::UnsupportedSchema {
            detail: format!(
                "table '{}' needs columns {}",
                schema.table,
                schema.required.join(", ")
            ),
        });
    }

    let mut selects: Vec<String> = schema
        .required
        .iter()
        .map(|column| format!("\"{column}\""))
        .collect();
    for (column, default) in schema.optional {
        if table_has_columns(connection, schema.table, &[*column])? {
            selects.push(format!("\"{column}\""));
        } else {
            selects.push(format!("{default} AS \"{column}\""));
        }
    }

    let sql = format!(
        "SELECT {selects} FROM {table}",
        selects = selects.join(", "),
        table = schema.table
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], map)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

fn load_demand(connection: &Connection) -> Result<Vec<DemandRecord>> {
    if !table_exists(connection, ROUTES_TABLE)? {
        warn!("dataset has no routes table; demand defaults to zero");
        return Ok(Vec::new());
    }
    if !table_has_columns(connection, ROUTES_TABLE, &ROUTE_KEY_COLUMNS)? {
        return Err(Error::UnsupportedSchema {
            detail: format!(
                "table '{ROUTES_TABLE}' needs columns {}",
                ROUTE_KEY_COLUMNS.join(", ")
            ),
        });
    }

    let mut layout = None;
    for columns in DEMAND_CANDIDATES {
        if table_has_columns(connection, ROUTES_TABLE, &[columns.y, columns.j, columns.f])? {
            layout = Some(columns);
            break;
        }
    }
    let Some(columns) = layout else {
        return Err(Error::UnsupportedSchema {
            detail: format!("table '{ROUTES_TABLE}' has no demand columns"),
        });
    };
    debug!(layout = %columns.layout, "detected demand columns");

    let sql = format!(
        "SELECT origin_id, destination_id, {y}, {j}, {f} FROM {ROUTES_TABLE}",
        y = columns.y,
        j = columns.j,
        f = columns.f
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(DemandRecord {
            origin_id: row.get(0)?,
            destination_id: row.get(1)?,
            demand: PaxDemand::new(row.get(2)?, row.get(3)?, row.get(4)?),
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

fn row_to_airport(row: &Row<'_>) -> rusqlite::Result<Airport> {
    Ok(Airport {
        id: row.get("id")?,
        iata: row.get("iata")?,
        icao: row.get("icao")?,
        name: row.get("name")?,
        fullname: row.get("fullname")?,
        country: row.get("country")?,
        continent: row.get("continent")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        rwy: row.get("rwy")?,
        market: row.get("market")?,
        hub_cost: row.get("hub_cost")?,
        rwy_codes: row.get("rwy_codes")?,
        valid: false,
    })
}

/// The aircraft type is returned as text and parsed by the caller.
fn row_to_aircraft(row: &Row<'_>) -> rusqlite::Result<(Aircraft, String)> {
    let aircraft = Aircraft {
        id: row.get("id")?,
        shortname: row.get("shortname")?,
        manufacturer: row.get("manufacturer")?,
        name: row.get("name")?,
        priority: row.get("priority")?,
        eid: row.get("eid")?,
        ename: row.get("ename")?,
        speed: row.get("speed")?,
        fuel: row.get("fuel")?,
        co2: row.get("co2")?,
        cost: row.get("cost")?,
        capacity: row.get("capacity")?,
        rwy: row.get("rwy")?,
        check_cost: row.get("check_cost")?,
        range: row.get("range")?,
        ceil: row.get("ceil")?,
        maint: row.get("maint")?,
        pilots: row.get("pilots")?,
        crew: row.get("crew")?,
        engineers: row.get("engineers")?,
        technicians: row.get("technicians")?,
        img: row.get("img")?,
        wingspan: row.get("wingspan")?,
        length: row.get("length")?,
        ..Aircraft::default()
    };
    Ok((aircraft, row.get("type")?))
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}
