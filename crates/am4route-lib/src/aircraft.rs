use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::allocation::{CargoConfig, PaxConfig};
use crate::error::{Error, Result};
use crate::search::{SearchType, Searchable, Suggestion};
use crate::source::DataSource;

/// Numeric identifier for an aircraft model.
pub type AircraftId = u16;

/// What an aircraft carries. Decides which allocator and ticket apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftType {
    #[default]
    Pax,
    Cargo,
    Vip,
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            AircraftType::Pax => "PAX",
            AircraftType::Cargo => "CARGO",
            AircraftType::Vip => "VIP",
        };
        f.write_str(value)
    }
}

impl FromStr for AircraftType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "PAX" => Ok(AircraftType::Pax),
            "CARGO" => Ok(AircraftType::Cargo),
            "VIP" => Ok(AircraftType::Vip),
            other => Err(Error::InvalidRecord {
                kind: "aircraft",
                message: format!("unknown aircraft type '{other}'"),
            }),
        }
    }
}

/// Reference record for an aircraft model and engine variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: AircraftId,
    pub shortname: String,
    pub manufacturer: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ac_type: AircraftType,
    /// Engine variant order; 0 is the default engine.
    pub priority: u8,
    pub eid: u16,
    pub ename: String,
    /// Cruise speed in km/h.
    pub speed: f32,
    pub fuel: f32,
    pub co2: f32,
    pub cost: u32,
    /// Seat-units for passenger and VIP aircraft, lbs for cargo aircraft.
    pub capacity: u32,
    /// Minimum runway length in ft.
    pub rwy: u16,
    pub check_cost: u32,
    /// Maximum range in km.
    pub range: u16,
    pub ceil: u16,
    pub maint: u16,
    pub pilots: u8,
    pub crew: u8,
    pub engineers: u8,
    pub technicians: u8,
    pub img: String,
    pub wingspan: u8,
    pub length: u8,
    #[serde(skip_deserializing, default)]
    pub valid: bool,
}

impl Aircraft {
    /// Placeholder returned when a lookup misses.
    pub fn invalid() -> Self {
        Self::default()
    }

    pub(crate) fn validated(mut self) -> Result<Self> {
        self.shortname = self.shortname.trim().to_lowercase();
        self.name = self.name.trim().to_string();

        if self.shortname.is_empty() || self.name.is_empty() {
            return Err(invalid(self.id, "shortname and name must not be empty"));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(invalid(self.id, "speed must be a finite positive number"));
        }
        if self.range == 0 {
            return Err(invalid(self.id, "range must be positive"));
        }

        self.valid = true;
        Ok(self)
    }
}

fn invalid(id: AircraftId, message: &str) -> Error {
    Error::InvalidRecord {
        kind: "aircraft",
        message: format!("id {id}: {message}"),
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return f.write_str("<Aircraft invalid>");
        }
        write!(
            f,
            "<Aircraft id={} shortname='{}' manufacturer='{}' name='{}' type={} priority={} eid={} \
             ename='{}' speed={} fuel={} co2={} cost={} capacity={} rwy={} check_cost={} range={} \
             ceil={} maint={} pilots={} crew={} engineers={} technicians={} img='{}' wingspan={} length={}>",
            self.id,
            self.shortname,
            self.manufacturer,
            self.name,
            self.ac_type,
            self.priority,
            self.eid,
            self.ename,
            self.speed,
            self.fuel,
            self.co2,
            self.cost,
            self.capacity,
            self.rwy,
            self.check_cost,
            self.range,
            self.ceil,
            self.maint,
            self.pilots,
            self.crew,
            self.engineers,
            self.technicians,
            self.img,
            self.wingspan,
            self.length
        )
    }
}

/// Key type an aircraft query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AircraftSearchType {
    All,
    Id,
    Shortname,
    Name,
}

impl fmt::Display for AircraftSearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            AircraftSearchType::All => "all",
            AircraftSearchType::Id => "id",
            AircraftSearchType::Shortname => "shortname",
            AircraftSearchType::Name => "name",
        };
        f.write_str(value)
    }
}

impl SearchType for AircraftSearchType {
    const ALL: Self = AircraftSearchType::All;
    const ID: Self = AircraftSearchType::Id;

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ALL" => Some(AircraftSearchType::All),
            "ID" => Some(AircraftSearchType::Id),
            "SHORTNAME" => Some(AircraftSearchType::Shortname),
            "NAME" => Some(AircraftSearchType::Name),
            _ => None,
        }
    }

    fn string_keys() -> &'static [Self] {
        &[AircraftSearchType::Shortname, AircraftSearchType::Name]
    }
}

impl Searchable for Aircraft {
    type SearchType = AircraftSearchType;
    const KIND: &'static str = "aircraft";

    fn entity_id(&self) -> u16 {
        self.id
    }

    fn label(&self) -> String {
        format!("{}/{}", self.shortname, self.name)
    }

    fn by_id(source: &dyn DataSource, id: u16) -> Result<Option<Self>> {
        source.aircraft_by_id(id)
    }

    fn by_key(
        source: &dyn DataSource,
        search_type: AircraftSearchType,
        key: &str,
    ) -> Result<Option<Self>> {
        source.aircraft_by_key(search_type, key)
    }

    fn suggest_by(
        source: &dyn DataSource,
        search_type: AircraftSearchType,
        query: &str,
    ) -> Result<Vec<Suggestion<Self>>> {
        source.suggest_aircraft(search_type, query)
    }
}

/// Seat or cargo split applied to a purchased aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Config {
    Pax(PaxConfig),
    Cargo(CargoConfig),
}

impl Config {
    pub fn is_valid(&self) -> bool {
        match self {
            Config::Pax(config) => config.valid,
            Config::Cargo(config) => config.valid,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Config::Pax(config) => config.fmt(f),
            Config::Cargo(config) => config.fmt(f),
        }
    }
}

/// An aircraft together with the configuration it flies a route with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchasedAircraft {
    pub aircraft: Aircraft,
    pub config: Config,
}

impl PurchasedAircraft {
    /// Pair an aircraft with a configuration. Returns `None` when the
    /// configuration kind does not fit the aircraft type.
    pub fn new(aircraft: Aircraft, config: Config) -> Option<Self> {
        let fits = matches!(
            (aircraft.ac_type, &config),
            (AircraftType::Pax | AircraftType::Vip, Config::Pax(_))
                | (AircraftType::Cargo, Config::Cargo(_))
        );
        fits.then_some(Self { aircraft, config })
    }

    /// Aircraft with the "nothing allocated" configuration for its type.
    pub fn unconfigured(aircraft: Aircraft) -> Self {
        let config = match aircraft.ac_type {
            AircraftType::Cargo => Config::Cargo(CargoConfig::none()),
            AircraftType::Pax | AircraftType::Vip => Config::Pax(PaxConfig::none()),
        };
        Self { aircraft, config }
    }
}

impl fmt::Display for PurchasedAircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<PurchasedAircraft {} shortname='{}' config={}>",
            self.aircraft.id, self.aircraft.shortname, self.config
        )
    }
}
