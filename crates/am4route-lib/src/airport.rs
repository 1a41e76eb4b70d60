use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::search::{SearchType, Searchable, Suggestion};
use crate::source::DataSource;

/// Numeric identifier for an airport.
pub type AirportId = u16;

/// Reference record for an airport.
///
/// A record with `valid == false` is the "not found" placeholder and carries
/// no meaningful data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Airport {
    pub id: AirportId,
    pub iata: String,
    pub icao: String,
    pub name: String,
    pub fullname: String,
    pub country: String,
    pub continent: String,
    pub lat: f64,
    pub lng: f64,
    /// Runway length in ft.
    pub rwy: u16,
    pub market: u8,
    pub hub_cost: u32,
    /// Runway surface codes, one character per runway.
    pub rwy_codes: String,
    #[serde(skip_deserializing, default)]
    pub valid: bool,
}

impl Airport {
    /// Placeholder returned when a lookup misses.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Normalize text keys and check coordinates, marking the record valid.
    pub(crate) fn validated(mut self) -> Result<Self> {
        self.iata = self.iata.trim().to_uppercase();
        self.icao = self.icao.trim().to_uppercase();
        self.name = self.name.trim().to_string();

        if self.iata.is_empty() && self.icao.is_empty() {
            return Err(invalid(self.id, "airport needs an IATA or ICAO code"));
        }
        if self.name.is_empty() {
            return Err(invalid(self.id, "name must not be empty"));
        }
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(invalid(self.id, "lat must be within [-90, 90]"));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(invalid(self.id, "lng must be within [-180, 180]"));
        }

        self.valid = true;
        Ok(self)
    }

    /// Great-circle distance to another airport in km.
    pub fn distance_to(&self, other: &Airport) -> f64 {
        crate::geo::distance(self.lat, self.lng, other.lat, other.lng)
    }
}

fn invalid(id: AirportId, message: &str) -> Error {
    Error::InvalidRecord {
        kind: "airport",
        message: format!("id {id}: {message}"),
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return f.write_str("<Airport invalid>");
        }
        write!(
            f,
            "<Airport id={} name='{}' fullname='{}' country='{}' continent='{}' iata='{}' icao='{}' \
             lat={:.6} lng={:.6} rwy={} market={} hub_cost={} rwy_codes='{}'>",
            self.id,
            self.name,
            self.fullname,
            self.country,
            self.continent,
            self.iata,
            self.icao,
            self.lat,
            self.lng,
            self.rwy,
            self.market,
            self.hub_cost,
            self.rwy_codes
        )
    }
}

/// Key type an airport query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AirportSearchType {
    All,
    Iata,
    Icao,
    Name,
    Id,
}

impl fmt::Display for AirportSearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            AirportSearchType::All => "all",
            AirportSearchType::Iata => "iata",
            AirportSearchType::Icao => "icao",
            AirportSearchType::Name => "name",
            AirportSearchType::Id => "id",
        };
        f.write_str(value)
    }
}

impl SearchType for AirportSearchType {
    const ALL: Self = AirportSearchType::All;
    const ID: Self = AirportSearchType::Id;

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ALL" => Some(AirportSearchType::All),
            "IATA" => Some(AirportSearchType::Iata),
            "ICAO" => Some(AirportSearchType::Icao),
            "NAME" => Some(AirportSearchType::Name),
            "ID" => Some(AirportSearchType::Id),
            _ => None,
        }
    }

    fn string_keys() -> &'static [Self] {
        &[
            AirportSearchType::Iata,
            AirportSearchType::Icao,
            AirportSearchType::Name,
        ]
    }
}

impl Searchable for Airport {
    type SearchType = AirportSearchType;
    const KIND: &'static str = "airport";

    fn entity_id(&self) -> u16 {
        self.id
    }

    fn label(&self) -> String {
        format!("{}/{} ({})", self.iata, self.icao, self.name)
    }

    fn by_id(source: &dyn DataSource, id: u16) -> Result<Option<Self>> {
        source.airport_by_id(id)
    }

    fn by_key(
        source: &dyn DataSource,
        search_type: AirportSearchType,
        key: &str,
    ) -> Result<Option<Self>> {
        source.airport_by_key(search_type, key)
    }

    fn suggest_by(
        source: &dyn DataSource,
        search_type: AirportSearchType,
        query: &str,
    ) -> Result<Vec<Suggestion<Self>>> {
        source.suggest_airports(search_type, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Airport {
        Airport {
            id: 3500,
            iata: " hkg".to_string(),
            icao: "vhhh ".to_string(),
            name: "Hong Kong".to_string(),
            fullname: "Hong Kong International Airport".to_string(),
            country: "Hong Kong".to_string(),
            continent: "Asia".to_string(),
            lat: 22.308919,
            lng: 113.914603,
            rwy: 12467,
            market: 86,
            hub_cost: 48000,
            rwy_codes: "AA".to_string(),
            valid: false,
        }
    }

    #[test]
    fn validation_normalizes_codes() {
        let airport = sample().validated().unwrap();
        assert!(airport.valid);
        assert_eq!(airport.iata, "HKG");
        assert_eq!(airport.icao, "VHHH");
    }

    #[test]
    fn validation_rejects_bad_latitude() {
        let mut airport = sample();
        airport.lat = 91.0;
        let err = airport.validated().unwrap_err();
        assert!(err.to_string().contains("lat must be within"));
    }

    #[test]
    fn placeholder_is_invalid_and_prints_marker() {
        let airport = Airport::invalid();
        assert!(!airport.valid);
        assert_eq!(airport.to_string(), "<Airport invalid>");
    }

    #[test]
    fn display_includes_codes() {
        let repr = sample().validated().unwrap().to_string();
        assert!(repr.starts_with("<Airport id=3500 name='Hong Kong'"));
        assert!(repr.contains("iata='HKG' icao='VHHH'"));
    }
}
