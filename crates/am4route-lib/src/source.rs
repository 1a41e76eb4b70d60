use crate::aircraft::{Aircraft, AircraftSearchType};
use crate::airport::{Airport, AirportId, AirportSearchType};
use crate::demand::PaxDemand;
use crate::error::Result;
use crate::search::Suggestion;

/// Read access to the reference data the engine works from.
///
/// Implementations own indexing and fuzzy scoring; the engine only asks
/// questions. Every call returns [`Result`] so storage failures reach the
/// caller unchanged.
pub trait DataSource {
    fn airport_by_id(&self, id: AirportId) -> Result<Option<Airport>>;

    /// Exact match on a single text key. `key` is already upper-cased.
    fn airport_by_key(&self, search_type: AirportSearchType, key: &str)
        -> Result<Option<Airport>>;

    /// Fuzzy matches on a single text key, best first.
    fn suggest_airports(
        &self,
        search_type: AirportSearchType,
        query: &str,
    ) -> Result<Vec<Suggestion<Airport>>>;

    fn aircraft_by_id(&self, id: u16) -> Result<Option<Aircraft>>;

    /// Exact match on a single text key, returning the default engine variant.
    fn aircraft_by_key(
        &self,
        search_type: AircraftSearchType,
        key: &str,
    ) -> Result<Option<Aircraft>>;

    fn suggest_aircraft(
        &self,
        search_type: AircraftSearchType,
        query: &str,
    ) -> Result<Vec<Suggestion<Aircraft>>>;

    /// Daily passenger demand from `origin` to `destination`.
    fn pax_demand(&self, origin: AirportId, destination: AirportId) -> Result<PaxDemand>;

    /// Every reference airport, in a stable order.
    fn airports(&self) -> Result<Box<dyn Iterator<Item = &Airport> + '_>>;
}
