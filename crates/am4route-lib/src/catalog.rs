use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::aircraft::Aircraft;
use crate::airport::{Airport, AirportId};
use crate::db::{DemandRecord, ReferenceData};
use crate::demand::PaxDemand;
use crate::error::{Error, Result};

pub const AIRPORTS_CSV: &str = "airports.csv";
pub const AIRCRAFTS_CSV: &str = "aircrafts.csv";
pub const ROUTES_CSV: &str = "routes.csv";

#[derive(Debug, Deserialize)]
struct DemandRow {
    origin_id: AirportId,
    destination_id: AirportId,
    yd: u16,
    jd: u16,
    fd: u16,
}

impl From<DemandRow> for DemandRecord {
    fn from(row: DemandRow) -> Self {
        Self {
            origin_id: row.origin_id,
            destination_id: row.destination_id,
            demand: PaxDemand::new(row.yd, row.jd, row.fd),
        }
    }
}

impl ReferenceData {
    /// Load `airports.csv`, `aircrafts.csv` and `routes.csv` from a directory.
    ///
    /// The first two files are required. A missing `routes.csv` leaves every
    /// route with zero demand.
    pub fn from_csv_dir(dir: &Path) -> Result<Self> {
        let airports: Vec<Airport> = read_records(&open_required(dir, AIRPORTS_CSV)?)?;
        let aircraft: Vec<Aircraft> = read_records(&open_required(dir, AIRCRAFTS_CSV)?)?;

        let routes_path = dir.join(ROUTES_CSV);
        let demand = if routes_path.is_file() {
            read_records::<DemandRow>(&routes_path)?
                .into_iter()
                .map(DemandRecord::from)
                .collect()
        } else {
            debug!(path = %routes_path.display(), "no routes file; demand defaults to zero");
            Vec::new()
        };

        ReferenceData::from_parts(airports, aircraft, demand)
    }

    /// Build reference data from in-memory CSV sources.
    pub fn from_csv_readers<A: Read, C: Read, R: Read>(
        airports: A,
        aircraft: C,
        routes: Option<R>,
    ) -> Result<Self> {
        let airports = deserialize_all(airports)?;
        let aircraft = deserialize_all(aircraft)?;
        let demand = match routes {
            Some(reader) => deserialize_all::<DemandRow, _>(reader)?
                .into_iter()
                .map(DemandRecord::from)
                .collect(),
            None => Vec::new(),
        };
        ReferenceData::from_parts(airports, aircraft, demand)
    }
}

fn open_required(dir: &Path, file_name: &str) -> Result<std::path::PathBuf> {
    let path = dir.join(file_name);
    if !path.is_file() {
        return Err(Error::DatasetNotFound { path });
    }
    Ok(path)
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let records = deserialize_all(File::open(path)?)?;
    debug!(path = %path.display(), rows = records.len(), "read csv");
    Ok(records)
}

fn deserialize_all<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.deserialize::<T>() {
        records.push(record?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::aircraft::AircraftType;
    use crate::source::DataSource;

    const AIRPORTS: &str = "\
id,iata,icao,name,fullname,country,continent,lat,lng,rwy,market,hub_cost,rwy_codes
1, hkg ,VHHH,Hong Kong,Hong Kong International,Hong Kong,Asia,22.308919,113.914603,12467,86,48000,AA
2,LHR,EGLL,London Heathrow,London Heathrow Airport,United Kingdom,Europe,51.4706,-0.461941,12799,90,50000,AA
";

    const AIRCRAFT: &str = "\
id,shortname,manufacturer,name,type,priority,eid,ename,speed,fuel,co2,cost,capacity,rwy,check_cost,range,ceil,maint,pilots,crew,engineers,technicians,img,wingspan,length
1,B744,Boeing,B747-400,pax,0,1,CF6,913,21.2,0.18,200000000,416,10000,1500000,13450,45000,500,2,8,1,2,b744,64,71
";

    #[test]
    fn rows_are_trimmed_and_validated() {
        let data = ReferenceData::from_csv_readers(
            Cursor::new(AIRPORTS),
            Cursor::new(AIRCRAFT),
            None::<Cursor<&str>>,
        )
        .unwrap();
        let hkg = data.airport_by_id(1).unwrap().unwrap();
        assert_eq!(hkg.iata, "HKG");
        assert!(hkg.valid);

        let b744 = data.aircraft_by_id(1).unwrap().unwrap();
        assert_eq!(b744.shortname, "b744");
        assert_eq!(b744.ac_type, AircraftType::Pax);
    }

    #[test]
    fn routes_file_provides_demand() {
        let routes = "origin_id,destination_id,yd,jd,fd\n1,2,300,60,20\n";
        let data = ReferenceData::from_csv_readers(
            Cursor::new(AIRPORTS),
            Cursor::new(AIRCRAFT),
            Some(Cursor::new(routes)),
        )
        .unwrap();
        assert_eq!(data.pax_demand(1, 2).unwrap(), PaxDemand::new(300, 60, 20));
    }

    #[test]
    fn malformed_rows_surface_csv_errors() {
        let broken = "id,iata,icao,name,lat,lng,rwy\nabc,HKG,VHHH,Hong Kong,1,2,3\n";
        let err = ReferenceData::from_csv_readers(
            Cursor::new(broken),
            Cursor::new(AIRCRAFT),
            None::<Cursor<&str>>,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn missing_directory_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceData::from_csv_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::DatasetNotFound { .. }));
    }
}
