mod common;

use am4route_lib::{
    load_dataset, load_reference_data, AircraftType, DataSource, Error, PaxDemand, Result,
};
use common::{fixture_data, fixtures_dir, SqliteFixture};

const MINIMAL_SCHEMA: &str = r#"
    CREATE TABLE airports (
        id INTEGER PRIMARY KEY,
        iata TEXT NOT NULL,
        icao TEXT NOT NULL,
        name TEXT NOT NULL,
        lat REAL NOT NULL,
        lng REAL NOT NULL,
        rwy INTEGER NOT NULL
    );
    CREATE TABLE aircrafts (
        id INTEGER NOT NULL,
        shortname TEXT NOT NULL,
        name TEXT NOT NULL,
        type TEXT NOT NULL,
        speed REAL NOT NULL,
        capacity INTEGER NOT NULL,
        rwy INTEGER NOT NULL,
        range INTEGER NOT NULL
    );
    INSERT INTO airports VALUES (1, 'HKG', 'VHHH', 'Hong Kong', 22.308919, 113.914603, 12467);
    INSERT INTO airports VALUES (2, 'LHR', 'EGLL', 'London Heathrow', 51.4706, -0.461941, 12799);
    INSERT INTO aircrafts VALUES (1, 'B744', 'B747-400', 'PAX', 913, 416, 10000, 13450);
"#;

#[test]
fn sqlite_dataset_matches_csv_fixtures() -> Result<()> {
    let fixture = SqliteFixture::from_csv_fixtures();
    let sqlite = load_reference_data(&fixture.db_path)?;
    let csv = fixture_data();

    assert_eq!(sqlite.airport_count(), csv.airport_count());
    assert_eq!(sqlite.aircraft_count(), csv.aircraft_count());
    assert_eq!(sqlite.route_count(), csv.route_count());

    for id in [1, 4, 15] {
        assert_eq!(sqlite.airport_by_id(id)?, csv.airport_by_id(id)?);
    }
    for id in [1, 5, 6] {
        assert_eq!(sqlite.aircraft_by_id(id)?, csv.aircraft_by_id(id)?);
    }
    assert_eq!(sqlite.pax_demand(1, 2)?, PaxDemand::new(1200, 250, 90));
    Ok(())
}

#[test]
fn descriptive_columns_are_optional() -> Result<()> {
    let fixture = SqliteFixture::empty();
    fixture.execute(MINIMAL_SCHEMA);

    let data = load_reference_data(&fixture.db_path)?;
    let hkg = data.airport_by_id(1)?.expect("airport present");
    assert_eq!(hkg.fullname, "");
    assert_eq!(hkg.market, 0);
    let b744 = data.aircraft_by_id(1)?.expect("aircraft present");
    assert_eq!(b744.ac_type, AircraftType::Pax);
    assert_eq!(b744.shortname, "b744");

    // no routes table
    assert_eq!(data.route_count(), 0);
    assert_eq!(data.pax_demand(1, 2)?, PaxDemand::default());
    Ok(())
}

#[test]
fn plain_demand_columns_are_detected() -> Result<()> {
    let fixture = SqliteFixture::empty();
    fixture.execute(MINIMAL_SCHEMA);
    fixture.execute(
        r#"
        CREATE TABLE routes (origin_id INTEGER, destination_id INTEGER, y INTEGER, j INTEGER, f INTEGER);
        INSERT INTO routes VALUES (1, 2, 700, 120, 30);
        INSERT INTO routes VALUES (1, 99, 1, 1, 1);
        "#,
    );

    let data = load_reference_data(&fixture.db_path)?;
    assert_eq!(data.route_count(), 1);
    assert_eq!(data.pax_demand(2, 1)?, PaxDemand::new(700, 120, 30));
    Ok(())
}

#[test]
fn missing_airports_table_is_unsupported() {
    let fixture = SqliteFixture::empty();
    fixture.execute("CREATE TABLE unrelated (id INTEGER);");

    let err = load_reference_data(&fixture.db_path).expect_err("schema rejected");
    assert!(matches!(err, Error::UnsupportedSchema { .. }), "{err}");
    assert!(err.to_string().contains("airports"));
}

#[test]
fn missing_required_column_is_unsupported() {
    let fixture = SqliteFixture::empty();
    fixture.execute(
        r#"
        CREATE TABLE airports (id INTEGER, iata TEXT, icao TEXT, name TEXT, lat REAL, lng REAL);
        CREATE TABLE aircrafts (id INTEGER);
        "#,
    );

    let err = load_reference_data(&fixture.db_path).expect_err("schema rejected");
    assert!(err.to_string().contains("rwy"), "{err}");
}

#[test]
fn routes_table_without_demand_columns_is_unsupported() {
    let fixture = SqliteFixture::empty();
    fixture.execute(MINIMAL_SCHEMA);
    fixture.execute("CREATE TABLE routes (origin_id INTEGER, destination_id INTEGER, pax INTEGER);");

    let err = load_reference_data(&fixture.db_path).expect_err("schema rejected");
    assert!(matches!(err, Error::UnsupportedSchema { .. }));
}

#[test]
fn unknown_aircraft_type_is_an_invalid_record() {
    let fixture = SqliteFixture::empty();
    fixture.execute(MINIMAL_SCHEMA);
    fixture.execute(
        "INSERT INTO aircrafts VALUES (2, 'GLDR', 'Glider', 'GLIDER', 100, 1, 500, 50);",
    );

    let err = load_reference_data(&fixture.db_path).expect_err("record rejected");
    assert!(matches!(err, Error::InvalidRecord { kind: "aircraft", .. }), "{err}");
}

#[test]
fn missing_database_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.db");
    let err = load_reference_data(&missing).expect_err("missing file");
    assert!(matches!(err, Error::DatasetNotFound { .. }));
}

#[test]
fn load_dataset_picks_loader_by_path_kind() -> Result<()> {
    let from_dir = load_dataset(&fixtures_dir())?;
    let fixture = SqliteFixture::from_csv_fixtures();
    let from_file = load_dataset(&fixture.db_path)?;
    assert_eq!(from_dir.airport_count(), from_file.airport_count());
    Ok(())
}
