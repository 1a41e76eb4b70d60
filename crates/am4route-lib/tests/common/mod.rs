//! Common test utilities and fixture helpers.
//!
//! Integration tests share the CSV fixtures under `docs/fixtures` and can
//! materialise the same data as a throwaway SQLite database.

use std::path::{Path, PathBuf};

use am4route_lib::{Aircraft, Airport, ReferenceData, Resolver};
use rusqlite::{params_from_iter, Connection};
use tempfile::TempDir;

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Reference data loaded from the CSV fixtures.
pub fn fixture_data() -> ReferenceData {
    ReferenceData::from_csv_dir(&fixtures_dir()).expect("fixture loads")
}

#[allow(dead_code)]
pub fn airport(data: &ReferenceData, query: &str) -> Airport {
    Resolver::new(data)
        .search::<Airport>(query)
        .expect("search runs")
        .into_result()
        .expect("fixture airport resolves")
}

#[allow(dead_code)]
pub fn aircraft(data: &ReferenceData, query: &str) -> Aircraft {
    Resolver::new(data)
        .search::<Aircraft>(query)
        .expect("search runs")
        .into_result()
        .expect("fixture aircraft resolves")
}

/// Temporary SQLite database; removed when dropped.
#[allow(dead_code)]
pub struct SqliteFixture {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
}

#[allow(dead_code)]
impl SqliteFixture {
    /// Empty database file.
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("am4.db");
        Connection::open(&db_path).expect("create database");
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Database holding the CSV fixtures, one table per file.
    pub fn from_csv_fixtures() -> Self {
        let fixture = Self::empty();
        let connection = fixture.connection();
        for (table, file) in [
            ("airports", "airports.csv"),
            ("aircrafts", "aircrafts.csv"),
            ("routes", "routes.csv"),
        ] {
            import_csv(&connection, table, &fixtures_dir().join(file));
        }
        fixture
    }

    pub fn connection(&self) -> Connection {
        Connection::open(&self.db_path).expect("open fixture database")
    }

    pub fn execute(&self, sql: &str) {
        self.connection()
            .execute_batch(sql)
            .expect("execute fixture sql");
    }
}

/// NUMERIC affinity stores numbers as numbers and everything else as text.
fn import_csv(connection: &Connection, table: &str, path: &Path) {
    let mut reader = csv::Reader::from_path(path).expect("open fixture csv");
    let headers = reader.headers().expect("csv headers").clone();

    let columns = headers
        .iter()
        .map(|column| format!("\"{column}\" NUMERIC"))
        .collect::<Vec<_>>()
        .join(", ");
    connection
        .execute_batch(&format!("CREATE TABLE {table} ({columns});"))
        .expect("create table");

    let placeholders = vec!["?"; headers.len()].join(", ");
    let sql = format!("INSERT INTO {table} VALUES ({placeholders})");
    for record in reader.records() {
        let record = record.expect("csv record");
        connection
            .execute(&sql, params_from_iter(record.iter()))
            .expect("insert row");
    }
}
