//! `airport` and `aircraft` subcommands: resolve one free-text query.

use anyhow::Result;

use am4route_lib::search::Searchable;
use am4route_lib::{Aircraft, Airport, DataSource, Resolver};

use crate::output::{render_aircraft, render_airport, OutputFormat};

/// Resolve an airport query and render the record.
///
/// A miss becomes an error whose message lists the closest suggestions.
pub fn handle_airport_command(
    source: &dyn DataSource,
    query: &str,
    format: OutputFormat,
) -> Result<String> {
    let airport = resolve::<Airport>(source, query)?;
    render_airport(&airport, format)
}

/// Resolve an aircraft query and render the default engine variant.
pub fn handle_aircraft_command(
    source: &dyn DataSource,
    query: &str,
    format: OutputFormat,
) -> Result<String> {
    let aircraft = resolve::<Aircraft>(source, query)?;
    render_aircraft(&aircraft, format)
}

pub(crate) fn resolve<E: Searchable>(source: &dyn DataSource, query: &str) -> Result<E> {
    let outcome = Resolver::new(source).search::<E>(query)?;
    Ok(outcome.into_result()?)
}
