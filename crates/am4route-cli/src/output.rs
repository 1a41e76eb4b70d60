//! Output formatting for CLI results.
//!
//! Route summaries come from the library; this module decides how they reach
//! the terminal (plain text, markdown, colored text or JSON).

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use am4route_lib::output::{config_line, ticket_line};
use am4route_lib::{Aircraft, AircraftRouteSummary, Airport, RouteRenderMode};

use crate::terminal::{format_money, format_with_separators, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text.
    #[default]
    Text,
    /// Colored terminal output.
    Rich,
    /// Markdown, suitable for pasting into chat.
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

/// Render a route summary.
pub fn render_route(
    summary: &AircraftRouteSummary,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(summary.render(RouteRenderMode::PlainText)),
        OutputFormat::Markdown => Ok(summary.render(RouteRenderMode::RichText)),
        OutputFormat::Rich => Ok(render_rich_route(summary, palette)),
        OutputFormat::Json => to_json(summary),
    }
}

fn render_rich_route(summary: &AircraftRouteSummary, p: ColorPalette) -> String {
    let mut buffer = String::new();
    let badge = if summary.valid {
        format!("{} FLYABLE {}", p.tag_ok, p.reset)
    } else {
        format!("{} NOT FLYABLE {}", p.tag_fail, p.reset)
    };
    let _ = writeln!(
        buffer,
        "{badge} {wb}{}{r} -> {wb}{}{r} with {wb}{}{r} [{}]",
        code(&summary.origin.iata, &summary.origin.icao),
        code(&summary.destination.iata, &summary.destination.icao),
        summary.aircraft,
        summary.aircraft_type,
        wb = p.white_bold,
        r = p.reset,
    );

    if !summary.valid {
        if let Some(reason) = summary.invalid_reason {
            let _ = writeln!(buffer, "  {}reason{}    {reason}", p.gray, p.reset);
        }
        return buffer;
    }

    let via = summary
        .stopover
        .as_ref()
        .map(|stopover| format!(" via {}", code(&stopover.iata, &stopover.icao)))
        .unwrap_or_default();
    let _ = writeln!(
        buffer,
        "  {}distance{}  {}{:.1} km{}{via}",
        p.gray, p.reset, p.cyan, summary.distance, p.reset
    );
    if let Some(config) = &summary.config {
        let _ = writeln!(buffer, "  {}config{}    {}", p.gray, p.reset, config_line(config));
    }
    if let Some(ticket) = &summary.ticket {
        let _ = writeln!(buffer, "  {}ticket{}    {}", p.gray, p.reset, ticket_line(ticket));
    }
    let _ = writeln!(
        buffer,
        "  {}load{}      {:.1} %",
        p.gray,
        p.reset,
        summary.load * 100.0
    );
    let _ = writeln!(
        buffer,
        "  {}income{}    {}{}{} per day (max {})",
        p.gray,
        p.reset,
        p.green,
        format_money(summary.income),
        p.reset,
        format_money(summary.max_income)
    );
    buffer
}

/// Render a resolved airport.
pub fn render_airport(airport: &Airport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(airport);
    }
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}/{} {} (id {})",
        airport.iata, airport.icao, airport.name, airport.id
    );
    if !airport.fullname.is_empty() {
        let _ = writeln!(buffer, "  {}", airport.fullname);
    }
    if !airport.country.is_empty() {
        let _ = writeln!(buffer, "  {}, {}", airport.country, airport.continent);
    }
    let _ = writeln!(
        buffer,
        "  location: {:.4}, {:.4}",
        airport.lat, airport.lng
    );
    let _ = writeln!(
        buffer,
        "  runway: {} ft, market: {} %, hub cost: {}",
        format_with_separators(u64::from(airport.rwy)),
        airport.market,
        format_money(f64::from(airport.hub_cost))
    );
    Ok(buffer)
}

/// Render a resolved aircraft.
pub fn render_aircraft(aircraft: &Aircraft, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(aircraft);
    }
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{} {} {} [{}] (id {})",
        aircraft.shortname, aircraft.manufacturer, aircraft.name, aircraft.ac_type, aircraft.id
    );
    if !aircraft.ename.is_empty() {
        let _ = writeln!(buffer, "  engine: {}", aircraft.ename);
    }
    let _ = writeln!(
        buffer,
        "  capacity: {}, range: {} km, speed: {} km/h",
        format_with_separators(u64::from(aircraft.capacity)),
        format_with_separators(u64::from(aircraft.range)),
        aircraft.speed
    );
    let _ = writeln!(
        buffer,
        "  runway: {} ft, cost: {}",
        format_with_separators(u64::from(aircraft.rwy)),
        format_money(f64::from(aircraft.cost))
    );
    Ok(buffer)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    json.push('\n');
    Ok(json)
}

fn code<'a>(iata: &'a str, icao: &'a str) -> &'a str {
    if iata.is_empty() {
        icao
    } else {
        iata
    }
}
