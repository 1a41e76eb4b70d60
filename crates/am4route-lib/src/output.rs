use std::fmt::Write;

use serde::Serialize;

use crate::aircraft::{AircraftType, Config};
use crate::airport::{Airport, AirportId};
use crate::demand::PaxDemand;
use crate::route::{AircraftRoute, InvalidReason};
use crate::ticket::Ticket;

/// Presentation style for turning an [`AircraftRouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Airport reference within a summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: AirportId,
    pub iata: String,
    pub icao: String,
    pub name: String,
}

impl RouteEndpoint {
    fn from_airport(airport: &Airport) -> Self {
        Self {
            id: airport.id,
            iata: airport.iata.clone(),
            icao: airport.icao.clone(),
            name: airport.name.clone(),
        }
    }

    fn code(&self) -> &str {
        if self.iata.is_empty() {
            &self.icao
        } else {
            &self.iata
        }
    }
}

/// Flat view of an [`AircraftRoute`] that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AircraftRouteSummary {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<InvalidReason>,
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    pub aircraft: String,
    pub aircraft_type: AircraftType,
    pub pax_demand: PaxDemand,
    pub direct_distance: f64,
    /// Distance actually flown, through the stopover when there is one.
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopover: Option<RouteEndpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
    pub flight_time_hours: f64,
    pub load: f64,
    pub max_income: f64,
    pub income: f64,
}

impl AircraftRouteSummary {
    pub fn from_route(route: &AircraftRoute) -> Self {
        let stopover = (route.needs_stopover && route.stopover.exists)
            .then(|| RouteEndpoint::from_airport(&route.stopover.airport));
        Self {
            valid: route.valid,
            invalid_reason: route.invalid_reason,
            origin: RouteEndpoint::from_airport(&route.route.origin),
            destination: RouteEndpoint::from_airport(&route.route.destination),
            aircraft: route.aircraft.aircraft.shortname.clone(),
            aircraft_type: route.aircraft.aircraft.ac_type,
            pax_demand: route.route.pax_demand,
            direct_distance: route.route.direct_distance,
            distance: route.effective_distance(),
            stopover,
            config: route.valid.then_some(route.aircraft.config),
            ticket: route.ticket,
            flight_time_hours: route.flight_time,
            load: route.load,
            max_income: route.max_income,
            income: route.income,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn headline(&self) -> String {
        format!(
            "{} ({}) -> {} ({}) with {} [{}]",
            self.origin.code(),
            self.origin.name,
            self.destination.code(),
            self.destination.name,
            self.aircraft,
            self.aircraft_type
        )
    }

    fn reason(&self) -> String {
        self.invalid_reason
            .map(|reason| reason.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Route: {}", self.headline());
        if !self.valid {
            let _ = writeln!(buffer, "  not flyable: {}", self.reason());
            return buffer;
        }

        match &self.stopover {
            Some(stopover) => {
                let _ = writeln!(
                    buffer,
                    "  distance: {:.1} km direct, {:.1} km via {}",
                    self.direct_distance,
                    self.distance,
                    stopover.code()
                );
            }
            None => {
                let _ = writeln!(buffer, "  distance: {:.1} km", self.distance);
            }
        }
        let _ = writeln!(
            buffer,
            "  demand: Y {} / J {} / F {}",
            self.pax_demand.y, self.pax_demand.j, self.pax_demand.f
        );
        if let Some(config) = &self.config {
            let _ = writeln!(buffer, "  config: {}", config_line(config));
        }
        if let Some(ticket) = &self.ticket {
            let _ = writeln!(buffer, "  ticket: {}", ticket_line(ticket));
        }
        let _ = writeln!(buffer, "  flight time: {:.2} h", self.flight_time_hours);
        let _ = writeln!(buffer, "  load: {:.1} %", self.load * 100.0);
        let _ = writeln!(
            buffer,
            "  income: ${:.0} per day (max ${:.0})",
            self.income, self.max_income
        );
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "**Route** _{}_", self.headline());
        if !self.valid {
            let _ = writeln!(buffer, "* not flyable: `{}`", self.reason());
            return buffer;
        }
        let via = self
            .stopover
            .as_ref()
            .map(|stopover| format!(" via **{}**", stopover.code()))
            .unwrap_or_default();
        let _ = writeln!(buffer, "* distance: `{:.1} km`{via}", self.distance);
        if let Some(config) = &self.config {
            let _ = writeln!(buffer, "* config: `{}`", config_line(config));
        }
        if let Some(ticket) = &self.ticket {
            let _ = writeln!(buffer, "* ticket: `{}`", ticket_line(ticket));
        }
        let _ = writeln!(
            buffer,
            "* income: **${:.0}**/day at {:.1} % load",
            self.income,
            self.load * 100.0
        );
        buffer
    }
}

/// One-line description of a seat or cargo split.
pub fn config_line(config: &Config) -> String {
    match config {
        Config::Pax(pax) => format!(
            "Y {} / J {} / F {} ({})",
            pax.y, pax.j, pax.f, pax.algorithm
        ),
        Config::Cargo(cargo) => format!("L {}% / H {}% ({})", cargo.l, cargo.h, cargo.algorithm),
    }
}

/// One-line description of ticket prices.
pub fn ticket_line(ticket: &Ticket) -> String {
    match ticket {
        Ticket::Pax(t) => format!("Y ${} / J ${} / F ${}", t.y, t.j, t.f),
        Ticket::Vip(t) => format!("Y ${} / J ${} / F ${} (VIP)", t.y, t.j, t.f),
        Ticket::Cargo(t) => format!("L ${:.2}/lb / H ${:.2}/lb", t.l, t.h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::{Aircraft, PurchasedAircraft};
    use crate::allocation::{PaxAlgorithm, PaxConfig};
    use crate::route::{Route, Stopover};
    use crate::ticket::PaxTicket;
    use crate::GameMode;

    fn airport(id: AirportId, iata: &str, name: &str) -> Airport {
        Airport {
            id,
            iata: iata.to_string(),
            icao: format!("X{iata}"),
            name: name.to_string(),
            valid: true,
            ..Airport::default()
        }
    }

    fn sample(valid: bool) -> AircraftRoute {
        let aircraft = Aircraft {
            shortname: "b744".to_string(),
            valid: true,
            ..Aircraft::default()
        };
        AircraftRoute {
            route: Route {
                origin: airport(1, "HKG", "Hong Kong"),
                destination: airport(2, "LHR", "London Heathrow"),
                pax_demand: PaxDemand::new(300, 60, 20),
                direct_distance: 9630.8,
                valid: true,
            },
            aircraft: PurchasedAircraft {
                aircraft,
                config: Config::Pax(PaxConfig {
                    y: 280,
                    j: 30,
                    f: 20,
                    valid: true,
                    algorithm: PaxAlgorithm::Fjy,
                }),
            },
            ticket: Some(Ticket::Pax(PaxTicket::from_optimal(9700.0, GameMode::Easy))),
            max_income: 1000.0,
            income: 870.0,
            load: 0.87,
            flight_time: 7.25,
            needs_stopover: true,
            stopover: Stopover::new(airport(3, "DEL", "Delhi"), 9700.0),
            valid,
            invalid_reason: (!valid).then_some(InvalidReason::NoStopover),
        }
    }

    #[test]
    fn plain_text_lists_stopover_and_income() {
        let text = AircraftRouteSummary::from_route(&sample(true)).render(RouteRenderMode::PlainText);
        assert!(text.starts_with("Route: HKG (Hong Kong) -> LHR (London Heathrow) with b744 [PAX]"));
        assert!(text.contains("9630.8 km direct, 9700.0 km via DEL"));
        assert!(text.contains("config: Y 280 / J 30 / F 20 (FJY)"));
        assert!(text.contains("income: $870 per day (max $1000)"));
    }

    #[test]
    fn invalid_routes_show_reason_only() {
        let summary = AircraftRouteSummary::from_route(&sample(false));
        assert!(summary.config.is_none());
        let text = summary.render(RouteRenderMode::PlainText);
        assert!(text.contains("not flyable: no stopover within range"));
        assert!(!text.contains("income"));
    }

    #[test]
    fn json_skips_absent_fields() {
        let summary = AircraftRouteSummary::from_route(&sample(false));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["invalid_reason"], "no_stopover");
        assert!(json.get("config").is_none());
    }

    #[test]
    fn rich_text_marks_stopover() {
        let text = AircraftRouteSummary::from_route(&sample(true)).render(RouteRenderMode::RichText);
        assert!(text.contains("via **DEL**"));
    }
}
