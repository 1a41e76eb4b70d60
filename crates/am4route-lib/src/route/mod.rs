//! Route assembly.
//!
//! A [`Route`] pairs two airports with their direct distance and demand. A
//! [`Route`] flown by a specific aircraft becomes an [`AircraftRoute`], which
//! adds the stopover (when the aircraft lacks range), the seat or cargo
//! configuration, the ticket, and the projected load and income.
//!
//! Infeasible combinations are ordinary results: `valid` is false and
//! `invalid_reason` says why. Only data-layer failures are errors.

mod stopover;

pub use stopover::Stopover;

use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::aircraft::{Aircraft, AircraftType, Config, PurchasedAircraft};
use crate::airport::Airport;
use crate::allocation::{CargoConfig, HoldCapacity, PaxConfig};
use crate::demand::{CargoDemand, PaxDemand};
use crate::economics::{Economics, LoadModel};
use crate::error::Result;
use crate::game::{GameMode, User};
use crate::source::DataSource;
use crate::ticket::{CargoTicket, PaxTicket, Ticket, VipTicket};

static DEFAULT_ECONOMICS: Lazy<Economics> = Lazy::new(Economics::default);

/// An origin/destination pair with its direct distance and daily demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub origin: Airport,
    pub destination: Airport,
    pub pax_demand: PaxDemand,
    /// Great-circle distance in km.
    pub direct_distance: f64,
    pub valid: bool,
}

impl Route {
    /// Build a route between two airports.
    ///
    /// The route is invalid, and demand is not looked up, when either airport
    /// is the invalid placeholder or both are the same airport.
    pub fn create(source: &dyn DataSource, origin: &Airport, destination: &Airport) -> Result<Self> {
        if !origin.valid || !destination.valid || origin.id == destination.id {
            return Ok(Self {
                origin: origin.clone(),
                destination: destination.clone(),
                pax_demand: PaxDemand::default(),
                direct_distance: 0.0,
                valid: false,
            });
        }

        Ok(Self {
            origin: origin.clone(),
            destination: destination.clone(),
            pax_demand: source.pax_demand(origin.id, destination.id)?,
            direct_distance: origin.distance_to(destination),
            valid: true,
        })
    }

    /// Fly this route with `aircraft`. See [`AircraftRoute::from`].
    pub fn assign(
        &self,
        source: &dyn DataSource,
        aircraft: &Aircraft,
        options: &AssignOptions<'_>,
    ) -> Result<AircraftRoute> {
        AircraftRoute::from(source, self, aircraft, options)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return f.write_str("<Route invalid>");
        }
        write!(
            f,
            "<Route {}-{} direct_distance={:.3} pax_demand={}>",
            self.origin.iata, self.destination.iata, self.direct_distance, self.pax_demand
        )
    }
}

/// Inputs to [`AircraftRoute::from`] beyond the route and aircraft.
#[derive(Debug, Clone)]
pub struct AssignOptions<'a> {
    /// Flights per day; daily demand is split evenly between them.
    pub trips_per_day: u16,
    pub user: User,
    pub economics: &'a Economics,
}

impl<'a> AssignOptions<'a> {
    pub fn new(economics: &'a Economics) -> Self {
        Self {
            trips_per_day: 1,
            user: User::default(),
            economics,
        }
    }

    pub fn with_trips(mut self, trips_per_day: u16) -> Self {
        self.trips_per_day = trips_per_day;
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = user;
        self
    }
}

impl Default for AssignOptions<'static> {
    fn default() -> Self {
        Self::new(&DEFAULT_ECONOMICS)
    }
}

/// Why an [`AircraftRoute`] is not flyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    InvalidRoute,
    InvalidAircraft,
    DistanceTooShort,
    RunwayTooShort,
    NoStopover,
    NoFeasibleConfig,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            InvalidReason::InvalidRoute => "invalid route",
            InvalidReason::InvalidAircraft => "invalid aircraft",
            InvalidReason::DistanceTooShort => "distance too short",
            InvalidReason::RunwayTooShort => "runway too short",
            InvalidReason::NoStopover => "no stopover within range",
            InvalidReason::NoFeasibleConfig => "no feasible configuration",
        };
        f.write_str(value)
    }
}

/// A route flown by a configured aircraft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftRoute {
    pub route: Route,
    pub aircraft: PurchasedAircraft,
    pub ticket: Option<Ticket>,
    /// Daily income at full load.
    pub max_income: f64,
    /// Daily income at the estimated load.
    pub income: f64,
    pub load: f64,
    /// Hours per flight.
    pub flight_time: f64,
    pub needs_stopover: bool,
    pub stopover: Stopover,
    pub valid: bool,
    pub invalid_reason: Option<InvalidReason>,
}

impl AircraftRoute {
    fn rejected(route: &Route, aircraft: &Aircraft, reason: InvalidReason) -> Self {
        debug!(%reason, route = %route, aircraft = %aircraft.shortname, "route rejected");
        let needs_stopover = route.direct_distance > f64::from(aircraft.range);
        Self {
            route: route.clone(),
            aircraft: PurchasedAircraft::unconfigured(aircraft.clone()),
            ticket: None,
            max_income: 0.0,
            income: 0.0,
            load: 0.0,
            flight_time: 0.0,
            needs_stopover,
            stopover: Stopover::none(),
            valid: false,
            invalid_reason: Some(reason),
        }
    }

    /// Configure `aircraft` for `route` and project its daily income.
    ///
    /// Checks run in order: route validity, aircraft validity, minimum
    /// distance, runway length (realism only), range and stopover search,
    /// then allocation. The first failing check decides the `invalid_reason`.
    /// `needs_stopover` reflects direct distance against range on every
    /// outcome, rejected or not.
    pub fn from(
        source: &dyn DataSource,
        route: &Route,
        aircraft: &Aircraft,
        options: &AssignOptions<'_>,
    ) -> Result<Self> {
        if !route.valid {
            return Ok(Self::rejected(route, aircraft, InvalidReason::InvalidRoute));
        }
        if !aircraft.valid {
            return Ok(Self::rejected(route, aircraft, InvalidReason::InvalidAircraft));
        }

        let user = &options.user;
        let economics = options.economics;
        let game_mode = user.game_mode;

        if route.direct_distance < economics.min_route_distance {
            return Ok(Self::rejected(route, aircraft, InvalidReason::DistanceTooShort));
        }
        if game_mode == GameMode::Realism
            && (route.origin.rwy < aircraft.rwy || route.destination.rwy < aircraft.rwy)
        {
            return Ok(Self::rejected(route, aircraft, InvalidReason::RunwayTooShort));
        }

        let needs_stopover = route.direct_distance > f64::from(aircraft.range);
        let stopover = if needs_stopover {
            Stopover::find_by_efficiency(
                source,
                &route.origin,
                &route.destination,
                aircraft,
                game_mode,
            )?
        } else {
            Stopover::none()
        };
        if needs_stopover && !stopover.exists {
            return Ok(Self::rejected(route, aircraft, InvalidReason::NoStopover));
        }
        let distance = if needs_stopover {
            stopover.full_distance
        } else {
            route.direct_distance
        };

        let trips = options.trips_per_day.max(1);
        let demand = route.pax_demand.per_flight(trips);
        let (config, ticket, revenue) = match aircraft.ac_type {
            AircraftType::Pax => {
                let ticket = PaxTicket::from_optimal_with(distance, game_mode, economics);
                let config = PaxConfig::calc_pax_conf(
                    &demand,
                    aircraft.capacity,
                    distance,
                    game_mode,
                    economics,
                );
                (
                    Config::Pax(config),
                    Ticket::Pax(ticket),
                    config.revenue(ticket.into()),
                )
            }
            AircraftType::Vip => {
                let ticket = VipTicket::from_optimal_with(distance, economics);
                let config = PaxConfig::allocate(
                    &demand,
                    aircraft.capacity,
                    &economics.seat_units,
                    ticket.into(),
                );
                (
                    Config::Pax(config),
                    Ticket::Vip(ticket),
                    config.revenue(ticket.into()),
                )
            }
            AircraftType::Cargo => {
                let ticket = CargoTicket::from_optimal_with(distance, game_mode, economics);
                let config = CargoConfig::calc_cargo_conf(
                    &CargoDemand::from(demand),
                    aircraft.capacity,
                    user.l_training,
                    user.h_training,
                    distance,
                    game_mode,
                    economics,
                );
                let hold = HoldCapacity::new(
                    aircraft.capacity,
                    user.l_training,
                    user.h_training,
                    &economics.cargo,
                );
                (
                    Config::Cargo(config),
                    Ticket::Cargo(ticket),
                    config.revenue(hold, ticket),
                )
            }
        };

        let purchased = PurchasedAircraft {
            aircraft: aircraft.clone(),
            config,
        };
        if !config.is_valid() {
            let mut result = Self::rejected(route, aircraft, InvalidReason::NoFeasibleConfig);
            result.aircraft = purchased;
            result.stopover = stopover;
            return Ok(result);
        }

        let load = if user.override_load {
            user.load.clamp(0.0, 1.0)
        } else {
            Self::estimate_load(
                user.reputation,
                user.autoprice_ratio,
                needs_stopover,
                &economics.load,
            )
        };
        let max_income = f64::from(trips) * revenue;
        let speed = f64::from(aircraft.speed) * economics.speed_multiplier(game_mode);

        Ok(Self {
            route: route.clone(),
            aircraft: purchased,
            ticket: Some(ticket),
            max_income,
            income: max_income * load,
            load,
            flight_time: distance / speed,
            needs_stopover,
            stopover,
            valid: true,
            invalid_reason: None,
        })
    }

    /// Expected load factor in `[0, 1]`.
    ///
    /// Reputation sets the base load. Pricing above the autoprice ceiling
    /// scales it down linearly and a stopover costs a fixed penalty.
    pub fn estimate_load(
        reputation: f64,
        autoprice_ratio: f64,
        has_stopover: bool,
        model: &LoadModel,
    ) -> f64 {
        let mut load = (model.reputation_slope * reputation + model.intercept).clamp(0.0, 1.0);
        if autoprice_ratio > model.autoprice_ceiling {
            let overprice = autoprice_ratio - model.autoprice_ceiling;
            load *= (1.0 - model.overprice_sensitivity * overprice).max(0.0);
        }
        if has_stopover {
            load -= model.stopover_penalty;
        }
        load.clamp(0.0, 1.0)
    }

    /// Distance actually flown, through the stopover when there is one.
    pub fn effective_distance(&self) -> f64 {
        if self.needs_stopover && self.stopover.exists {
            self.stopover.full_distance
        } else {
            self.route.direct_distance
        }
    }
}

impl fmt::Display for AircraftRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            let reason = self
                .invalid_reason
                .map(|reason| reason.to_string())
                .unwrap_or_default();
            return write!(f, "<AircraftRoute invalid reason='{reason}'>");
        }
        let ticket = self
            .ticket
            .map(|ticket| ticket.to_string())
            .unwrap_or_default();
        write!(
            f,
            "<AircraftRoute route={} aircraft={} ticket={} max_income={:.2} income={:.2} \
             load={:.4} flight_time={:.3} needs_stopover={} stopover={}>",
            self.route,
            self.aircraft,
            ticket,
            self.max_income,
            self.income,
            self.load,
            self.flight_time,
            self.needs_stopover,
            self.stopover
        )
    }
}
