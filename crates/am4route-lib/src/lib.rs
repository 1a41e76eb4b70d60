//! am4route library entry points.
//!
//! This crate resolves Airline Manager 4 airports and aircraft from free-text
//! queries, prices tickets, allocates seats and cargo space, searches
//! stopovers and projects the daily income of a route. Higher-level
//! consumers (the CLI) should only depend on the items exported here instead
//! of reimplementing behavior.
//!

#![deny(warnings)]

pub mod aircraft;
pub mod airport;
pub mod allocation;
pub mod catalog;
pub mod dataset;
pub mod db;
pub mod demand;
pub mod economics;
pub mod error;
pub mod game;
pub mod geo;
pub mod output;
pub mod route;
pub mod search;
pub mod source;
pub mod ticket;

pub use aircraft::{Aircraft, AircraftSearchType, AircraftType, Config, PurchasedAircraft};
pub use airport::{Airport, AirportSearchType};
pub use allocation::{CargoAlgorithm, CargoConfig, PaxAlgorithm, PaxConfig};
pub use dataset::{default_dataset_path, load_dataset, resolve_dataset_path};
pub use db::{load_reference_data, DemandRecord, ReferenceData};
pub use demand::{CargoDemand, PaxDemand};
pub use economics::Economics;
pub use error::{Error, Result};
pub use game::{GameMode, User};
pub use output::{AircraftRouteSummary, RouteRenderMode};
pub use route::{AircraftRoute, AssignOptions, InvalidReason, Route, Stopover};
pub use search::{ParseResult, Resolver, SearchOutcome, SearchResult, Suggestion};
pub use source::DataSource;
pub use ticket::{CargoTicket, PaxTicket, Ticket, VipTicket};
