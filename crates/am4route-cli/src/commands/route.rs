//! `route` subcommand: assign an aircraft to an airport pair.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use tracing::debug;

use am4route_lib::{
    Aircraft, AircraftRoute, AircraftRouteSummary, Airport, AssignOptions, DataSource, Economics,
    GameMode, Route, User,
};

use super::lookup::resolve;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Origin airport query.
    pub from: String,
    /// Destination airport query.
    pub to: String,
    /// Aircraft query.
    pub aircraft: String,
    pub trips_per_day: u16,
    pub game_mode: GameMode,
    /// Airline reputation, 0-100.
    pub reputation: Option<f64>,
    /// Ticket price relative to the in-game autoprice.
    pub autoprice_ratio: Option<f64>,
    pub l_training: u8,
    pub h_training: u8,
    /// Fixed load factor replacing the estimate, 0-1.
    pub load: Option<f64>,
    /// JSON file overriding the game constants.
    pub economics: Option<PathBuf>,
}

impl RouteCommandArgs {
    /// Player settings derived from the flags.
    pub fn user(&self) -> Result<User> {
        ensure!(
            self.l_training <= 6 && self.h_training <= 6,
            "cargo training levels must be between 0 and 6"
        );
        let mut user = User::for_mode(self.game_mode);
        if let Some(reputation) = self.reputation {
            ensure!(
                (0.0..=100.0).contains(&reputation),
                "--reputation must be between 0 and 100"
            );
            user.reputation = reputation;
        }
        if let Some(ratio) = self.autoprice_ratio {
            ensure!(
                ratio.is_finite() && ratio > 0.0,
                "--autoprice-ratio must be a positive number"
            );
            user.autoprice_ratio = ratio;
        }
        user.l_training = self.l_training;
        user.h_training = self.h_training;
        if let Some(load) = self.load {
            ensure!((0.0..=1.0).contains(&load), "--load must be between 0 and 1");
            user.override_load = true;
            user.load = load;
        }
        Ok(user)
    }

    fn economics(&self) -> Result<Economics> {
        match &self.economics {
            Some(path) => Economics::from_path(path).with_context(|| {
                format!("failed to load economics from {}", path.display())
            }),
            None => Ok(Economics::default()),
        }
    }
}

/// Resolve the queries, assign the aircraft and summarise the result.
///
/// A route that cannot be flown is still a summary (with `valid: false`);
/// only unresolvable queries and data errors fail.
pub fn handle_route_command(
    source: &dyn DataSource,
    args: &RouteCommandArgs,
) -> Result<AircraftRouteSummary> {
    ensure!(args.trips_per_day >= 1, "--trips must be at least 1");
    let user = args.user()?;
    let economics = args.economics()?;

    let origin = resolve::<Airport>(source, &args.from).context("unknown origin")?;
    let destination = resolve::<Airport>(source, &args.to).context("unknown destination")?;
    let aircraft = resolve::<Aircraft>(source, &args.aircraft).context("unknown aircraft")?;
    debug!(%user, "assigning aircraft");

    let route = Route::create(source, &origin, &destination)?;
    let options = AssignOptions::new(&economics)
        .with_trips(args.trips_per_day)
        .with_user(user);
    let assigned = AircraftRoute::from(source, &route, &aircraft, &options)?;
    Ok(AircraftRouteSummary::from_route(&assigned))
}
