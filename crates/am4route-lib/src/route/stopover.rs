use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::aircraft::Aircraft;
use crate::airport::Airport;
use crate::error::Result;
use crate::game::GameMode;
use crate::source::DataSource;

/// Intermediate airport splitting a route that exceeds the aircraft's range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stopover {
    pub airport: Airport,
    /// Length of both legs combined, in km.
    pub full_distance: f64,
    pub exists: bool,
}

impl Stopover {
    /// No usable stopover.
    pub fn none() -> Self {
        Self {
            airport: Airport::invalid(),
            full_distance: 0.0,
            exists: false,
        }
    }

    pub fn new(airport: Airport, full_distance: f64) -> Self {
        Self {
            airport,
            full_distance,
            exists: true,
        }
    }

    /// The stopover that adds the least distance over the direct route.
    ///
    /// Candidates must keep both legs within range and, in realism, have a
    /// runway long enough for the aircraft. Efficiency is
    /// `direct / (leg1 + leg2)`; the first airport reaching the best value wins.
    pub fn find_by_efficiency(
        source: &dyn DataSource,
        origin: &Airport,
        destination: &Airport,
        aircraft: &Aircraft,
        game_mode: GameMode,
    ) -> Result<Self> {
        let direct = origin.distance_to(destination);
        let range = f64::from(aircraft.range);
        if direct > 2.0 * range {
            debug!(direct, range, "route too long for a single stopover");
            return Ok(Self::none());
        }

        let mut best: Option<(&Airport, f64, f64)> = None;
        for candidate in source.airports()? {
            if candidate.id == origin.id || candidate.id == destination.id {
                continue;
            }
            if game_mode == GameMode::Realism && candidate.rwy < aircraft.rwy {
                continue;
            }
            let first = origin.distance_to(candidate);
            if first > range {
                continue;
            }
            let second = candidate.distance_to(destination);
            if second > range {
                continue;
            }
            let total = first + second;
            if total <= 0.0 {
                continue;
            }
            let efficiency = direct / total;
            if best.map_or(true, |(_, _, top)| efficiency > top) {
                best = Some((candidate, total, efficiency));
            }
        }

        Ok(match best {
            Some((airport, total, _)) => Self::new(airport.clone(), total),
            None => Self::none(),
        })
    }
}

impl fmt::Display for Stopover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.exists {
            return f.write_str("<Stopover none>");
        }
        write!(
            f,
            "<Stopover airport={} full_distance={:.3}>",
            self.airport.iata, self.full_distance
        )
    }
}
