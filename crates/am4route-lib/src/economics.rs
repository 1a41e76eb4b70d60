//! Game economics constants.
//!
//! Every number the engine uses to turn distance, demand and reputation into
//! money lives here so it can be checked against the live game and overridden
//! from a JSON file without touching the algorithms. [`Economics::default`]
//! holds the published game values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::game::GameMode;

/// Closed-form fare curve: `floor(markup * (slope * d + intercept)) / divisor - offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareCurve {
    pub slope: f64,
    pub intercept: f64,
    pub markup: f64,
    #[serde(default = "unit_divisor")]
    pub divisor: f64,
    #[serde(default)]
    pub offset: f64,
}

fn unit_divisor() -> f64 {
    1.0
}

impl FareCurve {
    const fn seats(slope: f64, intercept: f64, markup: f64) -> Self {
        Self {
            slope,
            intercept,
            markup,
            divisor: 1.0,
            offset: 2.0,
        }
    }

    const fn per_lb(slope: f64, intercept: f64, markup: f64) -> Self {
        Self {
            slope,
            intercept,
            markup,
            divisor: 100.0,
            offset: 0.0,
        }
    }

    /// Fare for a route of `distance` km. Never negative.
    pub fn price(&self, distance: f64) -> f64 {
        let raw = (self.markup * (self.slope * distance + self.intercept)).floor();
        (raw / self.divisor - self.offset).max(0.0)
    }
}

/// Fare curves for the three passenger classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaxFares {
    pub y: FareCurve,
    pub j: FareCurve,
    pub f: FareCurve,
}

/// Fare curves for the two cargo classes, priced per lb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CargoFares {
    pub l: FareCurve,
    pub h: FareCurve,
}

/// A value that differs between easy and realism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByMode<T> {
    pub easy: T,
    pub realism: T,
}

impl<T> ByMode<T> {
    pub fn get(&self, mode: GameMode) -> &T {
        match mode {
            GameMode::Easy => &self.easy,
            GameMode::Realism => &self.realism,
        }
    }
}

/// Physical seat-units occupied by one passenger of each class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatUnits {
    pub y: u32,
    pub j: u32,
    pub f: u32,
}

impl Default for SeatUnits {
    fn default() -> Self {
        Self { y: 1, j: 2, f: 3 }
    }
}

/// How cargo demand and hold capacity convert into each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoFactors {
    /// Share of the nominal capacity usable for large cargo.
    pub large_efficiency: f64,
    /// Share of the nominal capacity usable for heavy cargo.
    pub heavy_efficiency: f64,
    /// Capacity gained per training level.
    pub training_bonus: f64,
    /// Lbs represented by one unit of cargo demand.
    pub demand_unit_lbs: u32,
}

impl Default for CargoFactors {
    fn default() -> Self {
        Self {
            large_efficiency: 0.7,
            heavy_efficiency: 1.0,
            training_bonus: 0.01,
            demand_unit_lbs: 1000,
        }
    }
}

impl CargoFactors {
    /// Usable large-cargo lbs for a hold of `capacity` lbs.
    pub fn large_capacity(&self, capacity: u32, l_training: u8) -> f64 {
        f64::from(capacity)
            * self.large_efficiency
            * (1.0 + self.training_bonus * f64::from(l_training))
    }

    /// Usable heavy-cargo lbs for a hold of `capacity` lbs.
    pub fn heavy_capacity(&self, capacity: u32, h_training: u8) -> f64 {
        f64::from(capacity)
            * self.heavy_efficiency
            * (1.0 + self.training_bonus * f64::from(h_training))
    }
}

/// Demand-to-load conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadModel {
    /// Load gained per reputation point.
    pub reputation_slope: f64,
    pub intercept: f64,
    /// Upper end of the autoprice sweet spot; pricier tickets lose passengers.
    pub autoprice_ceiling: f64,
    /// Load lost per unit of autoprice ratio above the ceiling.
    pub overprice_sensitivity: f64,
    /// Load lost when the route flies through a stopover.
    pub stopover_penalty: f64,
}

impl Default for LoadModel {
    fn default() -> Self {
        Self {
            reputation_slope: 0.01,
            intercept: 0.0,
            autoprice_ceiling: 1.1,
            overprice_sensitivity: 2.0,
            stopover_penalty: 0.05,
        }
    }
}

/// All tunable game constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Economics {
    pub seat_units: SeatUnits,
    pub pax_fares: ByMode<PaxFares>,
    pub cargo_fares: ByMode<CargoFares>,
    pub vip_fares: PaxFares,
    pub cargo: CargoFactors,
    pub load: LoadModel,
    /// Cruise speed multiplier applied in easy mode.
    pub easy_speed_multiplier: f64,
    /// Routes shorter than this many km are not flyable.
    pub min_route_distance: f64,
}

const VIP_BASE: f64 = 1.7489;

impl Default for Economics {
    fn default() -> Self {
        Self {
            seat_units: SeatUnits::default(),
            pax_fares: ByMode {
                easy: PaxFares {
                    y: FareCurve::seats(0.4, 170.0, 1.10),
                    j: FareCurve::seats(0.8, 560.0, 1.08),
                    f: FareCurve::seats(1.2, 1200.0, 1.06),
                },
                realism: PaxFares {
                    y: FareCurve::seats(0.3, 150.0, 1.10),
                    j: FareCurve::seats(0.6, 500.0, 1.08),
                    f: FareCurve::seats(0.9, 1000.0, 1.06),
                },
            },
            cargo_fares: ByMode {
                easy: CargoFares {
                    l: FareCurve::per_lb(0.094_828_372_458_125_2, 85.204_543_264_237_7, 1.10),
                    h: FareCurve::per_lb(0.068_966_357_764_027_5, 28.298_112_427_289_3, 1.08),
                },
                realism: CargoFares {
                    l: FareCurve::per_lb(0.077_632_182_203_937_4, 85.056_760_036_780_7, 1.10),
                    h: FareCurve::per_lb(0.051_774_279_940_924_8, 24.636_991_539_641_4, 1.08),
                },
            },
            vip_fares: PaxFares {
                y: FareCurve::seats(0.4, 170.0, 1.22 * VIP_BASE),
                j: FareCurve::seats(0.8, 560.0, 1.20 * VIP_BASE),
                f: FareCurve::seats(1.2, 1200.0, 1.17 * VIP_BASE),
            },
            cargo: CargoFactors::default(),
            load: LoadModel::default(),
            easy_speed_multiplier: 1.5,
            min_route_distance: 100.0,
        }
    }
}

impl Economics {
    /// Load constants from a JSON file.
    ///
    /// Missing fields keep their defaults, except inside fare curves: a
    /// fare section given in the file replaces the default curves whole.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let economics = Self::from_json(&contents)?;
        debug!(path = %path.display(), "loaded economics overrides");
        Ok(economics)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Effective cruise speed multiplier for the game mode.
    pub fn speed_multiplier(&self, mode: GameMode) -> f64 {
        match mode {
            GameMode::Easy => self.easy_speed_multiplier,
            GameMode::Realism => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_fares_match_game_rounding() {
        let fares = Economics::default().pax_fares.easy;
        // floor(1.10 * (0.4 * 1000 + 170)) - 2
        assert_eq!(fares.y.price(1000.0), 625.0);
        // floor(1.08 * (0.8 * 1000 + 560)) - 2
        assert_eq!(fares.j.price(1000.0), 1466.0);
        // floor(1.06 * (1.2 * 1000 + 1200)) - 2
        assert_eq!(fares.f.price(1000.0), 2542.0);
    }

    #[test]
    fn cargo_fares_are_per_lb() {
        let fares = Economics::default().cargo_fares.easy;
        let l = fares.l.price(1000.0);
        assert!(l > 1.0 && l < 2.0, "large fare per lb was {l}");
        assert!(fares.h.price(1000.0) < l);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let economics =
            Economics::from_json(r#"{ "seat_units": { "y": 1, "j": 3, "f": 4 } }"#).unwrap();
        assert_eq!(economics.seat_units.j, 3);
        assert_eq!(economics.load, LoadModel::default());
        assert_eq!(economics.pax_fares, Economics::default().pax_fares);
    }

    #[test]
    fn partial_nested_section_keeps_sibling_defaults() {
        let economics = Economics::from_json(
            r#"{ "load": { "stopover_penalty": 0.1 }, "cargo": { "training_bonus": 0.02 } }"#,
        )
        .unwrap();
        assert_eq!(economics.load.stopover_penalty, 0.1);
        assert_eq!(
            economics.load.reputation_slope,
            LoadModel::default().reputation_slope
        );
        assert_eq!(economics.cargo.training_bonus, 0.02);
        assert_eq!(economics.cargo.demand_unit_lbs, 1000);
        assert_eq!(economics.min_route_distance, 100.0);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(Economics::from_json("{ seat_units: 3 }").is_err());
    }

    #[test]
    fn large_capacity_grows_with_training() {
        let factors = CargoFactors::default();
        assert!((factors.large_capacity(100_000, 0) - 70_000.0).abs() < 1e-6);
        assert!((factors.large_capacity(100_000, 6) - 74_200.0).abs() < 1e-6);
        assert!((factors.heavy_capacity(100_000, 0) - 100_000.0).abs() < 1e-6);
    }
}
