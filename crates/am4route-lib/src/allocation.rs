//! Fare-class allocators.
//!
//! Filling capacity class by class is piecewise linear in the demand
//! breakpoints, so the revenue optimum always sits on one of the vertices
//! produced by a priority ordering. Both allocators therefore evaluate every
//! ordering (six for passengers, two for cargo) and keep the best one.

use std::fmt;

use serde::Serialize;

use crate::demand::{CargoDemand, PaxDemand};
use crate::economics::{CargoFactors, Economics, SeatUnits};
use crate::game::GameMode;
use crate::ticket::{CargoTicket, PaxTicket, VipTicket};

/// Passenger class priority used to fill an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaxAlgorithm {
    Fjy,
    Fyj,
    Jfy,
    Jyf,
    Yjf,
    Yfj,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaxClass {
    Y,
    J,
    F,
}

impl PaxAlgorithm {
    /// Every real ordering, in tie-break order.
    pub const ORDERINGS: [PaxAlgorithm; 6] = [
        PaxAlgorithm::Fjy,
        PaxAlgorithm::Fyj,
        PaxAlgorithm::Jfy,
        PaxAlgorithm::Jyf,
        PaxAlgorithm::Yjf,
        PaxAlgorithm::Yfj,
    ];

    fn order(self) -> Option<[PaxClass; 3]> {
        use PaxClass::{F, J, Y};
        match self {
            PaxAlgorithm::Fjy => Some([F, J, Y]),
            PaxAlgorithm::Fyj => Some([F, Y, J]),
            PaxAlgorithm::Jfy => Some([J, F, Y]),
            PaxAlgorithm::Jyf => Some([J, Y, F]),
            PaxAlgorithm::Yjf => Some([Y, J, F]),
            PaxAlgorithm::Yfj => Some([Y, F, J]),
            PaxAlgorithm::None => None,
        }
    }
}

impl fmt::Display for PaxAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PaxAlgorithm::Fjy => "FJY",
            PaxAlgorithm::Fyj => "FYJ",
            PaxAlgorithm::Jfy => "JFY",
            PaxAlgorithm::Jyf => "JYF",
            PaxAlgorithm::Yjf => "YJF",
            PaxAlgorithm::Yfj => "YFJ",
            PaxAlgorithm::None => "NONE",
        };
        f.write_str(value)
    }
}

/// Per-seat fares the passenger allocator weighs classes by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassFares {
    pub y: f64,
    pub j: f64,
    pub f: f64,
}

impl From<PaxTicket> for ClassFares {
    fn from(ticket: PaxTicket) -> Self {
        Self {
            y: ticket.y,
            j: ticket.j,
            f: ticket.f,
        }
    }
}

impl From<VipTicket> for ClassFares {
    fn from(ticket: VipTicket) -> Self {
        Self {
            y: ticket.y,
            j: ticket.j,
            f: ticket.f,
        }
    }
}

/// Seats per class for one flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaxConfig {
    pub y: u16,
    pub j: u16,
    pub f: u16,
    pub valid: bool,
    pub algorithm: PaxAlgorithm,
}

impl PaxConfig {
    /// Configuration for an infeasible allocation.
    pub fn none() -> Self {
        Self {
            y: 0,
            j: 0,
            f: 0,
            valid: false,
            algorithm: PaxAlgorithm::None,
        }
    }

    /// Best configuration for passenger demand on a route of `distance` km.
    pub fn calc_pax_conf(
        demand: &PaxDemand,
        capacity: u32,
        distance: f64,
        game_mode: GameMode,
        economics: &Economics,
    ) -> Self {
        let ticket = PaxTicket::from_optimal_with(distance, game_mode, economics);
        Self::allocate(demand, capacity, &economics.seat_units, ticket.into())
    }

    /// Evaluate every ordering and keep the one with the highest projected revenue.
    pub fn allocate(
        demand: &PaxDemand,
        capacity: u32,
        units: &SeatUnits,
        fares: ClassFares,
    ) -> Self {
        if capacity == 0 || demand.is_empty() {
            return Self::none();
        }

        let mut best: Option<(PaxConfig, f64)> = None;
        for algorithm in PaxAlgorithm::ORDERINGS {
            let config = Self::with_algorithm(demand, capacity, units, algorithm);
            let revenue = config.revenue(fares);
            if best.map_or(true, |(_, top)| revenue > top) {
                best = Some((config, revenue));
            }
        }

        match best {
            Some((config, _)) if config.seats() > 0 => config,
            _ => Self::none(),
        }
    }

    /// Greedy fill: each class in turn takes as much of its demand as the remaining seat-units allow.
    pub fn with_algorithm(
        demand: &PaxDemand,
        capacity: u32,
        units: &SeatUnits,
        algorithm: PaxAlgorithm,
    ) -> Self {
        let Some(order) = algorithm.order() else {
            return Self::none();
        };

        let mut remaining = capacity;
        let mut config = Self {
            valid: true,
            algorithm,
            ..Self::none()
        };
        for class in order {
            let (wanted, size) = match class {
                PaxClass::Y => (demand.y, units.y),
                PaxClass::J => (demand.j, units.j),
                PaxClass::F => (demand.f, units.f),
            };
            let size = size.max(1);
            let seats = u32::from(wanted).min(remaining / size);
            remaining -= seats * size;
            // bounded by the u16 demand
            let seats = seats as u16;
            match class {
                PaxClass::Y => config.y = seats,
                PaxClass::J => config.j = seats,
                PaxClass::F => config.f = seats,
            }
        }
        config
    }

    pub fn seats(&self) -> u32 {
        u32::from(self.y) + u32::from(self.j) + u32::from(self.f)
    }

    /// Seat-units occupied by this configuration.
    pub fn used_units(&self, units: &SeatUnits) -> u32 {
        u32::from(self.y) * units.y + u32::from(self.j) * units.j + u32::from(self.f) * units.f
    }

    /// Ticket revenue of one full flight.
    pub fn revenue(&self, fares: ClassFares) -> f64 {
        f64::from(self.y) * fares.y + f64::from(self.j) * fares.j + f64::from(self.f) * fares.f
    }
}

impl fmt::Display for PaxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<PaxConfig {}|{}|{} valid={} algorithm={}>",
            self.y, self.j, self.f, self.valid, self.algorithm
        )
    }
}

/// Cargo class priority used to fill a hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CargoAlgorithm {
    L,
    H,
    None,
}

impl CargoAlgorithm {
    pub const ORDERINGS: [CargoAlgorithm; 2] = [CargoAlgorithm::L, CargoAlgorithm::H];
}

impl fmt::Display for CargoAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CargoAlgorithm::L => "L",
            CargoAlgorithm::H => "H",
            CargoAlgorithm::None => "NONE",
        };
        f.write_str(value)
    }
}

/// Usable capacity of one hold, in lbs per class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldCapacity {
    pub large: f64,
    pub heavy: f64,
}

impl HoldCapacity {
    pub fn new(capacity: u32, l_training: u8, h_training: u8, factors: &CargoFactors) -> Self {
        Self {
            large: factors.large_capacity(capacity, l_training),
            heavy: factors.heavy_capacity(capacity, h_training),
        }
    }
}

/// Percentage of the hold given to each cargo class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CargoConfig {
    pub l: u8,
    pub h: u8,
    pub valid: bool,
    pub algorithm: CargoAlgorithm,
}

impl CargoConfig {
    pub fn none() -> Self {
        Self {
            l: 0,
            h: 0,
            valid: false,
            algorithm: CargoAlgorithm::None,
        }
    }

    /// Best split of a hold of `capacity` lbs for cargo demand on a route of `distance` km.
    #[allow(clippy::too_many_arguments)]
    pub fn calc_cargo_conf(
        demand: &CargoDemand,
        capacity: u32,
        l_training: u8,
        h_training: u8,
        distance: f64,
        game_mode: GameMode,
        economics: &Economics,
    ) -> Self {
        let ticket = CargoTicket::from_optimal_with(distance, game_mode, economics);
        let hold = HoldCapacity::new(capacity, l_training, h_training, &economics.cargo);
        Self::allocate(demand, hold, &economics.cargo, ticket)
    }

    pub fn allocate(
        demand: &CargoDemand,
        hold: HoldCapacity,
        factors: &CargoFactors,
        ticket: CargoTicket,
    ) -> Self {
        if hold.large <= 0.0 || hold.heavy <= 0.0 || demand.is_empty() {
            return Self::none();
        }

        let mut best: Option<(CargoConfig, f64)> = None;
        for algorithm in CargoAlgorithm::ORDERINGS {
            let config = Self::with_algorithm(demand, hold, factors, algorithm);
            let revenue = config.revenue(hold, ticket);
            if best.map_or(true, |(_, top)| revenue > top) {
                best = Some((config, revenue));
            }
        }

        match best {
            Some((config, _)) if config.l > 0 || config.h > 0 => config,
            _ => Self::none(),
        }
    }

    /// Greedy fill in whole percent: the first class takes what its demand
    /// justifies, the second class gets what is left.
    pub fn with_algorithm(
        demand: &CargoDemand,
        hold: HoldCapacity,
        factors: &CargoFactors,
        algorithm: CargoAlgorithm,
    ) -> Self {
        let unit = f64::from(factors.demand_unit_lbs);
        let large_pct = |remaining: u8| share(f64::from(demand.l) * unit, hold.large, remaining);
        let heavy_pct = |remaining: u8| share(f64::from(demand.h) * unit, hold.heavy, remaining);

        let (l, h) = match algorithm {
            CargoAlgorithm::L => {
                let l = large_pct(100);
                (l, heavy_pct(100 - l))
            }
            CargoAlgorithm::H => {
                let h = heavy_pct(100);
                (large_pct(100 - h), h)
            }
            CargoAlgorithm::None => return Self::none(),
        };

        Self {
            l,
            h,
            valid: true,
            algorithm,
        }
    }

    /// Lbs of large and heavy cargo carried by one flight.
    pub fn loads(&self, hold: HoldCapacity) -> (f64, f64) {
        (
            f64::from(self.l) / 100.0 * hold.large,
            f64::from(self.h) / 100.0 * hold.heavy,
        )
    }

    /// Ticket revenue of one full flight.
    pub fn revenue(&self, hold: HoldCapacity, ticket: CargoTicket) -> f64 {
        let (large, heavy) = self.loads(hold);
        large * ticket.l + heavy * ticket.h
    }
}

fn share(demand_lbs: f64, capacity_lbs: f64, remaining: u8) -> u8 {
    if capacity_lbs <= 0.0 {
        return 0;
    }
    let pct = (demand_lbs / capacity_lbs * 100.0).floor();
    pct.clamp(0.0, f64::from(remaining)) as u8
}

impl fmt::Display for CargoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<CargoConfig {}%|{}% valid={} algorithm={}>",
            self.l, self.h, self.valid, self.algorithm
        )
    }
}
