//! Optimal ("autoprice") ticket fares.
//!
//! Fares depend only on route distance and game mode, never on demand.

use std::fmt;

use serde::Serialize;

use crate::economics::Economics;
use crate::game::GameMode;

/// Passenger fares per seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaxTicket {
    pub y: f64,
    pub j: f64,
    pub f: f64,
}

impl PaxTicket {
    pub fn from_optimal(distance: f64, game_mode: GameMode) -> Self {
        Self::from_optimal_with(distance, game_mode, &Economics::default())
    }

    pub fn from_optimal_with(distance: f64, game_mode: GameMode, economics: &Economics) -> Self {
        let fares = economics.pax_fares.get(game_mode);
        Self {
            y: fares.y.price(distance),
            j: fares.j.price(distance),
            f: fares.f.price(distance),
        }
    }
}

/// Cargo fares per lb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CargoTicket {
    pub l: f64,
    pub h: f64,
}

impl CargoTicket {
    pub fn from_optimal(distance: f64, game_mode: GameMode) -> Self {
        Self::from_optimal_with(distance, game_mode, &Economics::default())
    }

    pub fn from_optimal_with(distance: f64, game_mode: GameMode, economics: &Economics) -> Self {
        let fares = economics.cargo_fares.get(game_mode);
        Self {
            l: fares.l.price(distance),
            h: fares.h.price(distance),
        }
    }
}

/// VIP fares per seat. VIP pricing is the same in both game modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VipTicket {
    pub y: f64,
    pub j: f64,
    pub f: f64,
}

impl VipTicket {
    pub fn from_optimal(distance: f64) -> Self {
        Self::from_optimal_with(distance, &Economics::default())
    }

    pub fn from_optimal_with(distance: f64, economics: &Economics) -> Self {
        let fares = &economics.vip_fares;
        Self {
            y: fares.y.price(distance),
            j: fares.j.price(distance),
            f: fares.f.price(distance),
        }
    }
}

/// Ticket attached to a priced route; the variant follows the aircraft type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ticket {
    Pax(PaxTicket),
    Cargo(CargoTicket),
    Vip(VipTicket),
}

impl fmt::Display for PaxTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<PaxTicket y={} j={} f={}>", self.y, self.j, self.f)
    }
}

impl fmt::Display for CargoTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<CargoTicket l={:.2} h={:.2}>", self.l, self.h)
    }
}

impl fmt::Display for VipTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<VIPTicket y={} j={} f={}>", self.y, self.j, self.f)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ticket::Pax(ticket) => ticket.fmt(f),
            Ticket::Cargo(ticket) => ticket.fmt(f),
            Ticket::Vip(ticket) => ticket.fmt(f),
        }
    }
}
