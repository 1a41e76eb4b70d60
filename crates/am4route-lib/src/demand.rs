use std::fmt;

use serde::{Deserialize, Serialize};

/// Daily passenger demand between two airports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaxDemand {
    pub y: u16,
    pub j: u16,
    pub f: u16,
}

impl PaxDemand {
    pub fn new(y: u16, j: u16, f: u16) -> Self {
        Self { y, j, f }
    }

    pub fn is_empty(&self) -> bool {
        self.y == 0 && self.j == 0 && self.f == 0
    }

    /// Demand available to a single flight when the route is flown `trips_per_day` times.
    pub fn per_flight(&self, trips_per_day: u16) -> Self {
        let trips = trips_per_day.max(1);
        Self {
            y: self.y / trips,
            j: self.j / trips,
            f: self.f / trips,
        }
    }
}

impl fmt::Display for PaxDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<PaxDemand {}|{}|{}>", self.y, self.j, self.f)
    }
}

/// Daily cargo demand, in thousands of lbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CargoDemand {
    pub l: u32,
    pub h: u32,
}

impl CargoDemand {
    pub fn new(l: u32, h: u32) -> Self {
        Self { l, h }
    }

    pub fn is_empty(&self) -> bool {
        self.l == 0 && self.h == 0
    }
}

impl From<PaxDemand> for CargoDemand {
    /// Large cargo follows half of the economy demand, heavy follows business. First class is ignored.
    fn from(pax: PaxDemand) -> Self {
        Self {
            l: (f64::from(pax.y) / 2.0).round() as u32,
            h: u32::from(pax.j),
        }
    }
}

impl fmt::Display for CargoDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<CargoDemand {}|{}>", self.l, self.h)
    }
}
