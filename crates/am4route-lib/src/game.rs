//! Player settings consumed by pricing, allocation and load estimation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Game difficulty. Realism uses lower fares, slower aircraft and enforces runway lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Easy,
    Realism,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            GameMode::Easy => "easy",
            GameMode::Realism => "realism",
        };
        f.write_str(value)
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(GameMode::Easy),
            "realism" => Ok(GameMode::Realism),
            other => Err(format!("unknown game mode '{other}' (expected easy or realism)")),
        }
    }
}

/// Settings of the player the route is computed for. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub game_mode: GameMode,
    /// Airline reputation, 0-100.
    pub reputation: f64,
    /// Ratio between the ticket price set and the in-game autoprice.
    pub autoprice_ratio: f64,
    /// Large cargo training level, 0-6.
    pub l_training: u8,
    /// Heavy cargo training level, 0-6.
    pub h_training: u8,
    pub fuel_training: u8,
    pub co2_training: u8,
    pub fuel_price: u16,
    pub co2_price: u8,
    /// Replace the estimated load with [`User::load`].
    pub override_load: bool,
    /// Load factor used when `override_load` is set, 0-1.
    pub load: f64,
}

impl Default for User {
    fn default() -> Self {
        Self {
            game_mode: GameMode::Easy,
            reputation: 87.0,
            // optimal fares sit slightly above the autoprice baseline
            autoprice_ratio: 1.06,
            l_training: 0,
            h_training: 0,
            fuel_training: 0,
            co2_training: 0,
            fuel_price: 700,
            co2_price: 120,
            override_load: false,
            load: 0.87,
        }
    }
}

impl User {
    /// Default settings for the given game mode.
    pub fn for_mode(game_mode: GameMode) -> Self {
        Self {
            game_mode,
            ..Self::default()
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<User game_mode={} reputation={:.1} autoprice_ratio={:.2} l_training={} h_training={} \
             fuel_training={} co2_training={} fuel_price={} co2_price={} override_load={} load={:.2}>",
            self.game_mode,
            self.reputation,
            self.autoprice_ratio,
            self.l_training,
            self.h_training,
            self.fuel_training,
            self.co2_training,
            self.fuel_price,
            self.co2_price,
            self.override_load,
            self.load
        )
    }
}
