//! Configuration for new players and the global bid bounds.
//!
//! These values correspond to the `economy` section of
//! `foodgame-config.yaml`. Every field has a serde default so a partial
//! section (or none at all) yields the standard game.

use serde::Deserialize;

/// Starting resources and initial global start-bid bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Food each new player starts with (default: 10).
    #[serde(default = "default_starting_food")]
    pub starting_food: i64,

    /// Energy each new player starts with (default: 1).
    #[serde(default = "default_starting_energy")]
    pub starting_energy: i64,

    /// Coins each new player starts with (default: 0).
    #[serde(default)]
    pub starting_coins: i64,

    /// Initial global lower start-bid bound (default: 1).
    #[serde(default = "default_bid_bound")]
    pub global_min_bid: i64,

    /// Initial global upper start-bid bound (default: 1).
    #[serde(default = "default_bid_bound")]
    pub global_max_bid: i64,
}

const fn default_starting_food() -> i64 {
    10
}

const fn default_starting_energy() -> i64 {
    1
}

const fn default_bid_bound() -> i64 {
    1
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_food: default_starting_food(),
            starting_energy: default_starting_energy(),
            starting_coins: 0,
            global_min_bid: default_bid_bound(),
            global_max_bid: default_bid_bound(),
        }
    }
}
