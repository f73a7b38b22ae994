//! Player configuration: housing, vehicle and allocated capital

use crate::error::UrbanSurvivalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn unknown(kind: &'static str, name: &str) -> UrbanSurvivalError {
    UrbanSurvivalError::UnknownName {
        kind,
        name: name.to_string(),
    }
}

/// Housing choice for a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentType {
    Homeless,
    #[default]
    Cheap,
    Expensive,
}

impl RentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentType::Homeless => "homeless",
            RentType::Cheap => "cheap",
            RentType::Expensive => "expensive",
        }
    }
}

impl fmt::Display for RentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Housing names are case-insensitive
impl FromStr for RentType {
    type Err = UrbanSurvivalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "homeless" => Ok(RentType::Homeless),
            "cheap" => Ok(RentType::Cheap),
            "expensive" => Ok(RentType::Expensive),
            _ => Err(unknown("housing type", s)),
        }
    }
}

/// Vehicle owned by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarType {
    #[default]
    None,
    Gas,
    Electric,
}

impl CarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::None => "none",
            CarType::Gas => "gas",
            CarType::Electric => "electric",
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarType {
    type Err = UrbanSurvivalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(CarType::None),
            "gas" => Ok(CarType::Gas),
            "electric" => Ok(CarType::Electric),
            _ => Err(unknown("vehicle type", s)),
        }
    }
}

/// Capital tier that can be adjusted between cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Deposit,
    Funds,
    Stocks,
}

impl FromStr for AssetKind {
    type Err = UrbanSurvivalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deposit" => Ok(AssetKind::Deposit),
            "funds" => Ok(AssetKind::Funds),
            "stocks" => Ok(AssetKind::Stocks),
            _ => Err(unknown("asset kind", s)),
        }
    }
}

/// Player configuration chosen at allocation time
///
/// Capital balances never go negative; only the allocation step, asset
/// adjustment, car sale and the housing choice at settlement change it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub rent_type: RentType,
    pub car_type: CarType,
    /// Time deposit (low risk)
    pub deposit: i64,
    /// Stocks (high risk)
    pub stocks: i64,
    /// Funds (medium risk)
    pub funds: i64,
    pub insurance: bool,
}

impl PlayerConfig {
    /// Balance held in a capital tier
    #[inline]
    pub fn balance(&self, kind: AssetKind) -> i64 {
        match kind {
            AssetKind::Deposit => self.deposit,
            AssetKind::Funds => self.funds,
            AssetKind::Stocks => self.stocks,
        }
    }

    #[inline]
    pub(crate) fn balance_mut(&mut self, kind: AssetKind) -> &mut i64 {
        match kind {
            AssetKind::Deposit => &mut self.deposit,
            AssetKind::Funds => &mut self.funds,
            AssetKind::Stocks => &mut self.stocks,
        }
    }

    /// Sum of all capital tiers
    #[inline]
    pub fn invested(&self) -> i64 {
        self.deposit.saturating_add(self.stocks).saturating_add(self.funds)
    }
}
