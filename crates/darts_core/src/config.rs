//! Game configuration: bull mode, finish rule and simulation settings.
//!
//! Names follow the usual dart-machine menu labels: `fat` / `sepa` for the
//! bull, `everything` / `double` / `master` for the finish.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::board::ZoneKind;
use crate::error::{DartsError, Result};

/// How the outer bull ring scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BullMode {
    /// Outer bull is worth the same 50 as the inner bull.
    #[serde(rename = "fat", alias = "fused")]
    #[default]
    Fused,
    /// Outer bull is worth 25.
    #[serde(rename = "sepa", alias = "split")]
    Split,
}

impl BullMode {
    pub fn outer_bull_value(self) -> u32 {
        match self {
            BullMode::Fused => 50,
            BullMode::Split => 25,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BullMode::Fused => "fat",
            BullMode::Split => "sepa",
        }
    }
}

impl fmt::Display for BullMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BullMode {
    type Err = DartsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fat" | "fused" => Ok(BullMode::Fused),
            "sepa" | "split" => Ok(BullMode::Split),
            other => Err(DartsError::InvalidConfiguration(format!(
                "bull_type must be fat or sepa, got '{}'",
                other
            ))),
        }
    }
}

/// Which zones may score the dart that brings the score to exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FinishRule {
    #[serde(rename = "everything", alias = "plain")]
    Plain,
    #[serde(rename = "double", alias = "double_out")]
    #[default]
    DoubleOut,
    #[serde(rename = "master", alias = "master_out")]
    MasterOut,
}

impl FinishRule {
    pub fn name(self) -> &'static str {
        match self {
            FinishRule::Plain => "everything",
            FinishRule::DoubleOut => "double",
            FinishRule::MasterOut => "master",
        }
    }

    /// Zone check applied to the real landing zone of a checkout dart.
    pub fn allows_final_zone(self, zone: ZoneKind) -> bool {
        match self {
            FinishRule::Plain => zone != ZoneKind::OutOfBoard,
            FinishRule::DoubleOut => matches!(zone, ZoneKind::InnerBull | ZoneKind::Double),
            FinishRule::MasterOut => matches!(
                zone,
                ZoneKind::InnerBull | ZoneKind::OuterBull | ZoneKind::Double | ZoneKind::Triple
            ),
        }
    }

    /// Lowest score a turn may leave without busting. A single point cannot
    /// be checked out when the finish needs a double or better.
    pub fn min_leave(self) -> u32 {
        match self {
            FinishRule::Plain => 0,
            FinishRule::DoubleOut | FinishRule::MasterOut => 2,
        }
    }
}

impl fmt::Display for FinishRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FinishRule {
    type Err = DartsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "everything" | "plain" => Ok(FinishRule::Plain),
            "double" | "double_out" => Ok(FinishRule::DoubleOut),
            "master" | "master_out" => Ok(FinishRule::MasterOut),
            other => Err(DartsError::InvalidConfiguration(format!(
                "out_type must be everything, double or master, got '{}'",
                other
            ))),
        }
    }
}

pub(crate) fn validate_sigma(sigma: f64) -> Result<()> {
    if sigma.is_finite() && sigma >= 0.0 {
        Ok(())
    } else {
        Err(DartsError::InvalidConfiguration(format!(
            "sigma must be a finite non-negative number, got {}",
            sigma
        )))
    }
}

/// Settings for a simulated single-player game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Score at the start of the game (301, 501, ...)
    pub start_score: u32,
    /// Throwing scatter in millimetres
    pub sigma: f64,
    /// Rounds played before the game is abandoned
    pub max_rounds: u32,
    pub bull_mode: BullMode,
    pub finish_rule: FinishRule,
    /// Fixed seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_score: 501,
            sigma: 50.0,
            max_rounds: 20,
            bull_mode: BullMode::Fused,
            finish_rule: FinishRule::DoubleOut,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        validate_sigma(self.sigma)?;
        if self.start_score < self.finish_rule.min_leave().max(1) {
            return Err(DartsError::InvalidConfiguration(format!(
                "start_score {} cannot be finished under {} out",
                self.start_score, self.finish_rule
            )));
        }
        if self.max_rounds == 0 {
            return Err(DartsError::InvalidConfiguration("max_rounds must be at least 1".into()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| DartsError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
