//! # darts_core - 01 Darts Aim Recommender
//!
//! Recommends where to aim for each dart of a "01" turn and simulates the
//! throws.
//!
//! ## Features
//! - Exhaustive checkout search under everything / double / master out
//! - Ranking of checkout routes per bull configuration (fat or split bull)
//! - Arrangement planning when no checkout exists this turn
//! - Board geometry and a Gaussian scatter model for simulated throws
//! - Reproducible games with seeded error sources

pub mod arrangement;
pub mod board;
pub mod checkout;
pub mod config;
pub mod error;
pub mod game;
pub mod strategy;
pub mod throw_model;

pub use arrangement::{ArrangementPlanner, ArrangementTable, TableRow};
pub use board::{AimTarget, Board, Hit, PolarCoordinate, ZoneKind};
pub use checkout::{Combination, ScoringRules, SearchOutcome};
pub use config::{BullMode, FinishRule, GameConfig};
pub use error::{DartsError, Result};
pub use game::{error_source, GameSummary, RoundOutcome, RoundReport, ThrowRecord, ZeroOneGame};
pub use strategy::{AimState, AimStrategy, TurnPlan};
pub use throw_model::{ErrorSource, RandomErrors, ScriptedErrors, ThrowError, ThrowModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
