//! Single-player 01 game loop.
//!
//! Each round asks the strategy for aims, throws them through the throw
//! model, and re-plans whenever a dart misses its target or the planned darts
//! run out. Bust rules:
//!
//! - the turn scores more than is left
//! - the turn leaves less than the finish rule can take out (1 under double
//!   or master out)
//! - the score reaches zero on a zone the finish rule does not accept
//!
//! A bust restores the score from the start of the round.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{AimTarget, Hit};
use crate::checkout::rules::THROWS_PER_TURN;
use crate::config::GameConfig;
use crate::error::{DartsError, Result};
use crate::strategy::{AimState, AimStrategy};
use crate::throw_model::{ErrorSource, RandomErrors};

/// One dart of a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowRecord {
    pub aim: AimTarget,
    pub hit: Hit,
    /// The aim came from a re-plan after an earlier dart this round
    pub replanned: bool,
}

impl ThrowRecord {
    pub fn on_target(&self) -> bool {
        self.hit.score == self.aim.score() && self.hit.zone == self.aim.zone
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Scored,
    Bust,
    Checkout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub start_score: u32,
    pub end_score: u32,
    /// Plan state at the first dart of the round
    pub state: AimState,
    pub arrange_target: Option<u32>,
    pub throws: Vec<ThrowRecord>,
    pub outcome: RoundOutcome,
}

impl RoundReport {
    pub fn total(&self) -> u32 {
        self.throws.iter().map(|t| t.hit.score).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub finished: bool,
    pub final_score: u32,
    pub darts_thrown: usize,
    pub rounds: Vec<RoundReport>,
}

/// Random error source for a game: seeded when the config fixes a seed.
pub fn error_source(config: &GameConfig) -> RandomErrors<ChaCha8Rng> {
    let rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    RandomErrors::new(rng)
}

#[derive(Debug, Clone)]
pub struct ZeroOneGame {
    config: GameConfig,
    strategy: AimStrategy,
    score: u32,
    round: u32,
}

impl ZeroOneGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let strategy = AimStrategy::new(config.bull_mode, config.finish_rule, config.sigma)?;
        Ok(Self::from_parts(config, strategy))
    }

    /// Use a prebuilt strategy. Its bull mode and finish rule must match the
    /// config.
    pub fn with_strategy(config: GameConfig, strategy: AimStrategy) -> Result<Self> {
        config.validate()?;
        let rules = strategy.rules();
        if rules.bull_mode() != config.bull_mode || rules.finish_rule() != config.finish_rule {
            return Err(DartsError::InvalidConfiguration(format!(
                "strategy plays {}/{}, game is {}/{}",
                rules.bull_mode(),
                rules.finish_rule(),
                config.bull_mode,
                config.finish_rule
            )));
        }
        Ok(Self::from_parts(config, strategy))
    }

    fn from_parts(config: GameConfig, strategy: AimStrategy) -> Self {
        Self { score: config.start_score, round: 0, config, strategy }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn strategy(&self) -> &AimStrategy {
        &self.strategy
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_finished(&self) -> bool {
        self.score == 0
    }

    /// Play one round of up to three darts.
    pub fn play_round(&mut self, source: &mut impl ErrorSource) -> Result<RoundReport> {
        if self.is_finished() {
            return Err(DartsError::GameFinished);
        }
        self.round += 1;

        let start = self.score;
        let finish_rule = self.config.finish_rule;
        let first_plan = self.strategy.plan_turn(start, &[])?;
        let mut aims = first_plan.aims.clone();
        let mut next = 0;
        let mut replanned = false;
        let mut committed: Vec<u32> = Vec::with_capacity(THROWS_PER_TURN);
        let mut throws = Vec::with_capacity(THROWS_PER_TURN);
        let mut outcome = RoundOutcome::Scored;

        while committed.len() < THROWS_PER_TURN {
            if next >= aims.len() {
                aims = self.strategy.plan_turn(start, &committed)?.aims;
                next = 0;
                replanned = true;
                if aims.is_empty() {
                    break;
                }
            }

            let aim = aims[next];
            next += 1;
            let hit = self.strategy.simulate_throw(&aim, source)?;
            committed.push(hit.score);
            let record = ThrowRecord { aim, hit, replanned };
            throws.push(record);

            let scored: u32 = committed.iter().sum();
            match start.checked_sub(scored) {
                None => outcome = RoundOutcome::Bust,
                Some(0) if finish_rule.allows_final_zone(hit.zone) => outcome = RoundOutcome::Checkout,
                Some(0) => outcome = RoundOutcome::Bust,
                Some(left) if left < finish_rule.min_leave() => outcome = RoundOutcome::Bust,
                Some(left) => {
                    if !record.on_target() {
                        debug!(left, aim = %aim, score = hit.score, "missed, re-planning");
                        // Force a re-plan before the next dart
                        next = aims.len();
                    }
                    continue;
                }
            }
            break;
        }

        self.score = match outcome {
            RoundOutcome::Scored => start - committed.iter().sum::<u32>(),
            RoundOutcome::Bust => start,
            RoundOutcome::Checkout => 0,
        };

        let report = RoundReport {
            round: self.round,
            start_score: start,
            end_score: self.score,
            state: first_plan.state,
            arrange_target: first_plan.arrange_target,
            throws,
            outcome,
        };
        info!(
            round = report.round,
            start = report.start_score,
            end = report.end_score,
            outcome = ?report.outcome,
            "round complete"
        );
        Ok(report)
    }

    /// Play rounds until the game is finished or the round limit is reached.
    pub fn play(&mut self, source: &mut impl ErrorSource) -> Result<GameSummary> {
        let mut rounds = Vec::new();
        while !self.is_finished() && self.round < self.config.max_rounds {
            rounds.push(self.play_round(source)?);
        }

        let darts_thrown = rounds.iter().map(|r| r.throws.len()).sum();
        info!(
            finished = self.is_finished(),
            rounds = rounds.len(),
            darts = darts_thrown,
            "game over"
        );
        Ok(GameSummary { finished: self.is_finished(), final_score: self.score, darts_thrown, rounds })
    }
}

// ========== Tests ==========
