//! # Aim Strategy
//!
//! Turns (remaining score, darts already thrown) into aim targets for the
//! rest of the turn:
//!
//! 1. **NotFinishable**: too far away for a checkout next turn, throw the
//!    highest-scoring fallback target
//! 2. **Finishable**: a checkout exists, throw the best-ranked combination
//! 3. **Arrange**: no checkout, leave a score that is one next turn
//!
//! On a miss the caller asks again with the actual hits as `committed`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::arrangement::{ArrangementPlanner, ArrangementTable};
use crate::board::{AimTarget, Board, Hit};
use crate::checkout::ranker::{best, to_aim_targets};
use crate::checkout::rules::{ScoringRules, MAX_THROW, MAX_TURN_SCORE, THROWS_PER_TURN};
use crate::checkout::search::search;
use crate::config::{BullMode, FinishRule};
use crate::error::{DartsError, Result};
use crate::throw_model::{ErrorSource, ThrowModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AimState {
    NotFinishable,
    Finishable,
    Arrange,
}

/// Aims chosen for the rest of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnPlan {
    pub state: AimState,
    /// One target per planned dart; may be shorter than the darts left
    pub aims: Vec<AimTarget>,
    /// Score the plan intends to leave, for arrangements
    pub arrange_target: Option<u32>,
}

/// Whether `left` is beyond anything this turn plus a full next turn can score.
pub(crate) fn out_of_checkout_range(left: u32, throws_left: usize) -> bool {
    left > MAX_TURN_SCORE + MAX_THROW * throws_left as u32
}

impl TurnPlan {
    fn fallback(target: AimTarget, throws_left: usize) -> Self {
        Self {
            state: AimState::NotFinishable,
            aims: vec![target; throws_left],
            arrange_target: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AimStrategy {
    rules: ScoringRules,
    /// Same board, everything-out; used to reach an arrangement score
    arrange_rules: ScoringRules,
    planner: ArrangementPlanner,
    board: Board,
    model: ThrowModel,
}

impl AimStrategy {
    /// Build the rule tables and arrangement table for one configuration.
    pub fn new(bull_mode: BullMode, finish_rule: FinishRule, sigma: f64) -> Result<Self> {
        let rules = ScoringRules::new(bull_mode, finish_rule);
        let planner = ArrangementPlanner::build(&rules)?;
        Self::with_planner(rules, planner, sigma)
    }

    /// Parse `fat`/`sepa` and `everything`/`double`/`master`.
    pub fn from_names(bull_type: &str, out_type: &str, sigma: f64) -> Result<Self> {
        Self::new(bull_type.parse()?, out_type.parse()?, sigma)
    }

    /// Reuse an already built table (e.g. across many simulated games).
    pub fn with_table(table: Arc<ArrangementTable>, sigma: f64) -> Result<Self> {
        let rules = ScoringRules::new(table.bull_mode(), table.finish_rule());
        Self::with_planner(rules, ArrangementPlanner::new(table), sigma)
    }

    fn with_planner(rules: ScoringRules, planner: ArrangementPlanner, sigma: f64) -> Result<Self> {
        let model = ThrowModel::new(sigma)?;
        let table = planner.table();
        if table.bull_mode() != rules.bull_mode() || table.finish_rule() != rules.finish_rule() {
            return Err(DartsError::InvalidConfiguration(format!(
                "arrangement table built for {}/{}, strategy uses {}/{}",
                table.bull_mode(),
                table.finish_rule(),
                rules.bull_mode(),
                rules.finish_rule()
            )));
        }

        Ok(Self {
            arrange_rules: rules.with_finish_rule(FinishRule::Plain),
            board: Board::new(rules.bull_mode()),
            rules,
            planner,
            model,
        })
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn model(&self) -> &ThrowModel {
        &self.model
    }

    pub fn table(&self) -> &Arc<ArrangementTable> {
        self.planner.table()
    }

    pub fn fallback_target(&self) -> AimTarget {
        self.rules.fallback_target()
    }

    /// Decide what to throw for the rest of the turn.
    ///
    /// `remaining` is the score at the start of the turn; `committed` holds
    /// the values already hit this turn.
    pub fn plan_turn(&self, remaining: u32, committed: &[u32]) -> Result<TurnPlan> {
        if committed.len() > THROWS_PER_TURN {
            return Err(DartsError::TooManyCommitted { count: committed.len() });
        }
        let committed_sum: u32 = committed.iter().sum();
        let left = remaining
            .checked_sub(committed_sum)
            .ok_or(DartsError::Overshoot { remaining, committed: committed_sum })?;
        let throws_left = THROWS_PER_TURN - committed.len();

        if throws_left == 0 || left == 0 {
            return Ok(TurnPlan::fallback(self.fallback_target(), 0));
        }

        if out_of_checkout_range(left, throws_left) {
            tracing::debug!(left, throws_left, "out of checkout range");
            return Ok(TurnPlan::fallback(self.fallback_target(), throws_left));
        }

        let outcome = search(&self.rules, remaining, committed)?;
        if let Some(combo) = best(&self.rules, outcome.combinations) {
            let aims = to_aim_targets(&self.rules, &combo)?;
            tracing::debug!(left, combo = ?combo.values(), "checkout");
            return Ok(TurnPlan { state: AimState::Finishable, aims, arrange_target: None });
        }

        let Some(arrange) = self.planner.plan_arrangement(remaining, committed) else {
            tracing::debug!(left, throws_left, "no arrangement");
            return Ok(TurnPlan::fallback(self.fallback_target(), throws_left));
        };

        let outcome = search(&self.arrange_rules, remaining - arrange, committed)?;
        match best(&self.arrange_rules, outcome.combinations) {
            Some(combo) => {
                let aims = to_aim_targets(&self.arrange_rules, &combo)?;
                tracing::debug!(left, arrange, combo = ?combo.values(), "arrangement");
                Ok(TurnPlan { state: AimState::Arrange, aims, arrange_target: Some(arrange) })
            }
            None => {
                tracing::warn!(left, arrange, "arrangement score not reachable");
                Ok(TurnPlan::fallback(self.fallback_target(), throws_left))
            }
        }
    }

    /// Aim targets for the rest of the turn, one per dart left. Plans
    /// shorter than the darts left repeat their last target.
    ///
    /// A padded target after the closing dart is only thrown if an earlier
    /// dart missed, and then the plan is stale: ask again with the real hits
    /// as `committed` before each dart.
    pub fn compute_aims(&self, remaining: u32, committed: &[u32]) -> Result<Vec<AimTarget>> {
        let mut aims = self.plan_turn(remaining, committed)?.aims;
        let throws_left = THROWS_PER_TURN - committed.len();
        if let Some(&last) = aims.last() {
            aims.resize(throws_left, last);
        }
        Ok(aims)
    }

    /// Throw one dart at `target` and score where it lands.
    pub fn simulate_throw(&self, target: &AimTarget, source: &mut impl ErrorSource) -> Result<Hit> {
        self.model.throw_at(&self.board, target, source)
    }
}

// ========== Tests ==========
