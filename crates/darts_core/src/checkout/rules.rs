//! Scoring rule table shared by the search, the ranker and the planner.
//!
//! Built once per (BullMode, FinishRule) and passed around by reference.
//! Every legal single-dart value is at most 60.

use crate::board::AimTarget;
use crate::config::{BullMode, FinishRule};

/// Highest score a single dart can make (triple 20).
pub const MAX_THROW: u32 = 60;

/// Darts per turn.
pub const THROWS_PER_TURN: usize = 3;

/// Highest score a full turn can make.
pub const MAX_TURN_SCORE: u32 = MAX_THROW * THROWS_PER_TURN as u32;

pub const INNER_BULL: u32 = 50;
pub const SPLIT_OUTER_BULL: u32 = 25;

/// Largest double (double 20).
const MAX_DOUBLE: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRules {
    bull_mode: BullMode,
    finish_rule: FinishRule,
    /// legal[v]: some dart scores exactly v
    legal: [bool; MAX_THROW as usize + 1],
}

impl ScoringRules {
    pub fn new(bull_mode: BullMode, finish_rule: FinishRule) -> Self {
        let mut legal = [false; MAX_THROW as usize + 1];
        for base in 1..=20u32 {
            for mult in 1..=3u32 {
                legal[(base * mult) as usize] = true;
            }
        }
        legal[INNER_BULL as usize] = true;
        legal[bull_mode.outer_bull_value() as usize] = true;

        Self { bull_mode, finish_rule, legal }
    }

    /// Same board, different finish rule.
    pub fn with_finish_rule(&self, finish_rule: FinishRule) -> Self {
        Self { finish_rule, ..self.clone() }
    }

    pub fn bull_mode(&self) -> BullMode {
        self.bull_mode
    }

    pub fn finish_rule(&self) -> FinishRule {
        self.finish_rule
    }

    pub fn is_legal_throw(&self, value: u32) -> bool {
        self.legal.get(value as usize).copied().unwrap_or(false)
    }

    pub fn is_bull_value(&self, value: u32) -> bool {
        value == INNER_BULL || (self.bull_mode == BullMode::Split && value == SPLIT_OUTER_BULL)
    }

    pub fn is_double_value(value: u32) -> bool {
        value % 2 == 0 && (2..=MAX_DOUBLE).contains(&value)
    }

    pub fn is_triple_value(value: u32) -> bool {
        value % 3 == 0 && (3..=MAX_THROW).contains(&value)
    }

    /// Whether a dart worth `value` can, in its canonical zone, satisfy the
    /// finish rule on its own.
    pub fn satisfies_finish(&self, value: u32) -> bool {
        if !self.is_legal_throw(value) {
            return false;
        }
        match self.finish_rule {
            FinishRule::Plain => true,
            FinishRule::DoubleOut => value == INNER_BULL || Self::is_double_value(value),
            FinishRule::MasterOut => {
                self.is_bull_value(value)
                    || Self::is_double_value(value)
                    || Self::is_triple_value(value)
            }
        }
    }

    /// Whether `value` may be the last dart of a combination, given whether an
    /// earlier proposed dart already satisfied the rule.
    pub fn can_close(&self, value: u32, rule_satisfied: bool) -> bool {
        self.is_legal_throw(value) && (rule_satisfied || self.satisfies_finish(value))
    }

    /// Candidate values for the next dart, ascending and deduplicated.
    ///
    /// A value class is offered only while `remaining` does not exceed what
    /// that class could score with every dart left.
    pub fn candidates(&self, remaining: u32, throws_left: usize) -> Vec<u32> {
        let tl = throws_left as u32;
        let mut offered = [false; MAX_THROW as usize + 1];

        if remaining <= 60 * tl {
            (1..=20).for_each(|b| offered[b * 3] = true);
        }
        if remaining <= 50 * tl {
            offered[INNER_BULL as usize] = true;
        }
        if remaining <= 40 * tl {
            (1..=20).for_each(|b| offered[b * 2] = true);
        }
        if self.bull_mode == BullMode::Split && remaining <= 25 * tl {
            offered[SPLIT_OUTER_BULL as usize] = true;
        }
        if remaining <= 20 * tl {
            (1..=20).for_each(|b| offered[b] = true);
        }

        (1..=MAX_THROW).filter(|&v| offered[v as usize]).collect()
    }

    /// Most generic zone for a non-final dart: bull, then the radially
    /// smallest ring that makes the value.
    pub fn generic_target(&self, value: u32) -> Option<AimTarget> {
        if value == INNER_BULL {
            Some(AimTarget::inner_bull())
        } else if self.is_bull_value(value) {
            Some(AimTarget::outer_bull(self.bull_mode))
        } else if (1..=20).contains(&value) {
            Some(AimTarget::single(value))
        } else if Self::is_triple_value(value) {
            Some(AimTarget::triple(value / 3))
        } else if Self::is_double_value(value) {
            Some(AimTarget::double(value / 2))
        } else {
            None
        }
    }

    /// Zone for the checkout dart: bull first, then double, then triple when
    /// the rule allows it.
    pub fn finishing_target(&self, value: u32) -> Option<AimTarget> {
        match self.finish_rule {
            FinishRule::Plain => self.generic_target(value),
            FinishRule::DoubleOut => {
                if value == INNER_BULL {
                    Some(AimTarget::inner_bull())
                } else if Self::is_double_value(value) {
                    Some(AimTarget::double(value / 2))
                } else {
                    None
                }
            }
            FinishRule::MasterOut => {
                if value == INNER_BULL {
                    Some(AimTarget::inner_bull())
                } else if self.is_bull_value(value) {
                    Some(AimTarget::outer_bull(self.bull_mode))
                } else if Self::is_double_value(value) {
                    Some(AimTarget::double(value / 2))
                } else if Self::is_triple_value(value) {
                    Some(AimTarget::triple(value / 3))
                } else {
                    None
                }
            }
        }
    }

    /// Target thrown when no finish or arrangement exists: the inner bull
    /// when it is worth 50 either way, otherwise triple 20.
    pub fn fallback_target(&self) -> AimTarget {
        match self.bull_mode {
            BullMode::Fused => AimTarget::inner_bull(),
            BullMode::Split => AimTarget::triple(20),
        }
    }
}
