//! Aiming preference between checkout combinations, and conversion of the
//! chosen combination into concrete aim targets.
//!
//! Preference by configuration:
//! - split bull or double out: avoid the bull whenever a bull-free route exists
//! - fused bull, everything out: prefer plain sectors and shorter routes
//! - fused bull, master out: bull finish > double finish > triple finish

use super::rules::{ScoringRules, INNER_BULL, SPLIT_OUTER_BULL};
use super::search::Combination;
use crate::board::AimTarget;
use crate::config::{BullMode, FinishRule};
use crate::error::{DartsError, Result};

/// Preference score of one combination; higher is better.
pub fn combination_score(rules: &ScoringRules, combo: &Combination) -> f64 {
    let has_bull = combo.contains(INNER_BULL) || combo.contains(SPLIT_OUTER_BULL);
    let brevity = (4 - combo.len().min(3)) as f64;

    match (rules.bull_mode(), rules.finish_rule()) {
        (BullMode::Split, _) | (_, FinishRule::DoubleOut) => {
            if has_bull {
                0.0
            } else {
                1.0
            }
        }
        (BullMode::Fused, FinishRule::Plain) => {
            combo.values().iter().filter(|&&v| v <= 20).count() as f64 + brevity
        }
        (BullMode::Fused, FinishRule::MasterOut) => {
            // Largest value first: the bull only counts when no bigger even value precedes it.
            let finish = combo
                .values()
                .iter()
                .rev()
                .find_map(|&v| match v {
                    INNER_BULL => Some(1.5),
                    v if v % 2 == 0 => Some(1.0),
                    _ => None,
                })
                .unwrap_or(0.5);
            finish + brevity
        }
    }
}

/// Sort combinations by descending preference. Ties keep search order.
pub fn rank(rules: &ScoringRules, mut combos: Vec<Combination>) -> Vec<Combination> {
    combos.sort_by(|a, b| combination_score(rules, b).total_cmp(&combination_score(rules, a)));
    combos
}

/// Highest-ranked combination, if any.
pub fn best(rules: &ScoringRules, combos: Vec<Combination>) -> Option<Combination> {
    rank(rules, combos).into_iter().next()
}

/// How suitable `value` is as the closing dart; the largest key is thrown last.
fn closing_key(rules: &ScoringRules, value: u32) -> f64 {
    let double = ScoringRules::is_double_value(value);
    let triple = value % 3 == 0;

    match (rules.finish_rule(), rules.bull_mode()) {
        (FinishRule::Plain, _) => value as f64,
        (FinishRule::DoubleOut, _) => {
            if value == INNER_BULL {
                0.1
            } else if double {
                1.0
            } else {
                0.0
            }
        }
        (FinishRule::MasterOut, bull_mode) => {
            if value % 2 != 0 && !triple && !rules.is_bull_value(value) {
                0.0
            } else if rules.is_bull_value(value) {
                match bull_mode {
                    BullMode::Fused => 1.5,
                    BullMode::Split => 0.1,
                }
            } else if double {
                1.0
            } else if triple {
                0.5
            } else {
                0.0
            }
        }
    }
}

/// Throw order for a combination: the dart that satisfies the finish rule
/// comes last. Everything-out throws the biggest dart first.
pub fn throw_order(rules: &ScoringRules, combo: &Combination) -> Vec<u32> {
    let mut values = combo.values().to_vec();
    match rules.finish_rule() {
        FinishRule::Plain => values.sort_by(|a, b| b.cmp(a)),
        _ => values.sort_by(|&a, &b| closing_key(rules, a).total_cmp(&closing_key(rules, b))),
    }
    values
}

/// Aim targets for a combination, in throw order.
pub fn to_aim_targets(rules: &ScoringRules, combo: &Combination) -> Result<Vec<AimTarget>> {
    let order = throw_order(rules, combo);
    let last = order.len().saturating_sub(1);

    order
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let target = if i == last {
                rules.finishing_target(value)
            } else {
                rules.generic_target(value)
            };
            target.ok_or(DartsError::InvalidValue { value })
        })
        .collect()
}
