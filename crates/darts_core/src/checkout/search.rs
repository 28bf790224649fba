//! Depth-first checkout search.
//!
//! Enumerates every multiset of dart values that brings `target` to exactly
//! zero within one turn, starting from the darts already thrown this turn.
//! Committed darts use up the three-dart budget but are not part of the
//! returned combinations.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::rules::{ScoringRules, THROWS_PER_TURN};
use crate::config::FinishRule;
use crate::error::{DartsError, Result};

/// Newly proposed dart values, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination(Vec<u32>);

impl Combination {
    pub fn new(mut values: Vec<u32>) -> Self {
        values.sort_unstable();
        Self(values)
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.0.contains(&value)
    }
}

impl From<Vec<u32>> for Combination {
    fn from(values: Vec<u32>) -> Self {
        Self::new(values)
    }
}

/// Result of one search: combinations in the order they were found.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub feasible: bool,
    pub combinations: Vec<Combination>,
}

/// Find every way to score exactly `target` this turn.
///
/// `committed` holds the values already thrown this turn (placeholders of 0
/// may be used to shrink the budget). They count against the three darts but
/// never against the finish rule.
pub fn search(rules: &ScoringRules, target: u32, committed: &[u32]) -> Result<SearchOutcome> {
    if committed.len() > THROWS_PER_TURN {
        return Err(DartsError::TooManyCommitted { count: committed.len() });
    }

    let mut searcher = Searcher { rules, target, seen: HashSet::new(), found: Vec::new() };
    let mut proposed = Vec::with_capacity(THROWS_PER_TURN);
    let committed_sum = committed.iter().sum();
    let rule_satisfied = rules.finish_rule() == FinishRule::Plain;

    searcher.visit(committed.len(), committed_sum, &mut proposed, rule_satisfied);

    tracing::trace!(
        target,
        committed = ?committed,
        rule = %rules.finish_rule(),
        found = searcher.found.len(),
        "checkout search"
    );

    Ok(SearchOutcome { feasible: !searcher.found.is_empty(), combinations: searcher.found })
}

struct Searcher<'a> {
    rules: &'a ScoringRules,
    target: u32,
    seen: HashSet<Vec<u32>>,
    found: Vec<Combination>,
}

impl Searcher<'_> {
    fn visit(&mut self, thrown: usize, sum: u32, proposed: &mut Vec<u32>, rule_satisfied: bool) {
        // Overshoot can never be recovered
        let Some(remaining) = self.target.checked_sub(sum) else {
            return;
        };
        if thrown == THROWS_PER_TURN || remaining == 0 {
            return;
        }

        if self.rules.can_close(remaining, rule_satisfied) {
            let mut values = proposed.clone();
            values.push(remaining);
            values.sort_unstable();
            if self.seen.insert(values.clone()) {
                self.found.push(Combination(values));
            }
        }

        for candidate in self.rules.candidates(remaining, THROWS_PER_TURN - thrown) {
            if candidate > remaining {
                break;
            }
            let satisfied = rule_satisfied || self.rules.satisfies_finish(candidate);
            proposed.push(candidate);
            self.visit(thrown + 1, sum + candidate, proposed, satisfied);
            proposed.pop();
        }
    }
}
