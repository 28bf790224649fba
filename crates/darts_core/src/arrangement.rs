//! # Arrangement Planner
//!
//! When no checkout exists this turn, pick an intermediate score to leave
//! that is itself a checkout. Two tables are precomputed per configuration:
//!
//! - **finishable**: `(target, throws_left)` cells that check out under the
//!   active finish rule
//! - **reachable**: cells that can be scored at all (everything-out)
//!
//! Both are immutable after build and shared through `Arc`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::checkout::rules::{ScoringRules, MAX_THROW, MAX_TURN_SCORE, THROWS_PER_TURN};
use crate::checkout::search::search;
use crate::config::{BullMode, FinishRule};
use crate::error::Result;

/// One table cell with at least one combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub target: u32,
    pub throws_left: usize,
    pub pattern_count: usize,
}

#[derive(Debug, Clone)]
pub struct ArrangementTable {
    bull_mode: BullMode,
    finish_rule: FinishRule,
    /// Sorted by pattern count desc, then target asc
    finishable: Vec<TableRow>,
    reachable: Vec<TableRow>,
    finishable_index: HashMap<(u32, usize), usize>,
    reachable_index: HashMap<(u32, usize), usize>,
}

impl ArrangementTable {
    /// Run the search for every `(target, throws_left)` cell. Cells are
    /// independent, so they are searched in parallel.
    pub fn build(rules: &ScoringRules) -> Result<Self> {
        let plain = rules.with_finish_rule(FinishRule::Plain);

        let cells: Vec<(usize, u32)> = (1..=THROWS_PER_TURN)
            .flat_map(|tl| (1..=MAX_THROW * tl as u32).map(move |target| (tl, target)))
            .collect();

        let counts = cells
            .par_iter()
            .map(|&(tl, target)| {
                let placeholders = vec![0; THROWS_PER_TURN - tl];
                let finish = search(rules, target, &placeholders)?;
                let reach = search(&plain, target, &placeholders)?;
                Ok((tl, target, finish.combinations.len(), reach.combinations.len()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut finishable = Vec::new();
        let mut reachable = Vec::new();
        for (throws_left, target, finish_count, reach_count) in counts {
            if finish_count > 0 {
                finishable.push(TableRow { target, throws_left, pattern_count: finish_count });
            }
            if reach_count > 0 {
                reachable.push(TableRow { target, throws_left, pattern_count: reach_count });
            }
        }
        sort_rows(&mut finishable);
        sort_rows(&mut reachable);

        tracing::info!(
            bull = %rules.bull_mode(),
            rule = %rules.finish_rule(),
            finishable = finishable.len(),
            reachable = reachable.len(),
            "arrangement table built"
        );

        Ok(Self {
            bull_mode: rules.bull_mode(),
            finish_rule: rules.finish_rule(),
            finishable_index: index_rows(&finishable),
            reachable_index: index_rows(&reachable),
            finishable,
            reachable,
        })
    }

    pub fn bull_mode(&self) -> BullMode {
        self.bull_mode
    }

    pub fn finish_rule(&self) -> FinishRule {
        self.finish_rule
    }

    pub fn finishable_rows(&self) -> &[TableRow] {
        &self.finishable
    }

    pub fn reachable_rows(&self) -> &[TableRow] {
        &self.reachable
    }

    /// Number of checkout combinations for `target` in `throws_left` darts.
    pub fn finishable_count(&self, target: u32, throws_left: usize) -> Option<usize> {
        self.finishable_index
            .get(&(target, throws_left))
            .map(|&i| self.finishable[i].pattern_count)
    }

    /// Number of ways to score `target` in `throws_left` darts, ignoring the
    /// finish rule.
    pub fn reachable_count(&self, target: u32, throws_left: usize) -> Option<usize> {
        self.reachable_index
            .get(&(target, throws_left))
            .map(|&i| self.reachable[i].pattern_count)
    }

    pub fn is_finishable(&self, target: u32, throws_left: usize) -> bool {
        self.finishable_index.contains_key(&(target, throws_left))
    }

    pub fn is_reachable(&self, target: u32, throws_left: usize) -> bool {
        self.reachable_index.contains_key(&(target, throws_left))
    }
}

fn sort_rows(rows: &mut [TableRow]) {
    rows.sort_by(|a, b| {
        b.pattern_count
            .cmp(&a.pattern_count)
            .then(a.target.cmp(&b.target))
            .then(a.throws_left.cmp(&b.throws_left))
    });
}

fn index_rows(rows: &[TableRow]) -> HashMap<(u32, usize), usize> {
    rows.iter().enumerate().map(|(i, row)| ((row.target, row.throws_left), i)).collect()
}

/// Candidate range for the arrangement score, as `lo..hi`.
fn arrangement_range(left: u32) -> std::ops::Range<u32> {
    if left > MAX_TURN_SCORE {
        left - MAX_TURN_SCORE..left + 1
    } else {
        1..left + 1
    }
}

/// Chooses the score to leave when this turn cannot finish.
#[derive(Debug, Clone)]
pub struct ArrangementPlanner {
    table: Arc<ArrangementTable>,
}

impl ArrangementPlanner {
    pub fn new(table: Arc<ArrangementTable>) -> Self {
        Self { table }
    }

    pub fn build(rules: &ScoringRules) -> Result<Self> {
        Ok(Self::new(Arc::new(ArrangementTable::build(rules)?)))
    }

    pub fn table(&self) -> &Arc<ArrangementTable> {
        &self.table
    }

    /// Score to leave for the next turn, or `None` when nothing fits.
    ///
    /// `remaining` is the score at the start of the turn and `committed` the
    /// values hit so far. The first finishable row (in table order) inside
    /// the candidate range whose complement can be scored with the darts
    /// left is chosen.
    pub fn plan_arrangement(&self, remaining: u32, committed: &[u32]) -> Option<u32> {
        let committed_sum: u32 = committed.iter().sum();
        let left = remaining.checked_sub(committed_sum)?;
        let throws_left = THROWS_PER_TURN.checked_sub(committed.len())?;
        let range = arrangement_range(left);

        let chosen = self
            .table
            .finishable
            .iter()
            .filter(|row| row.throws_left == throws_left && range.contains(&row.target))
            .map(|row| row.target)
            .find(|&target| self.table.is_reachable(left - target, throws_left));

        tracing::debug!(left, throws_left, arrange = ?chosen, "arrangement lookup");
        chosen
    }
}

// ========== Tests ==========
