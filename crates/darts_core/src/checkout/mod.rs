// Checkout engine
// Rule table, exhaustive single-turn search, and preference ranking

pub mod ranker;
pub mod rules;
pub mod search;

pub use ranker::{best, combination_score, rank, throw_order, to_aim_targets};
pub use rules::{ScoringRules, INNER_BULL, MAX_THROW, MAX_TURN_SCORE, SPLIT_OUTER_BULL, THROWS_PER_TURN};
pub use search::{search, Combination, SearchOutcome};
