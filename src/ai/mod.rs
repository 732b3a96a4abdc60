mod heuristic;

pub use heuristic::{Decision, HeuristicAi, Rationale};
