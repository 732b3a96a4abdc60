use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::game::win::completes_run;
use crate::game::{all_moves, Board, Move, Side, WIN_LENGTH};

/// Shortest run the layered scoring still looks at.
const MIN_SCORED_RUN: usize = 2;

/// Why the heuristic picked its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rationale {
    /// The move wins on the spot.
    Win,
    /// The move puts the piece in an own run of this length.
    Extend(usize),
    /// The move takes a cell where the opponent would reach this length.
    Block(usize),
    /// Nothing scored; uniform pick among the candidates.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    pub rationale: Rationale,
}

/// Bounded look-ahead opponent.
///
/// Priority order: take an immediate win (lowest column first), drop moves
/// that hand the opponent an immediate win unless every move does, then for
/// run lengths 4, 3, 2 prefer extending an own run over blocking the
/// opponent's, finally fall back to a uniform pick. Ties within a layer are
/// broken with the injected RNG.
pub struct HeuristicAi<R = StdRng> {
    rng: R,
    safety_filter: bool,
}

impl HeuristicAi<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic choices for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for HeuristicAi<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> HeuristicAi<R> {
    pub fn with_rng(rng: R) -> Self {
        HeuristicAi {
            rng,
            safety_filter: true,
        }
    }

    /// Skip the opponent-reply check and score every legal move
    pub fn without_safety_filter(mut self) -> Self {
        self.safety_filter = false;
        self
    }

    /// Pick a column for `side`. `None` only when the board has no room.
    pub fn choose_column(&mut self, board: &Board, side: Side) -> Option<usize> {
        self.choose_move(board, side).map(|mv| mv.column())
    }

    pub fn choose_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        self.decide(board, side).map(|decision| decision.mv)
    }

    /// Pick a move for `side` and report which layer produced it.
    pub fn decide(&mut self, board: &Board, side: Side) -> Option<Decision> {
        let moves = all_moves(board);
        if moves.is_empty() {
            return None;
        }

        if let Some(&mv) = moves
            .iter()
            .find(|&&mv| completes_run(board, mv, side, WIN_LENGTH))
        {
            let decision = Decision {
                mv,
                rationale: Rationale::Win,
            };
            debug!(
                side = %side,
                column = mv.column(),
                rationale = ?decision.rationale,
                "ai decision"
            );
            return Some(decision);
        }

        let candidates = if self.safety_filter {
            let safe = safe_moves(board, &moves, side);
            trace!(
                legal = moves.len(),
                safe = safe.len(),
                "safety filter applied"
            );
            if safe.is_empty() {
                moves
            } else {
                safe
            }
        } else {
            moves
        };

        let decision = self.layered(board, &candidates, side)?;
        debug!(
            side = %side,
            column = decision.mv.column(),
            rationale = ?decision.rationale,
            "ai decision"
        );
        Some(decision)
    }

    fn layered(&mut self, board: &Board, candidates: &[Move], side: Side) -> Option<Decision> {
        let opponent = side.other();

        for length in (MIN_SCORED_RUN..=WIN_LENGTH).rev() {
            if let Some(mv) = self.pick_completing(board, candidates, side, length) {
                let rationale = if length == WIN_LENGTH {
                    Rationale::Win
                } else {
                    Rationale::Extend(length)
                };
                return Some(Decision { mv, rationale });
            }
            if let Some(mv) = self.pick_completing(board, candidates, opponent, length) {
                return Some(Decision {
                    mv,
                    rationale: Rationale::Block(length),
                });
            }
        }

        let &mv = candidates.choose(&mut self.rng)?;
        Some(Decision {
            mv,
            rationale: Rationale::Random,
        })
    }

    /// Uniform pick among candidates where `side` would reach `length`
    fn pick_completing(
        &mut self,
        board: &Board,
        candidates: &[Move],
        side: Side,
        length: usize,
    ) -> Option<Move> {
        let hits: Vec<Move> = candidates
            .iter()
            .copied()
            .filter(|&mv| completes_run(board, mv, side, length))
            .collect();
        hits.choose(&mut self.rng).copied()
    }
}

/// Moves after which the opponent has no immediately winning reply.
fn safe_moves(board: &Board, moves: &[Move], side: Side) -> Vec<Move> {
    let opponent = side.other();
    moves
        .iter()
        .copied()
        .filter(|&mv| {
            let after = board.with_piece(mv, side);
            !all_moves(&after)
                .into_iter()
                .any(|reply| completes_run(&after, reply, opponent, WIN_LENGTH))
        })
        .collect()
}
