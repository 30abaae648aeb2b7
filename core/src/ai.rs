// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composable move selection for AI players
//!
//! A strategy either commits to a move or yields so the next link in
//! a fallback chain can try. Filters narrow the candidate list, and
//! fitness evaluators score candidates by cloning the board, playing
//! the move and fast-forwarding the cascade on the clone. Every
//! stochastic piece takes an explicit seed source; there is no shared
//! generator state between strategies.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::{heuristics, PlayerId, TriCoord};

/// Hard cap on simulated cascade generations per candidate; the
/// win-or-quiescence exit fires far earlier on any sane board
const SIMULATION_STEP_LIMIT: u32 = 1000;

/// Picks a move from a candidate list, or yields to a fallback
pub trait Strategy {
    /// Choose among `moves` for `player`, or yield with `None`
    fn choose(&mut self, board: &Board, moves: &[TriCoord], player: PlayerId)
        -> Option<TriCoord>;
}

/// Narrows a candidate list; an empty result makes the enclosing
/// strategy yield
pub trait Filter {
    /// Return the surviving subset of `moves`, preserving order
    fn apply(&mut self, board: &Board, moves: &[TriCoord], player: PlayerId) -> Vec<TriCoord>;
}

/// Scores a settled board for `player`
pub trait Fitness {
    /// `steps` is the number of cascade generations the simulated
    /// move consumed before the board settled (or the win cut in)
    fn score(&self, board: &Board, player: PlayerId, steps: u32) -> i32;
}

impl<F> Fitness for F
where
    F: Fn(&Board, PlayerId, u32) -> i32,
{
    fn score(&self, board: &Board, player: PlayerId, steps: u32) -> i32 {
        self(board, player, steps)
    }
}

/// Uniform choice over the candidates; the universal fallback
pub struct RandomChoice {
    rng: StdRng,
}

impl RandomChoice {
    /// Seed a private generator from the shared source, keeping the
    /// strategy player-independent without any global state
    pub fn new(seed: &mut dyn RngCore) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed.next_u64()),
        }
    }
}

impl Strategy for RandomChoice {
    fn choose(
        &mut self,
        _board: &Board,
        moves: &[TriCoord],
        _player: PlayerId,
    ) -> Option<TriCoord> {
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.gen_range(0..moves.len())])
    }
}

/// Applies a filter, then delegates to the wrapped strategy; yields
/// when the filter leaves nothing
pub struct Filtered<F, S> {
    filter: F,
    next: S,
}

impl<F: Filter, S: Strategy> Filtered<F, S> {
    /// Compose `filter` in front of `next`
    pub fn new(filter: F, next: S) -> Self {
        Self { filter, next }
    }
}

impl<F: Filter, S: Strategy> Strategy for Filtered<F, S> {
    fn choose(&mut self, board: &Board, moves: &[TriCoord], player: PlayerId)
        -> Option<TriCoord> {
        let filtered = self.filter.apply(board, moves, player);
        if filtered.is_empty() {
            return None;
        }
        self.next.choose(board, &filtered, player)
    }
}

/// Tries strategies left to right and commits to the first that
/// produces a move; the final link should be total
pub struct FirstSuccess {
    chain: Vec<Box<dyn Strategy>>,
}

impl FirstSuccess {
    /// Build a fallback chain
    pub fn new(chain: Vec<Box<dyn Strategy>>) -> Self {
        Self { chain }
    }
}

impl Strategy for FirstSuccess {
    fn choose(&mut self, board: &Board, moves: &[TriCoord], player: PlayerId)
        -> Option<TriCoord> {
        self.chain
            .iter_mut()
            .find_map(|s| s.choose(board, moves, player))
    }
}

/// Keeps the candidates satisfying a per-move predicate
pub struct KeepIf<P> {
    pred: P,
}

impl<P> KeepIf<P>
where
    P: Fn(&Board, TriCoord, PlayerId) -> bool,
{
    /// Wrap a predicate as a filter
    pub fn new(pred: P) -> Self {
        Self { pred }
    }
}

impl<P> Filter for KeepIf<P>
where
    P: Fn(&Board, TriCoord, PlayerId) -> bool,
{
    fn apply(&mut self, board: &Board, moves: &[TriCoord], player: PlayerId) -> Vec<TriCoord> {
        moves
            .iter()
            .copied()
            .filter(|&c| (self.pred)(board, c, player))
            .collect()
    }
}

/// Simulates every candidate on a board clone and keeps the ones
/// achieving the best fitness, in enumeration order
pub struct MaxFitness<F> {
    fitness: F,
}

impl<F: Fitness> MaxFitness<F> {
    /// Rank candidates by `fitness`
    pub fn new(fitness: F) -> Self {
        Self { fitness }
    }

    fn evaluate(&self, board: &Board, c: TriCoord, player: PlayerId) -> i32 {
        let mut sim = board.clone();
        sim.place(c, player);
        let mut steps = 0;
        // a decided board stops the clock; cascades after the win
        // carry no information
        while sim.needs_update() && sim.is_won().is_none() && steps < SIMULATION_STEP_LIMIT {
            sim.update_step();
            steps += 1;
        }
        self.fitness.score(&sim, player, steps)
    }
}

impl<F: Fitness> Filter for MaxFitness<F> {
    fn apply(&mut self, board: &Board, moves: &[TriCoord], player: PlayerId) -> Vec<TriCoord> {
        let mut best = i32::MIN;
        let mut kept = Vec::new();
        for &c in moves {
            let score = self.evaluate(board, c, player);
            if score > best {
                best = score;
                kept.clear();
            }
            if score == best {
                kept.push(c);
            }
        }
        kept
    }
}

/// A cell already at capacity: placing there triggers an explosion
pub fn at_capacity(board: &Board, c: TriCoord, _player: PlayerId) -> bool {
    board.get(c).num == board.allowed_pieces(c)
}

/// No in-bounds enemy neighbor is one piece away from exploding
pub fn clear_of_enemy_triggers(board: &Board, c: TriCoord, player: PlayerId) -> bool {
    c.neighbors().into_iter().all(|n| {
        if !board.in_bounds(n) {
            return true;
        }
        let tile = board.get(n);
        tile.player == Some(player) || tile.num != board.allowed_pieces(n)
    })
}

/// Canned strategy chains in rising order of strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiLevel {
    /// Uniform random over all legal moves
    Random,
    /// Detonate for the biggest immediate piece gain, else stay away
    /// from enemy trigger cells
    Greedy,
    /// Maximize the positional evaluation of the settled board
    Positional,
    /// Maximize the chain-cluster evaluation of the settled board
    Chain,
}

impl AiLevel {
    /// Build the strategy chain for this level, drawing seeds from
    /// the shared source; every chain ends in a total fallback
    pub fn build(self, seed: &mut dyn RngCore) -> Box<dyn Strategy> {
        match self {
            AiLevel::Random => Box::new(RandomChoice::new(seed)),
            AiLevel::Greedy => Box::new(FirstSuccess::new(vec![
                Box::new(Filtered::new(
                    KeepIf::new(at_capacity),
                    Filtered::new(
                        MaxFitness::new(heuristics::owned_pieces),
                        RandomChoice::new(seed),
                    ),
                )),
                Box::new(Filtered::new(
                    KeepIf::new(clear_of_enemy_triggers),
                    RandomChoice::new(seed),
                )),
                Box::new(RandomChoice::new(seed)),
            ])),
            AiLevel::Positional => Box::new(FirstSuccess::new(vec![
                Box::new(Filtered::new(
                    MaxFitness::new(heuristics::positional_strength),
                    RandomChoice::new(seed),
                )),
                Box::new(RandomChoice::new(seed)),
            ])),
            AiLevel::Chain => Box::new(FirstSuccess::new(vec![
                Box::new(Filtered::new(
                    MaxFitness::new(heuristics::chain_potential),
                    RandomChoice::new(seed),
                )),
                Box::new(RandomChoice::new(seed)),
            ])),
        }
    }
}
