// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fitness evaluators for simulated board states
//!
//! Each evaluator scores a settled board from one player's
//! perspective:
//! - `owned_pieces`: raw piece total after the cascade
//! - `positional_strength`: piece safety around enemy trigger cells
//! - `chain_potential`: connected clusters of trigger cells, scored
//!   by whether the opponent can detonate them first
//!
//! A trigger cell is a cell at capacity: one more piece sets it off.

use crate::board::Board;
use crate::{PlayerId, TriCoord};

/// Per piece committed to a cluster the opponent can detonate
const THREATENED_CLUSTER_WEIGHT: i32 = -7;
/// Per piece stored in a cluster only we can detonate
const SAFE_CLUSTER_WEIGHT: i32 = 3;
/// Per enemy piece a safe cluster would capture when it fires
const CAPTURE_WEIGHT: i32 = 2;
/// Per piece sitting next to an enemy trigger cell
const EXPOSED_PIECE_WEIGHT: i32 = -3;
/// Flat bonus for a full cell with no enemy trigger next to it
const READY_CELL_BONUS: i32 = 2;

/// Piece total for `player` once the simulated cascade has settled
pub fn owned_pieces(board: &Board, player: PlayerId, _steps: u32) -> i32 {
    board.player_total(player) as i32
}

/// Piece-safety evaluation of a settled board
pub fn positional_strength(board: &Board, player: PlayerId, _steps: u32) -> i32 {
    if board.is_won() == Some(player) {
        return i32::MAX;
    }
    let mut score = 0;
    for (c, tile) in board.tiles() {
        if tile.player != Some(player) {
            continue;
        }
        let num = i32::from(tile.num);
        score += num;
        if has_enemy_trigger_neighbor(board, c, player) {
            score += EXPOSED_PIECE_WEIGHT * num;
        } else if tile.num == board.allowed_pieces(c) {
            score += READY_CELL_BONUS;
        }
    }
    score
}

fn has_enemy_trigger_neighbor(board: &Board, c: TriCoord, player: PlayerId) -> bool {
    c.neighbors().into_iter().any(|n| {
        board.in_bounds(n) && {
            let tile = board.get(n);
            tile.player.is_some_and(|p| p != player) && tile.num == board.allowed_pieces(n)
        }
    })
}

/// Transient disjoint-set record, one per board storage slot
struct SetRecord {
    parent: usize,
    num_owned: i32,
    threatened: bool,
    num_threatened_by: i32,
}

fn find(sets: &[SetRecord], i: usize) -> usize {
    let mut root = i;
    while sets[root].parent != root {
        root = sets[root].parent;
    }
    root
}

/// Merge two sets; the lower root index always survives, so the
/// outcome depends only on the canonical cell order
fn union(sets: &mut [SetRecord], a: usize, b: usize) {
    let ra = find(sets, a);
    let rb = find(sets, b);
    if ra == rb {
        return;
    }
    let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
    sets[high].parent = low;
    let num_owned = sets[high].num_owned;
    let threatened = sets[high].threatened;
    let num_threatened_by = sets[high].num_threatened_by;
    sets[low].num_owned += num_owned;
    sets[low].threatened |= threatened;
    sets[low].num_threatened_by += num_threatened_by;
}

/// Chain-cluster evaluation of a settled board.
///
/// Adjacent trigger cells form one cluster. A cluster holding any
/// enemy trigger counts as a liability for every piece we stored in
/// it; a cluster that is all ours counts as a stored reaction plus
/// the enemy pieces it would capture on firing. Own pieces out of
/// reach of every trigger score as untouchable.
pub fn chain_potential(board: &Board, player: PlayerId, _steps: u32) -> i32 {
    let mut sets: Vec<SetRecord> = (0..board.cell_count())
        .map(|i| SetRecord {
            parent: i,
            num_owned: 0,
            threatened: false,
            num_threatened_by: 0,
        })
        .collect();

    let mut score = 0;

    for (c, tile) in board.tiles() {
        if tile.num == 0 {
            continue;
        }
        let i = board.cell_index(c);
        if tile.num == board.allowed_pieces(c) {
            let root = find(&sets, i);
            if tile.player == Some(player) {
                sets[root].num_owned += i32::from(tile.num);
            } else {
                sets[root].threatened = true;
            }
            for n in c.neighbors() {
                if !board.in_bounds(n) {
                    continue;
                }
                let j = board.cell_index(n);
                // merge only toward already-visited trigger cells;
                // scanning forward once covers every adjacency
                if j < i && board.get(n).num == board.allowed_pieces(n) {
                    union(&mut sets, i, j);
                }
            }
        } else if let Some(trigger) = first_trigger_neighbor(board, c) {
            if tile.player != Some(player) {
                let root = find(&sets, board.cell_index(trigger));
                sets[root].num_threatened_by += i32::from(tile.num);
            }
        } else if tile.player == Some(player) {
            // no trigger can reach these pieces
            score += i32::from(tile.num);
        }
    }

    for (i, set) in sets.iter().enumerate() {
        if set.parent != i {
            continue;
        }
        if set.threatened {
            score += THREATENED_CLUSTER_WEIGHT * set.num_owned;
        } else {
            score += SAFE_CLUSTER_WEIGHT * set.num_owned + CAPTURE_WEIGHT * set.num_threatened_by;
        }
    }

    score
}

fn first_trigger_neighbor(board: &Board, c: TriCoord) -> Option<TriCoord> {
    c.neighbors()
        .into_iter()
        .find(|&n| board.in_bounds(n) && board.get(n).num == board.allowed_pieces(n))
}
