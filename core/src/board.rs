// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and the explosion cascade
//!
//! The board owns a dense tile array, the queue of cells waiting to
//! explode and the per-player piece totals. Totals are maintained
//! incrementally on every placement and ownership transfer, never
//! recomputed from the cells, which makes win detection a pure
//! function of the totals vector.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{GameError, Move, PlayerId, TriCoord};

/// Contents of one triangular cell
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    /// Owning player, `None` exactly when the cell is empty
    pub player: Option<PlayerId>,
    /// Pieces currently on the cell
    pub num: u8,
}

/// Hexagonal board of triangular cells plus the cascade state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Edge length of the hexagon, fixed at construction
    size: i32,
    /// Dense storage indexed by `(y, x, r)`
    cells: Vec<TileState>,
    /// Cells waiting to explode, resolved one generation at a time
    pending: VecDeque<TriCoord>,
    /// Piece count per player, grown when a player id is first seen
    totals: Vec<u32>,
}

impl Board {
    /// Create an empty board with the specified edge length
    pub fn new(size: i32) -> Self {
        let span = size.max(0) as usize * 2;
        Self {
            size,
            cells: vec![TileState::default(); span * span * 2],
            pending: VecDeque::new(),
            totals: Vec::new(),
        }
    }

    /// Edge length of the board
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether the coordinate addresses a cell on the board
    pub fn in_bounds(&self, c: TriCoord) -> bool {
        let limit = self.size * 2;
        c.bary(self.size).into_iter().all(|v| (0..limit).contains(&v))
    }

    /// Whether the cell touches the outer boundary of the hexagon
    pub fn is_edge(&self, c: TriCoord) -> bool {
        let [a, b, z] = c.bary(self.size);
        if c.r {
            a.max(b).max(z) == self.size * 2 - 1
        } else {
            a.min(b).min(z) == 0
        }
    }

    /// Capacity of the cell: edge cells hold one piece, interior two
    pub fn allowed_pieces(&self, c: TriCoord) -> u8 {
        if self.is_edge(c) {
            1
        } else {
            2
        }
    }

    /// State of the cell at `c`; out-of-bounds lookups read as empty
    pub fn get(&self, c: TriCoord) -> TileState {
        if !self.in_bounds(c) {
            return TileState::default();
        }
        self.cells[self.cell_index(c)]
    }

    /// Number of storage slots, the index space of [`Board::cell_index`]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Linear index of an in-bounds cell.
    ///
    /// The same scheme orders [`Board::coords`], so per-cell scratch
    /// arrays (e.g. the chain heuristic's set records) can be indexed
    /// directly by it.
    pub fn cell_index(&self, c: TriCoord) -> usize {
        debug_assert!(self.in_bounds(c));
        let span = self.size as usize * 2;
        (c.y as usize * span + c.x as usize) * 2 + usize::from(c.r)
    }

    /// All on-board coordinates in canonical order: row-major over
    /// `(y, x)`, upward triangle before downward within a rhombus
    pub fn coords(&self) -> impl Iterator<Item = TriCoord> + '_ {
        let span = self.size * 2;
        (0..span)
            .flat_map(move |y| {
                (0..span).flat_map(move |x| {
                    [TriCoord::new(x, y, false), TriCoord::new(x, y, true)]
                })
            })
            .filter(move |&c| self.in_bounds(c))
    }

    /// Canonically ordered `(coordinate, state)` pairs for every cell
    pub fn tiles(&self) -> impl Iterator<Item = (TriCoord, TileState)> + '_ {
        self.coords().map(move |c| (c, self.cells[self.cell_index(c)]))
    }

    /// Cells `player` may target with a normal move: every empty cell
    /// and every cell they already own, in canonical order
    pub fn legal_moves(&self, player: PlayerId) -> Vec<TriCoord> {
        self.tiles()
            .filter(|(_, t)| t.num == 0 || t.player == Some(player))
            .map(|(c, _)| c)
            .collect()
    }

    /// Piece totals per player id, in id order
    pub fn totals(&self) -> &[u32] {
        &self.totals
    }

    /// Pieces owned by `player`; ids never seen count zero
    pub fn player_total(&self, player: PlayerId) -> u32 {
        self.totals.get(player).copied().unwrap_or(0)
    }

    /// Whether a cascade is waiting on [`Board::update_step`]
    pub fn needs_update(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The winning player, if the game is decided.
    ///
    /// Exactly one player must hold pieces and must hold more than
    /// one, so the very first placement of a game never counts.
    pub fn is_won(&self) -> Option<PlayerId> {
        let mut survivor = None;
        for (player, &total) in self.totals.iter().enumerate() {
            if total > 0 {
                if survivor.is_some() {
                    return None;
                }
                survivor = Some((player, total));
            }
        }
        match survivor {
            Some((player, total)) if total > 1 => Some(player),
            _ => None,
        }
    }

    /// Place one piece for `player`.
    ///
    /// Returns `false` without touching the board when the coordinate
    /// is off the board or the cell is held by an opponent.
    pub fn place(&mut self, c: TriCoord, player: PlayerId) -> bool {
        self.place_piece(c, player, false)
    }

    /// [`Board::place`] with the failure reason, for scripted callers
    pub fn apply(&mut self, mv: Move) -> Result<(), GameError> {
        if !self.in_bounds(mv.coord) {
            return Err(GameError::OutOfBounds);
        }
        let tile = self.cells[self.cell_index(mv.coord)];
        if tile.player.is_some_and(|p| p != mv.player) {
            return Err(GameError::OccupiedByOpponent);
        }
        self.place_piece(mv.coord, mv.player, false);
        Ok(())
    }

    /// Shared placement path for normal moves and cascade pushes.
    ///
    /// A normal move (`replace == false`) brings a new piece into
    /// play and counts toward the player's total. A cascade push
    /// (`replace == true`) only moves an existing piece, so the total
    /// changes solely through the ownership transfer of whatever was
    /// already on the cell. Keeping those two accounts separate is
    /// what holds `totals` equal to the live cells through
    /// arbitrarily long cascades.
    fn place_piece(&mut self, c: TriCoord, player: PlayerId, replace: bool) -> bool {
        if !self.in_bounds(c) {
            return false;
        }
        let idx = self.cell_index(c);
        let tile = self.cells[idx];
        if !replace && tile.player.is_some_and(|p| p != player) {
            return false;
        }

        if self.totals.len() <= player {
            self.totals.resize(player + 1, 0);
        }
        if !replace {
            self.totals[player] += 1;
        }
        if let Some(old) = tile.player {
            if old != player {
                self.totals[old] -= u32::from(tile.num);
                self.totals[player] += u32::from(tile.num);
            }
        }

        let cap = self.allowed_pieces(c);
        let tile = &mut self.cells[idx];
        tile.player = Some(player);
        tile.num += 1;
        if tile.num == cap + 1 {
            // queued exactly at the crossing, so one step's batch
            // never holds the same cell twice
            self.pending.push_back(c);
        }
        true
    }

    /// Advance the cascade by exactly one generation.
    ///
    /// The pending queue is swapped out and resolved as a batch;
    /// explosions triggered while resolving land in the live queue
    /// for the next call. Each exploding cell offers one piece to
    /// each of its three neighbors, and only an accepted push costs
    /// a piece - out-of-bounds neighbors never accept.
    pub fn update_step(&mut self) {
        let batch = std::mem::take(&mut self.pending);
        for c in batch {
            let idx = self.cell_index(c);
            let cap = self.allowed_pieces(c);
            if self.cells[idx].num <= cap {
                // resolved by an earlier entry in this batch
                continue;
            }
            let Some(owner) = self.cells[idx].player else {
                continue;
            };
            tracing::trace!(x = c.x, y = c.y, r = c.r, owner, "tile explodes");
            for n in c.neighbors() {
                if self.place_piece(n, owner, true) {
                    self.cells[idx].num -= 1;
                }
            }
            let tile = &mut self.cells[idx];
            if tile.num == 0 {
                tile.player = None;
            } else if tile.num > cap {
                // same-batch arrivals can leave it over capacity
                self.pending.push_back(c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_board_is_one_hexagon() {
        let board = Board::new(1);
        assert_eq!(board.coords().count(), 6);
        assert!(board.coords().all(|c| board.is_edge(c)));
        assert!(!board.in_bounds(TriCoord::new(0, 0, false)));
        assert!(!board.in_bounds(TriCoord::new(1, 1, true)));
    }

    #[test]
    fn interior_cells_hold_two_pieces() {
        let board = Board::new(2);
        let interior = TriCoord::new(1, 1, false);
        let edge = TriCoord::new(0, 2, false);
        assert!(!board.is_edge(interior));
        assert_eq!(board.allowed_pieces(interior), 2);
        assert!(board.is_edge(edge));
        assert_eq!(board.allowed_pieces(edge), 1);
    }

    #[test]
    fn edge_cells_have_an_off_board_neighbor() {
        let board = Board::new(2);
        for c in board.coords() {
            let open = c.neighbors().iter().any(|&n| !board.in_bounds(n));
            assert_eq!(board.is_edge(c), open, "edge mismatch at {c:?}");
        }
    }

    #[test]
    fn canonical_order_is_row_major_up_before_down() {
        let board = Board::new(1);
        let coords: Vec<_> = board.coords().collect();
        assert_eq!(
            coords,
            vec![
                TriCoord::new(0, 0, true),
                TriCoord::new(1, 0, false),
                TriCoord::new(1, 0, true),
                TriCoord::new(0, 1, false),
                TriCoord::new(0, 1, true),
                TriCoord::new(1, 1, false),
            ]
        );
        let listed: Vec<_> = coords.iter().map(|&c| board.cell_index(c)).collect();
        let mut sorted = listed.clone();
        sorted.sort_unstable();
        assert_eq!(listed, sorted, "iteration must follow the index scheme");
    }

    #[test]
    fn opponent_cells_reject_normal_placement() {
        let mut board = Board::new(2);
        let c = TriCoord::new(1, 1, false);
        assert!(board.place(c, 0));
        assert!(!board.place(c, 1));
        assert_eq!(board.get(c), TileState { player: Some(0), num: 1 });
        assert_eq!(board.player_total(1), 0);
    }

    #[test]
    fn out_of_bounds_lookup_reads_empty() {
        let board = Board::new(1);
        assert_eq!(board.get(TriCoord::new(9, 9, false)), TileState::default());
    }
}
