// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted tutorial sequences
//!
//! Literal move lists replayed through the public board API. The
//! animation layer only adds timing on top; replaying a scenario here
//! must reproduce identical board states every time.

use crate::board::Board;
use crate::coords::TriCoord;
use crate::Move;

/// A scripted board walkthrough: optional setup, then played moves
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Edge length of the demonstration board
    pub board_size: i32,
    /// Moves applied before play begins; invalid entries are skipped
    pub setup: &'static [Move],
    /// Moves played in order, each followed by a full cascade
    pub moves: &'static [Move],
}

const fn mv(x: i32, y: i32, r: bool, player: usize) -> Move {
    Move {
        coord: TriCoord { x, y, r },
        player,
    }
}

/// First lesson: filling a cell past capacity makes it explode
pub const OPENING: Scenario = Scenario {
    board_size: 1,
    setup: &[],
    moves: &[mv(0, 1, true, 0), mv(0, 0, true, 1), mv(0, 1, true, 0)],
};

/// Second lesson: an explosion captures adjacent enemy pieces and can
/// chain into further cells
pub const CHAIN_CAPTURE: Scenario = Scenario {
    board_size: 2,
    setup: &[
        mv(1, 1, false, 0),
        mv(0, 2, false, 1),
        mv(0, 2, true, 0),
        mv(0, 0, true, 0), // off the board on purpose; must be skipped
    ],
    moves: &[mv(1, 1, false, 0), mv(0, 2, false, 1), mv(1, 1, false, 0)],
};

/// Built-in scenarios in presentation order
pub const ALL: &[Scenario] = &[OPENING, CHAIN_CAPTURE];

impl Scenario {
    /// Board with the setup applied, before any played move
    pub fn initial_board(&self) -> Board {
        let mut board = Board::new(self.board_size);
        for m in self.setup {
            // mirrors live play: invalid scripted entries are no-ops
            board.place(m.coord, m.player);
        }
        board
    }

    /// Replay the whole scenario, draining the cascade after each
    /// move; returns the settled board after every played move
    pub fn replay(&self) -> Vec<Board> {
        let mut board = self.initial_board();
        let mut states = Vec::with_capacity(self.moves.len());
        for m in self.moves {
            board.place(m.coord, m.player);
            while board.needs_update() && board.is_won().is_none() {
                board.update_step();
            }
            states.push(board.clone());
        }
        states
    }
}
