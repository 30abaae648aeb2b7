// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn sequencing around the cascade state machine
//!
//! The coordinator owns the live board and the seated players. An
//! external driver calls [`Game::tick`] once per frame or test step;
//! each tick resolves at most one cascade generation, so chains stay
//! observable, and the turn only advances once the board is quiet.

use crate::board::Board;
use crate::player::Player;
use crate::{GameError, Move, PlayerId, TriCoord};

/// A board plus its seated players and whose turn it is
pub struct Game {
    board: Board,
    players: Vec<Box<dyn Player>>,
    current: PlayerId,
}

impl Game {
    /// Create a game on an empty board of the given edge length
    pub fn new(size: i32) -> Self {
        Self {
            board: Board::new(size),
            players: Vec::new(),
            current: 0,
        }
    }

    /// Seat a player; the first seat's turn starts immediately
    pub fn add_player(&mut self, player: Box<dyn Player>) {
        self.players.push(player);
        if self.players.len() == 1 {
            self.players[0].start_turn(&self.board, 0);
        }
    }

    /// The live board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seat number whose turn it is
    pub fn current_player_num(&self) -> PlayerId {
        self.current
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> &dyn Player {
        self.players[self.current].as_ref()
    }

    /// Mutable access to the player whose turn it is, e.g. for
    /// delivering input events
    pub fn current_player_mut(&mut self) -> &mut dyn Player {
        self.players[self.current].as_mut()
    }

    /// Number of seated players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The winner, if the game is decided
    pub fn winner(&self) -> Option<PlayerId> {
        self.board.is_won()
    }

    /// Drive the game by one step: resolve one cascade generation,
    /// or ask the current player for a move and apply it. Returns
    /// whether anything happened.
    ///
    /// Drivers should stop ticking once [`Game::winner`] is set; a
    /// decided board can cascade indefinitely.
    pub fn tick(&mut self) -> bool {
        if self.board.needs_update() {
            self.board.update_step();
            if !self.board.needs_update() {
                self.next_player();
            }
            true
        } else if let Some(c) = self.players[self.current].poll() {
            self.make_move(c);
            true
        } else {
            false
        }
    }

    /// Apply a scripted move directly, bypassing the seated players
    pub fn apply(&mut self, mv: Move) -> Result<(), GameError> {
        self.board.apply(mv)
    }

    /// Start over: same size, empty board, seat 0 to move
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.size());
        self.current = 0;
        if let Some(first) = self.players.first_mut() {
            first.start_turn(&self.board, 0);
        }
    }

    fn make_move(&mut self, c: TriCoord) {
        if !self.board.place(c, self.current) {
            // an illegal click is a no-op; the seat keeps its turn
            return;
        }
        if !self.board.needs_update() {
            self.next_player();
        }
    }

    fn next_player(&mut self) {
        if let Some(winner) = self.board.is_won() {
            tracing::info!(winner, "game decided");
        }
        self.current = (self.current + 1) % self.players.len();
        self.players[self.current].start_turn(&self.board, self.current);
    }
}
