// SPDX-License-Identifier: MIT OR Apache-2.0

//! Player abstractions: input relays and AI hosts
//!
//! A player is any source of moves for one seat at the table. The
//! game coordinator only ever asks for the committed move; pointer
//! events and strategy evaluation stay behind the trait.

use serde::{Deserialize, Serialize};

use crate::ai::Strategy;
use crate::board::Board;
use crate::{PlayerId, TriCoord};

/// Discrete pointer events delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer moved over a cell
    PointerMoved(TriCoord),
    /// Pointer confirmed a cell (click analogue)
    PointerConfirmed(TriCoord),
}

/// A source of moves for one seat
pub trait Player {
    /// Whether this seat is driven by pointer input
    fn pointer_controlled(&self) -> bool {
        false
    }

    /// Called when the seat's turn begins; AI seats pick their move here
    fn start_turn(&mut self, _board: &Board, _player: PlayerId) {}

    /// Deliver a pointer event to this seat
    fn on_input(&mut self, _event: InputEvent) {}

    /// Currently highlighted cell, for UI feedback only; not
    /// necessarily a legal move
    fn selected(&self) -> Option<TriCoord> {
        None
    }

    /// The committed move, handed over exactly once
    fn poll(&mut self) -> Option<TriCoord>;
}

/// Relays pointer input; the confirmed cell surfaces once, then clears
#[derive(Debug, Default)]
pub struct HumanPlayer {
    hover: Option<TriCoord>,
    committed: Option<TriCoord>,
}

impl HumanPlayer {
    /// Create a new pointer-driven seat
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for HumanPlayer {
    fn pointer_controlled(&self) -> bool {
        true
    }

    fn on_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved(c) => self.hover = Some(c),
            InputEvent::PointerConfirmed(c) => {
                self.hover = Some(c);
                self.committed = Some(c);
            }
        }
    }

    fn selected(&self) -> Option<TriCoord> {
        self.hover
    }

    fn poll(&mut self) -> Option<TriCoord> {
        self.committed.take()
    }
}

/// Runs a strategy when its turn starts and hands over the choice
pub struct AiPlayer {
    strategy: Box<dyn Strategy>,
    chosen: Option<TriCoord>,
}

impl AiPlayer {
    /// Create an AI seat around a strategy chain
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self {
            strategy,
            chosen: None,
        }
    }
}

impl Player for AiPlayer {
    fn start_turn(&mut self, board: &Board, player: PlayerId) {
        let moves = board.legal_moves(player);
        self.chosen = self.strategy.choose(board, &moves, player);
        if let Some(c) = self.chosen {
            tracing::debug!(player, x = c.x, y = c.y, r = c.r, "ai move selected");
        }
    }

    fn selected(&self) -> Option<TriCoord> {
        self.chosen
    }

    fn poll(&mut self) -> Option<TriCoord> {
        self.chosen.take()
    }
}
