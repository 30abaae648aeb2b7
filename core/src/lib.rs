// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hexplode Core - Game Rules and Board Logic
//!
//! This crate provides the core game functionality including:
//! - Triangular-grid board representation and the explosion cascade
//! - Player abstractions for pointer input relays and AI strategies
//! - Composable AI move selection (filters, fitness evaluators)
//! - Deterministic scripted tutorial sequences

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod ai;
pub mod board;
pub mod coords;
pub mod game;
pub mod heuristics;
pub mod player;
pub mod tutorial;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a player within one game, assigned in seating order
pub type PlayerId = usize;

/// A concrete placement: one piece added to one cell by one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Target cell
    pub coord: TriCoord,
    /// Acting player
    pub player: PlayerId,
}

impl Move {
    /// Create a new move
    pub fn new(coord: TriCoord, player: PlayerId) -> Self {
        Self { coord, player }
    }
}

/// Errors that can occur when applying a move
///
/// Both conditions are local and recoverable; callers skip the move
/// rather than abort the game.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The coordinate is outside the board
    #[error("coordinate out of bounds")]
    OutOfBounds,

    /// The cell is held by another player
    #[error("cell is held by an opponent")]
    OccupiedByOpponent,
}

pub use board::{Board, TileState};
pub use coords::TriCoord;
