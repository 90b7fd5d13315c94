// This file is part of the fairyfen library.
// Copyright (C) 2026 The fairyfen developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use arrayvec::ArrayVec;

use crate::{role::Role, square::Square, types::CastlingSide};

/// A piece entering the board from the hand on a square vacated by a move,
/// as in Seirawan chess.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Gate {
    pub role: Role,
    pub square: Square,
}

/// Information about a move.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// A board move, possibly a chess-style promotion to `promotion` and
    /// possibly gating a piece in on `from`.
    ///
    /// Promotions in place (`from == to`) occur in sittuyin.
    Normal {
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
        promotion: Option<Role>,
        gate: Option<Gate>,
    },
    /// A board move after which the piece turns into its promoted form,
    /// like a shogi promotion. `role` is the unpromoted role.
    PiecePromotion {
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
    },
    /// A board move after which a promoted piece reverts to its original
    /// form. `role` is the promoted role.
    PieceDemotion {
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
    },
    EnPassant {
        from: Square,
        to: Square,
    },
    /// Castling, encoded as the king capturing its own rook.
    Castle {
        king: Square,
        rook: Square,
        gate: Option<Gate>,
    },
    /// A piece from the hand. `role` is the role that appears on the
    /// board, `hand` the role taken from the hand; they differ when a piece
    /// is dropped in promoted form.
    Drop {
        role: Role,
        hand: Role,
        to: Square,
    },
}

impl Move {
    /// Gets the role of the moved piece.
    pub const fn role(&self) -> Role {
        match *self {
            Move::Normal { role, .. }
            | Move::PiecePromotion { role, .. }
            | Move::PieceDemotion { role, .. }
            | Move::Drop { role, .. } => role,
            Move::EnPassant { .. } => Role::Pawn,
            Move::Castle { .. } => Role::King,
        }
    }

    /// Gets the origin square or `None` for drops.
    pub const fn from(&self) -> Option<Square> {
        match *self {
            Move::Normal { from, .. }
            | Move::PiecePromotion { from, .. }
            | Move::PieceDemotion { from, .. }
            | Move::EnPassant { from, .. } => Some(from),
            Move::Castle { king, .. } => Some(king),
            Move::Drop { .. } => None,
        }
    }

    /// Gets the target square. For castling moves this is the square of the
    /// rook.
    pub const fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. }
            | Move::PiecePromotion { to, .. }
            | Move::PieceDemotion { to, .. }
            | Move::EnPassant { to, .. }
            | Move::Drop { to, .. } => to,
            Move::Castle { rook, .. } => rook,
        }
    }

    /// Gets the role of the captured piece or `None`.
    pub const fn capture(&self) -> Option<Role> {
        match *self {
            Move::Normal { capture, .. }
            | Move::PiecePromotion { capture, .. }
            | Move::PieceDemotion { capture, .. } => capture,
            Move::EnPassant { .. } => Some(Role::Pawn),
            Move::Castle { .. } | Move::Drop { .. } => None,
        }
    }

    pub const fn is_capture(&self) -> bool {
        self.capture().is_some()
    }

    pub const fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    pub const fn is_drop(&self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    pub const fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    pub fn castling_side(&self) -> Option<CastlingSide> {
        match *self {
            Move::Castle { king, rook, .. } => Some(CastlingSide::from_king_side(king < rook)),
            _ => None,
        }
    }

    /// Gets the chess-style promotion role.
    pub const fn promotion(&self) -> Option<Role> {
        match *self {
            Move::Normal { promotion, .. } => promotion,
            _ => None,
        }
    }

    pub const fn is_promotion(&self) -> bool {
        self.promotion().is_some()
    }

    /// Gets the piece gated in by this move.
    pub const fn gate(&self) -> Option<Gate> {
        match *self {
            Move::Normal { gate, .. } | Move::Castle { gate, .. } => gate,
            _ => None,
        }
    }

    /// Checks if the move resets the half-move clock.
    pub const fn is_zeroing(&self) -> bool {
        matches!(
            self,
            Move::Normal {
                role: Role::Pawn | Role::ShogiPawn | Role::Soldier,
                ..
            } | Move::EnPassant { .. }
        ) || self.is_capture()
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough to hold the legal moves of any position of the
/// supported variants, drops included.
pub type MoveList = ArrayVec<Move, 1024>;
