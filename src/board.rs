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

use core::fmt;

use crate::{
    bitboard::Bitboard,
    color::{ByColor, Color},
    role::{ByRole, Role},
    square::{File, Rank, Square, SQUARE_NB},
    types::Piece,
};

/// Piece positions on a board of up to 12 by 10 squares.
///
/// Besides the pieces, the board remembers the original role of promoted
/// pieces, so that they can be written as `+P` or `Q~` and revert when
/// captured into a hand.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    by_role: ByRole<Bitboard>,
    by_color: ByColor<Bitboard>,
    occupied: Bitboard,
    unpromoted: [Option<Role>; SQUARE_NB],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            by_role: ByRole::default(),
            by_color: ByColor::default(),
            occupied: Bitboard::EMPTY,
            unpromoted: [None; SQUARE_NB],
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub fn by_color(&self, color: Color) -> Bitboard {
        *self.by_color.get(color)
    }

    #[inline]
    pub fn by_role(&self, role: Role) -> Bitboard {
        self.by_role[role]
    }

    #[inline]
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.by_role(piece.role) & self.by_color(piece.color)
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        if self.by_color.white.contains(sq) {
            Some(Color::White)
        } else if self.by_color.black.contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn role_at(&self, sq: Square) -> Option<Role> {
        if !self.occupied.contains(sq) {
            return None;
        }
        Role::ALL
            .into_iter()
            .find(|&role| self.by_role[role].contains(sq))
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        Some(Piece {
            color: self.color_at(sq)?,
            role: self.role_at(sq)?,
        })
    }

    /// Original role of the promoted piece on `sq`, or `None` if the square
    /// is empty or holds an unpromoted piece.
    #[inline]
    pub fn unpromoted_role_at(&self, sq: Square) -> Option<Role> {
        self.unpromoted[sq.index()]
    }

    /// Squares of promoted pieces.
    pub fn promoted(&self) -> Bitboard {
        self.occupied
            .filter(|sq| self.unpromoted[sq.index()].is_some())
            .collect()
    }

    /// Puts a piece on `sq`, replacing any previous occupant. `unpromoted`
    /// is the original role if the piece is promoted.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece, unpromoted: Option<Role>) {
        self.discard_piece_at(sq);
        self.by_role[piece.role].add(sq);
        self.by_color.get_mut(piece.color).add(sq);
        self.occupied.add(sq);
        self.unpromoted[sq.index()] = unpromoted;
    }

    /// Removes the piece on `sq`, returning it together with its original
    /// role if it was promoted.
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<(Piece, Option<Role>)> {
        let piece = self.piece_at(sq)?;
        let unpromoted = self.unpromoted[sq.index()];
        self.discard_piece_at(sq);
        Some((piece, unpromoted))
    }

    fn discard_piece_at(&mut self, sq: Square) {
        if let Some(role) = self.role_at(sq) {
            self.by_role[role].remove(sq);
        }
        self.by_color.white.remove(sq);
        self.by_color.black.remove(sq);
        self.occupied.remove(sq);
        self.unpromoted[sq.index()] = None;
    }

    /// The unique king of `color`, if any.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.by_piece(Role::King.of(color)).single_square()
    }

    /// Iterates over occupied squares and their pieces.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied
            .filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = self.occupied.map(|sq| sq.file()).max().unwrap_or(File::H);
        let ranks = self.occupied.map(|sq| sq.rank()).max().unwrap_or(Rank::EIGHTH);
        for rank in (0..=ranks.index()).rev() {
            for file in 0..=files.index() {
                let sq = Square::from_coords(File::new(file), Rank::new(rank));
                let ch = match self.piece_at(sq) {
                    Some(piece) => {
                        let ch = piece.role.name().chars().next().unwrap_or('?');
                        piece.color.fold_wb(ch.to_ascii_uppercase(), ch)
                    }
                    None => '.',
                };
                write!(f, "{ch}{}", if file < files.index() { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_remove() {
        let e5: Square = "e5".parse().expect("valid square");
        let mut board = Board::empty();
        board.set_piece_at(e5, Role::Gold.of(Color::Black), Some(Role::ShogiPawn));
        assert_eq!(board.piece_at(e5), Some(Role::Gold.of(Color::Black)));
        assert_eq!(board.unpromoted_role_at(e5), Some(Role::ShogiPawn));
        assert_eq!(board.promoted(), Bitboard::from_square(e5));

        board.set_piece_at(e5, Role::Rook.of(Color::White), None);
        assert_eq!(board.by_role(Role::Gold), Bitboard::EMPTY);
        assert_eq!(board.unpromoted_role_at(e5), None);

        assert_eq!(
            board.remove_piece_at(e5),
            Some((Role::Rook.of(Color::White), None))
        );
        assert!(board.occupied().is_empty());
        assert_eq!(board.remove_piece_at(e5), None);
    }

    #[test]
    fn test_king_of() {
        let mut board = Board::empty();
        let e1: Square = "e1".parse().expect("valid square");
        board.set_piece_at(e1, Role::King.of(Color::White), None);
        assert_eq!(board.king_of(Color::White), Some(e1));
        assert_eq!(board.king_of(Color::Black), None);
    }
}
