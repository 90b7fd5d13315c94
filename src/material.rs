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

//! Detect positions where a side can no longer win.

use crate::{
    bitboard::Bitboard,
    color::Color,
    position::Position,
    role::{Role, RoleSet},
    variant::{GameResult, Rules},
};

/// Pieces that can force mate with the help of the own king.
const MATING: RoleSet = RoleSet::of(&[
    Role::Rook,
    Role::Queen,
    Role::Archbishop,
    Role::Chancellor,
    Role::Silver,
    Role::Gold,
    Role::Commoner,
    Role::Centaur,
]);

/// Pieces that never leave the squares of one color.
const COLORBOUND: RoleSet = RoleSet::of(&[
    Role::Bishop,
    Role::Fers,
    Role::FersAlfil,
    Role::Alfil,
    Role::Elephant,
]);

/// Tests if `color` has no way left to win the game, no matter how the
/// opponent plays.
///
/// The test is conservative: it may return `false` for some positions
/// that are in fact dead, but a `true` is always correct. It always
/// returns `false` for variants with captures to hand, pieces in hand,
/// extinction rules, or a flag piece still on the board.
///
/// # Examples
///
/// ```
/// use fairyfen::{Color, Fairy, Position, Variant};
///
/// let pos = Fairy::from_fen(Variant::chess(), "8/8/8/4k3/8/8/8/2B1K3 w - - 0 1")?;
/// assert!(pos.has_insufficient_material(Color::White));
///
/// let pos = Fairy::from_fen(Variant::chess(), "8/8/8/4k3/8/8/8/R3K3 w - - 0 1")?;
/// assert!(!pos.has_insufficient_material(Color::White));
/// assert!(pos.has_insufficient_material(Color::Black));
/// # Ok::<_, fairyfen::FromFenError>(())
/// ```
pub fn has_insufficient_material<P: Position>(color: Color, pos: &P) -> bool {
    let variant = pos.variant();

    if variant.rules.contains(Rules::CAPTURES_TO_HAND)
        || !pos.hand(color).is_empty()
        || variant.extinction.is_some()
        || variant.flag_role.is_some_and(|role| pos.pieces(color, role).any())
    {
        return false;
    }

    // Kings, and pieces that can never approach the enemy king.
    let them = color.other();
    let their_king_region = pos.mobility_region(them, Role::King);
    let mut restricted = pos.pieces(them, Role::King);
    for role in variant.piece_types().iter() {
        if role == Role::King || !pos.mobility_region(color, role).intersects(their_king_region) {
            restricted |= pos.pieces(color, role);
        }
    }

    let has_pawns = pos.pieces(color, Role::Pawn).any();
    for role in MATING.iter() {
        if (pos.pieces(color, role) & !restricted).any()
            || (has_pawns && variant.promotion_roles.contains(role))
        {
            return false;
        }
    }

    let board = pos.board();
    let occupied = board.occupied();
    let ours = board.by_color(color);

    let mut colorbound = Bitboard::EMPTY;
    for role in COLORBOUND.iter() {
        colorbound |= board.by_role(role) & !restricted;
    }
    let unbound = occupied ^ restricted ^ colorbound;

    if colorbound.intersects(ours)
        && ((colorbound.intersects(Bitboard::DARK_SQUARES)
            && colorbound.intersects(!Bitboard::DARK_SQUARES))
            || unbound.any())
    {
        return false;
    }

    // A lone unbound piece needs a helper of either color, unless
    // stalemating wins.
    if ours.intersects(unbound)
        && ((occupied ^ restricted).count() >= 2 || variant.stalemate != GameResult::Draw)
    {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{position::Fairy, variant::Variant};

    fn insufficient(variant: Variant, fen: &str) -> (bool, bool) {
        let pos = Fairy::from_fen(variant, fen).expect("valid position");
        (
            has_insufficient_material(Color::White, &pos),
            has_insufficient_material(Color::Black, &pos),
        )
    }

    #[test]
    fn test_chess() {
        for (fen, expected) in [
            ("8/8/8/4k3/8/8/8/4K3 w - - 0 1", (true, true)),
            ("8/8/8/4k3/8/8/8/2B1K3 w - - 0 1", (true, true)),
            ("8/8/8/4k3/8/8/8/1N2K3 w - - 0 1", (true, true)),
            ("8/8/8/4k3/8/8/8/1N2KN2 w - - 0 1", (false, true)),
            ("5b2/8/8/4k3/8/8/8/2B1K3 w - - 0 1", (true, true)),
            ("4b3/8/8/4k3/8/8/8/2B1K3 w - - 0 1", (false, false)),
            ("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1", (false, true)),
            ("8/4p3/8/4k3/8/8/8/1N2K3 w - - 0 1", (false, false)),
        ] {
            assert_eq!(insufficient(Variant::chess(), fen), expected, "{fen}");
        }
    }

    #[test]
    fn test_extinction() {
        assert_eq!(
            insufficient(Variant::shatranj(), "8/8/8/4k3/8/8/8/1N2K3 w - - 0 1"),
            (false, false)
        );
    }

    #[test]
    fn test_xiangqi() {
        assert_eq!(
            insufficient(Variant::xiangqi(), "3k5/9/9/9/9/9/9/2B6/4A4/3AK4 w - - 0 1"),
            (true, true)
        );
        assert_eq!(
            insufficient(Variant::xiangqi(), "3k5/9/9/9/9/9/9/4P4/9/4K4 w - - 0 1"),
            (false, true)
        );
        assert_eq!(
            insufficient(Variant::xiangqi(), "3k5/9/9/9/9/9/9/9/9/4K1N2 w - - 0 1"),
            (false, true)
        );
    }

    #[test]
    fn test_other_win_rules() {
        assert_eq!(
            insufficient(Variant::crazyhouse(), "8/8/8/4k3/8/8/8/4K3[] w - - 0 1"),
            (false, false)
        );
        assert_eq!(
            insufficient(Variant::king_of_the_hill(), "8/8/8/4k3/8/8/8/4K3 w - - 0 1"),
            (false, false)
        );
        assert_eq!(
            insufficient(Variant::makruk(), "8/8/8/4k3/8/8/8/3MK3 w - - 0 1"),
            (true, true)
        );
        assert_eq!(
            insufficient(Variant::makruk(), "8/8/8/4k3/8/8/8/3SK3 w - - 0 1"),
            (false, true)
        );
    }
}
