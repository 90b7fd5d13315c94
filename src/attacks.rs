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

//! Attack and move tables for all roles, computed on the fly.
//!
//! # Examples
//!
//! ```
//! use fairyfen::{attacks, Board, Color, Role, Square, Variant};
//!
//! let xiangqi = Variant::xiangqi();
//! let mut board = Board::empty();
//! let b1: Square = "b1".parse()?;
//! board.set_piece_at(b1, Role::Horse.of(Color::White), None);
//!
//! let targets = attacks::attacks(&xiangqi, &board, Role::Horse.of(Color::White), b1);
//! assert!(targets.contains("c3".parse()?));
//! assert!(targets.contains("d2".parse()?));
//!
//! // A piece next to the horse blocks its leg.
//! board.set_piece_at("b2".parse()?, Role::Soldier.of(Color::White), None);
//! let targets = attacks::attacks(&xiangqi, &board, Role::Horse.of(Color::White), b1);
//! assert!(!targets.contains("c3".parse()?));
//! assert!(targets.contains("d2".parse()?));
//! # Ok::<_, fairyfen::ParseSquareError>(())
//! ```

use core::iter;

use crate::{
    bitboard::Bitboard,
    board::Board,
    role::Role,
    square::Square,
    types::Piece,
    variant::{Rules, Variant},
};

type Delta = (i32, i32);

const ORTHOGONAL: [Delta; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [Delta; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT: [Delta; 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
const ALFIL: [Delta; 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];

fn ray(sq: Square, (df, dr): Delta, mask: Bitboard) -> impl Iterator<Item = Square> {
    iter::successors(Some(sq), move |s| s.offset(df, dr))
        .skip(1)
        .take_while(move |&s| mask.contains(s))
}

fn leaper_attacks(sq: Square, deltas: &[Delta], mask: Bitboard) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&(df, dr)| sq.offset(df, dr))
        .filter(|&s| mask.contains(s))
        .collect()
}

fn sliding_attacks(sq: Square, occupied: Bitboard, deltas: &[Delta], mask: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &delta in deltas {
        for s in ray(sq, delta, mask) {
            attacks.add(s);
            if occupied.contains(s) {
                break;
            }
        }
    }
    attacks
}

/// Squares behind the first piece (the screen) in each direction: the empty
/// ones and the first occupied one.
fn hopper_targets(
    sq: Square,
    occupied: Bitboard,
    screens: Bitboard,
    mask: Bitboard,
) -> (Bitboard, Bitboard) {
    let mut quiets = Bitboard::EMPTY;
    let mut captures = Bitboard::EMPTY;
    for delta in ORTHOGONAL {
        let mut squares = ray(sq, delta, mask).skip_while(|&s| !occupied.contains(s));
        match squares.next() {
            Some(screen) if screens.contains(screen) => (),
            _ => continue,
        }
        for s in squares {
            if occupied.contains(s) {
                captures.add(s);
                break;
            }
            quiets.add(s);
        }
    }
    (quiets, captures)
}

fn horse_attacks(sq: Square, occupied: Bitboard, mask: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for (df, dr) in ORTHOGONAL {
        if sq.offset(df, dr).is_none_or(|leg| occupied.contains(leg)) {
            continue;
        }
        for side in [-1, 1] {
            let (tf, tr) = if df == 0 { (side, 2 * dr) } else { (2 * df, side) };
            if let Some(s) = sq.offset(tf, tr).filter(|&s| mask.contains(s)) {
                attacks.add(s);
            }
        }
    }
    attacks
}

fn elephant_attacks(sq: Square, occupied: Bitboard, mask: Bitboard) -> Bitboard {
    DIAGONAL
        .iter()
        .filter(|&&(df, dr)| sq.offset(df, dr).is_some_and(|eye| !occupied.contains(eye)))
        .filter_map(|&(df, dr)| sq.offset(2 * df, 2 * dr))
        .filter(|&s| mask.contains(s))
        .collect()
}

fn janggi_elephant_attacks(sq: Square, occupied: Bitboard, mask: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for (df, dr) in ORTHOGONAL {
        for side in [-1, 1] {
            let (pf, pr) = if df == 0 { (side, 0) } else { (0, side) };
            let path = [(df, dr), (2 * df + pf, 2 * dr + pr)];
            let open = path.iter().all(|&(f, r)| {
                sq.offset(f, r)
                    .is_some_and(|s| mask.contains(s) && !occupied.contains(s))
            });
            if !open {
                continue;
            }
            if let Some(s) = sq.offset(3 * df + 2 * pf, 3 * dr + 2 * pr).filter(|&s| mask.contains(s)) {
                attacks.add(s);
            }
        }
    }
    attacks
}

/// Squares attacked by `piece` standing on `sq`, i.e. squares where it
/// could capture. The result is restricted to the board and to the
/// mobility region of the piece.
pub fn attacks(variant: &Variant, board: &Board, piece: Piece, sq: Square) -> Bitboard {
    let mask = variant.board_mask();
    let occupied = board.occupied();
    let fwd = piece.color.fold_wb(1, -1);

    let attacks = match piece.role {
        Role::Pawn => leaper_attacks(sq, &[(-1, fwd), (1, fwd)], mask),
        Role::Knight => leaper_attacks(sq, &KNIGHT, mask),
        Role::Bishop => sliding_attacks(sq, occupied, &DIAGONAL, mask),
        Role::Rook => sliding_attacks(sq, occupied, &ORTHOGONAL, mask),
        Role::Queen => {
            sliding_attacks(sq, occupied, &DIAGONAL, mask)
                | sliding_attacks(sq, occupied, &ORTHOGONAL, mask)
        }
        Role::King if variant.rules.contains(Rules::PALACE) => {
            leaper_attacks(sq, &ORTHOGONAL, mask)
        }
        Role::King | Role::Commoner => {
            leaper_attacks(sq, &ORTHOGONAL, mask) | leaper_attacks(sq, &DIAGONAL, mask)
        }
        Role::Fers => leaper_attacks(sq, &DIAGONAL, mask),
        Role::Alfil => leaper_attacks(sq, &ALFIL, mask),
        Role::FersAlfil => leaper_attacks(sq, &DIAGONAL, mask) | leaper_attacks(sq, &ALFIL, mask),
        Role::Wazir => leaper_attacks(sq, &ORTHOGONAL, mask),
        Role::Archbishop => {
            sliding_attacks(sq, occupied, &DIAGONAL, mask) | leaper_attacks(sq, &KNIGHT, mask)
        }
        Role::Chancellor => {
            sliding_attacks(sq, occupied, &ORTHOGONAL, mask) | leaper_attacks(sq, &KNIGHT, mask)
        }
        Role::Centaur => {
            leaper_attacks(sq, &ORTHOGONAL, mask)
                | leaper_attacks(sq, &DIAGONAL, mask)
                | leaper_attacks(sq, &KNIGHT, mask)
        }
        Role::ShogiPawn => leaper_attacks(sq, &[(0, fwd)], mask),
        Role::Lance => sliding_attacks(sq, occupied, &[(0, fwd)], mask),
        Role::ShogiKnight => leaper_attacks(sq, &[(-1, 2 * fwd), (1, 2 * fwd)], mask),
        Role::Silver => leaper_attacks(
            sq,
            &[(0, fwd), (-1, fwd), (1, fwd), (-1, -fwd), (1, -fwd)],
            mask,
        ),
        Role::Gold => leaper_attacks(
            sq,
            &[(0, 1), (0, -1), (1, 0), (-1, 0), (-1, fwd), (1, fwd)],
            mask,
        ),
        Role::DragonHorse => {
            sliding_attacks(sq, occupied, &DIAGONAL, mask) | leaper_attacks(sq, &ORTHOGONAL, mask)
        }
        Role::Dragon => {
            sliding_attacks(sq, occupied, &ORTHOGONAL, mask) | leaper_attacks(sq, &DIAGONAL, mask)
        }
        Role::Horse => horse_attacks(sq, occupied, mask),
        Role::Elephant => elephant_attacks(sq, occupied, mask),
        Role::JanggiElephant => janggi_elephant_attacks(sq, occupied, mask),
        Role::Cannon => hopper_targets(sq, occupied, occupied, mask).1,
        Role::JanggiCannon => {
            let cannons = board.by_role(Role::JanggiCannon);
            hopper_targets(sq, occupied, occupied & !cannons, mask).1 & !cannons
        }
        Role::Soldier => {
            let mut attacks = leaper_attacks(sq, &[(0, fwd)], mask);
            if sq.relative_rank(piece.color, variant.max_rank) >= variant.soldier_sideways_rank {
                attacks |= leaper_attacks(sq, &[(-1, 0), (1, 0)], mask);
            }
            attacks
        }
    };

    attacks & variant.mobility_region(piece.color, piece.role)
}

/// Squares `piece` on `sq` could move to without capturing, assuming they
/// are empty. Pawn double steps are not included.
pub fn quiets(variant: &Variant, board: &Board, piece: Piece, sq: Square) -> Bitboard {
    let mask = variant.board_mask();
    let occupied = board.occupied();

    let quiets = match piece.role {
        Role::Pawn => leaper_attacks(sq, &[(0, piece.color.fold_wb(1, -1))], mask),
        Role::Cannon => sliding_attacks(sq, occupied, &ORTHOGONAL, mask) & !occupied,
        Role::JanggiCannon => {
            let cannons = board.by_role(Role::JanggiCannon);
            hopper_targets(sq, occupied, occupied & !cannons, mask).0
        }
        _ => return attacks(variant, board, piece, sq),
    };

    quiets & variant.mobility_region(piece.color, piece.role)
}

/// Squares strictly between `a` and `b` if they share a file, rank or
/// diagonal, otherwise the empty set.
pub fn between(a: Square, b: Square) -> Bitboard {
    let df = b.file().index() as i32 - a.file().index() as i32;
    let dr = b.rank().index() as i32 - a.rank().index() as i32;
    if (df == 0 && dr == 0) || (df != 0 && dr != 0 && df.abs() != dr.abs()) {
        return Bitboard::EMPTY;
    }
    ray(a, (df.signum(), dr.signum()), Bitboard::FULL)
        .take_while(|&s| s != b)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn board_with(variant: &Variant, pieces: &[(&str, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(name, piece) in pieces {
            assert!(variant.contains(sq(name)));
            board.set_piece_at(sq(name), piece, None);
        }
        board
    }

    #[test]
    fn test_rook_attacks_stop_at_blockers() {
        let chess = Variant::chess();
        let rook = Role::Rook.of(Color::White);
        let board = board_with(
            &chess,
            &[("a1", rook), ("a4", Role::Pawn.of(Color::Black))],
        );
        let attacks = attacks(&chess, &board, rook, sq("a1"));
        assert!(attacks.contains(sq("a4")));
        assert!(!attacks.contains(sq("a5")));
        assert!(attacks.contains(sq("h1")));
        assert!(!attacks.contains(sq("i1")));
        assert_eq!(attacks.count(), 10);
    }

    #[test]
    fn test_cannon() {
        let xiangqi = Variant::xiangqi();
        let cannon = Role::Cannon.of(Color::White);
        let board = board_with(
            &xiangqi,
            &[
                ("b3", cannon),
                ("b7", Role::Soldier.of(Color::White)),
                ("b10", Role::Horse.of(Color::Black)),
            ],
        );
        let captures = attacks(&xiangqi, &board, cannon, sq("b3"));
        assert_eq!(captures, Bitboard::from_square(sq("b10")));
        let moves = quiets(&xiangqi, &board, cannon, sq("b3"));
        assert!(moves.contains(sq("b6")));
        assert!(!moves.contains(sq("b7")));
        assert!(moves.contains(sq("i3")));
    }

    #[test]
    fn test_janggi_cannon_needs_screen() {
        let janggi = Variant::janggi();
        let cannon = Role::JanggiCannon.of(Color::White);
        let board = board_with(
            &janggi,
            &[
                ("b3", cannon),
                ("b5", Role::Soldier.of(Color::White)),
                ("e3", Role::JanggiCannon.of(Color::Black)),
            ],
        );
        let moves = quiets(&janggi, &board, cannon, sq("b3"));
        assert!(!moves.contains(sq("b4")));
        assert!(moves.contains(sq("b6")));
        assert!(moves.contains(sq("b10")));
        assert!(!moves.contains(sq("f3")));
        assert!(attacks(&janggi, &board, cannon, sq("b3")).is_empty());
    }

    #[test]
    fn test_elephant_stays_home() {
        let xiangqi = Variant::xiangqi();
        let elephant = Role::Elephant.of(Color::White);
        let board = board_with(&xiangqi, &[("c5", elephant)]);
        let attacks = attacks(&xiangqi, &board, elephant, sq("c5"));
        assert_eq!(
            attacks,
            Bitboard::from_square(sq("a3")) | Bitboard::from_square(sq("e3"))
        );
    }

    #[test]
    fn test_king_confined_to_palace() {
        let xiangqi = Variant::xiangqi();
        let king = Role::King.of(Color::White);
        let board = board_with(&xiangqi, &[("d1", king)]);
        let attacks = attacks(&xiangqi, &board, king, sq("d1"));
        assert_eq!(
            attacks,
            Bitboard::from_square(sq("e1")) | Bitboard::from_square(sq("d2"))
        );
    }

    #[test]
    fn test_shogi_pieces_are_relative_to_color() {
        let shogi = Variant::shogi();
        let silver = Role::Silver.of(Color::Black);
        let board = board_with(&shogi, &[("e5", silver)]);
        let attacks = attacks(&shogi, &board, silver, sq("e5"));
        assert!(attacks.contains(sq("e4")));
        assert!(attacks.contains(sq("d6")));
        assert!(!attacks.contains(sq("e6")));
        assert_eq!(attacks.count(), 5);
    }

    #[test]
    fn test_between() {
        assert_eq!(between(sq("e1"), sq("e4")).count(), 2);
        assert_eq!(between(sq("a1"), sq("d4")).count(), 2);
        assert!(between(sq("a1"), sq("b3")).is_empty());
        assert!(between(sq("e10"), sq("e9")).is_empty());
    }
}
