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

//! Write moves in the notation conventions of chess, shogi, xiangqi and
//! janggi.
//!
//! # Examples
//!
//! ```
//! use fairyfen::{san::{move_to_san, Notation}, Fairy, Move, Position, Role, Variant};
//!
//! let mut pos = Fairy::new(Variant::chess())?;
//! let m = Move::Normal {
//!     role: Role::Knight,
//!     from: "g1".parse()?,
//!     capture: None,
//!     to: "f3".parse()?,
//!     promotion: None,
//!     gate: None,
//! };
//! assert_eq!(move_to_san(&mut pos, &m, Notation::San), "Nf3");
//! assert_eq!(move_to_san(&mut pos, &m, Notation::Lan), "Ng1-f3");
//!
//! # #[derive(Debug)] struct CommonError;
//! # impl From<fairyfen::FromFenError> for CommonError { fn from(_: fairyfen::FromFenError) -> Self { Self } }
//! # impl From<fairyfen::ParseSquareError> for CommonError { fn from(_: fairyfen::ParseSquareError) -> Self { Self } }
//! # Ok::<_, CommonError>(())
//! ```

use core::{fmt, str::FromStr};
use std::error::Error;

use crate::{
    bitboard::Bitboard,
    m::{Gate, Move},
    position::Position,
    role::Role,
    square::Square,
    variant::{Rules, Variant},
};

/// Move notation dialect.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Notation {
    /// [`Notation::ShogiHodgesNumber`] for shogi-like variants and
    /// [`Notation::San`] for everything else.
    #[default]
    Default,
    /// Standard algebraic notation, e.g. `Nf3`.
    San,
    /// Long algebraic notation, e.g. `Ng1-f3`.
    Lan,
    /// Western shogi notation without separators, e.g. `P76`, `S'34`.
    ShogiHosking,
    /// Western shogi notation with letter ranks, e.g. `P-7f`, `S*3d`.
    ShogiHodges,
    /// Western shogi notation with numbered ranks, e.g. `P-76`, `S*34`.
    ShogiHodgesNumber,
    /// Korean notation with rank before file, e.g. `H02-83`.
    Janggi,
    /// World Xiangqi Federation notation, e.g. `C2=5`, `H2+3`.
    XiangqiWxf,
}

impl Notation {
    pub const ALL: [Notation; 8] = [
        Notation::Default,
        Notation::San,
        Notation::Lan,
        Notation::ShogiHosking,
        Notation::ShogiHodges,
        Notation::ShogiHodgesNumber,
        Notation::Janggi,
        Notation::XiangqiWxf,
    ];

    /// The notation [`Notation::Default`] stands for when writing moves of
    /// `variant`.
    pub fn default_for(variant: &Variant) -> Notation {
        if variant.template == "shogi" {
            Notation::ShogiHodgesNumber
        } else {
            Notation::San
        }
    }

    /// Replaces [`Notation::Default`] with the concrete notation for
    /// `variant`.
    pub fn resolve(self, variant: &Variant) -> Notation {
        match self {
            Notation::Default => Notation::default_for(variant),
            notation => notation,
        }
    }

    pub const fn is_shogi(self) -> bool {
        matches!(
            self,
            Notation::ShogiHosking | Notation::ShogiHodges | Notation::ShogiHodgesNumber
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Notation::Default => "default",
            Notation::San => "san",
            Notation::Lan => "lan",
            Notation::ShogiHosking => "shogi-hosking",
            Notation::ShogiHodges => "shogi-hodges",
            Notation::ShogiHodgesNumber => "shogi-hodges-number",
            Notation::Janggi => "janggi",
            Notation::XiangqiWxf => "xiangqi-wxf",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error when parsing an unknown notation name.
#[derive(Clone, Debug)]
pub struct ParseNotationError;

impl fmt::Display for ParseNotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown notation")
    }
}

impl Error for ParseNotationError {}

impl FromStr for Notation {
    type Err = ParseNotationError;

    fn from_str(s: &str) -> Result<Notation, ParseNotationError> {
        Notation::ALL
            .into_iter()
            .find(|notation| notation.name() == s)
            .ok_or(ParseNotationError)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Notation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Notation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Notation, D::Error> {
        let s = <&str>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How much of the origin square is written to tell a move apart from
/// moves of other pieces of the same kind.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Disambiguation {
    None,
    File,
    Rank,
    Square,
}

fn letter(variant: &Variant, role: Role) -> Option<char> {
    variant.char_of(role).map(|ch| ch.to_ascii_uppercase())
}

fn push_letter(san: &mut String, variant: &Variant, role: Role) {
    if let Some(ch) = letter(variant, role) {
        san.push(ch);
    }
}

/// Writes the piece part of a move.
///
/// Pawn moves in SAN and LAN have no piece letter. In xiangqi notation,
/// more than two like pieces on a file are numbered from the front.
/// Promoted pieces in shogi notations are written as `+` and their
/// original letter.
pub fn piece_symbol<P: Position>(pos: &P, m: &Move, notation: Notation) -> String {
    let us = pos.turn();
    let variant = pos.variant();
    let piece = pos.moved_piece(m);
    let from = m.from();

    if matches!(notation, Notation::San | Notation::Lan)
        && piece.role == Role::Pawn
        && !m.is_drop()
    {
        return String::new();
    }

    if let Some(from) = from {
        let ours = pos.pieces(us, piece.role);
        if notation == Notation::XiangqiWxf && (ours & Bitboard::file(from.file())).count() > 2 {
            return ((Bitboard::forward_file(us, from) & ours).count() + 1).to_string();
        }
        if notation.is_shogi() {
            if let Some(unpromoted) = pos.unpromoted_role_at(from) {
                let mut san = String::from("+");
                push_letter(&mut san, variant, unpromoted);
                return san;
            }
        }
    }

    if let Move::Drop { role, hand, .. } = *m {
        if notation.is_shogi() && role != hand {
            let mut san = String::from("+");
            push_letter(&mut san, variant, hand);
            return san;
        }
    }

    match variant.synonyms[piece.role].or_else(|| variant.char_of(piece.role)) {
        Some(ch) => ch.to_ascii_uppercase().to_string(),
        None => {
            // Promoted forms without a letter of their own.
            let mut san = String::new();
            if let Some(unpromoted) = from.and_then(|from| pos.unpromoted_role_at(from)) {
                san.push('+');
                push_letter(&mut san, variant, unpromoted);
            }
            san
        }
    }
}

pub fn file_symbol<P: Position>(pos: &P, sq: Square, notation: Notation) -> String {
    let file = sq.file().index();
    let max_file = pos.variant().max_file.index();
    match notation {
        Notation::ShogiHosking | Notation::ShogiHodges | Notation::ShogiHodgesNumber => {
            (max_file - file + 1).to_string()
        }
        Notation::Janggi => (file + 1).to_string(),
        Notation::XiangqiWxf => (pos.turn().fold_wb(max_file - file, file) + 1).to_string(),
        Notation::Default | Notation::San | Notation::Lan => sq.file().char().to_string(),
    }
}

pub fn rank_symbol<P: Position>(pos: &P, sq: Square, notation: Notation) -> String {
    let rank = sq.rank().index();
    let max_rank = pos.variant().max_rank;
    match notation {
        Notation::ShogiHosking | Notation::ShogiHodgesNumber => {
            (max_rank.index() - rank + 1).to_string()
        }
        Notation::ShogiHodges => char::from(b'a' + (max_rank.index() - rank) as u8).to_string(),
        Notation::Janggi => ((max_rank.index() - rank + 1) % 10).to_string(),
        Notation::XiangqiWxf => {
            let us = pos.turn();
            match pos.piece_at(sq) {
                None => (sq.relative_rank(us, max_rank).index() + 1).to_string(),
                Some(piece) => {
                    if (pos.pieces(us, piece.role) & Bitboard::forward_file(us, sq)).any() {
                        "-".to_owned()
                    } else {
                        "+".to_owned()
                    }
                }
            }
        }
        Notation::Default | Notation::San | Notation::Lan => (rank + 1).to_string(),
    }
}

/// Writes a square. Janggi notation puts the rank first.
///
/// # Examples
///
/// ```
/// use fairyfen::{san::{square_symbol, Notation}, Fairy, Square, Variant};
///
/// let pos = Fairy::new(Variant::shogi())?;
/// let sq: Square = "c4".parse()?;
/// assert_eq!(square_symbol(&pos, sq, Notation::Default), "c4");
/// assert_eq!(square_symbol(&pos, sq, Notation::ShogiHodgesNumber), "76");
/// assert_eq!(square_symbol(&pos, sq, Notation::ShogiHodges), "7f");
///
/// # #[derive(Debug)] struct CommonError;
/// # impl From<fairyfen::FromFenError> for CommonError { fn from(_: fairyfen::FromFenError) -> Self { Self } }
/// # impl From<fairyfen::ParseSquareError> for CommonError { fn from(_: fairyfen::ParseSquareError) -> Self { Self } }
/// # Ok::<_, CommonError>(())
/// ```
pub fn square_symbol<P: Position>(pos: &P, sq: Square, notation: Notation) -> String {
    match notation {
        Notation::Janggi => rank_symbol(pos, sq, notation) + &file_symbol(pos, sq, notation),
        _ => file_symbol(pos, sq, notation) + &rank_symbol(pos, sq, notation),
    }
}

/// Tests if the piece on `from` could also make a move to `to`.
fn reaches<P: Position>(pos: &P, role: Role, from: Square, to: Square, promotion: Option<Role>) -> bool {
    let capture = pos.board().role_at(to);
    [
        Move::Normal {
            role,
            from,
            capture,
            to,
            promotion,
            gate: None,
        },
        Move::PiecePromotion {
            role,
            from,
            capture,
            to,
        },
    ]
    .iter()
    .any(|m| pos.is_pseudo_legal(m) && pos.is_legal(m))
}

/// Decides how the origin of `m` must be written.
pub fn disambiguation_level<P: Position>(pos: &P, m: &Move, notation: Notation) -> Disambiguation {
    let Some(from) = m.from() else {
        return Disambiguation::None;
    };

    if matches!(notation, Notation::Lan | Notation::Janggi) {
        return Disambiguation::Square;
    }

    let us = pos.turn();
    let to = m.to();
    let role = pos.moved_piece(m).role;
    let ours = pos.pieces(us, role);

    if notation == Notation::XiangqiWxf {
        let on_file = ours & Bitboard::file(from.file());
        if on_file.count() == 2 {
            let files = to.file().index() as i32 - from.file().index() as i32;
            let ranks = to.rank().index() as i32 - from.rank().index() as i32;
            let mirrored = on_file
                .without(from)
                .first()
                .and_then(|other| other.offset(files, ranks));
            if mirrored.is_some_and(|sq| {
                pos.variant().contains(sq) && pos.mobility_region(us, role).contains(sq)
            }) {
                return Disambiguation::Rank;
            }
        }
        return Disambiguation::File;
    }

    if notation == Notation::San && role == Role::Pawn {
        if pos.is_capture(m) {
            return Disambiguation::File;
        }
        if m.is_promotion()
            && from != to
            && pos.variant().rules.contains(Rules::SITTUYIN_PROMOTION)
        {
            return Disambiguation::Square;
        }
    }

    let mut others = Bitboard::EMPTY;
    for other in ours.without(from) {
        if notation.is_shogi() && pos.unpromoted_role_at(other) != pos.unpromoted_role_at(from) {
            continue;
        }
        if reaches(pos, role, other, to, m.promotion()) {
            others.add(other);
        }
    }

    if others.is_empty() {
        Disambiguation::None
    } else if notation.is_shogi() {
        Disambiguation::Square
    } else if !others.intersects(Bitboard::file(from.file())) {
        Disambiguation::File
    } else if !others.intersects(Bitboard::rank(from.rank())) {
        Disambiguation::Rank
    } else {
        Disambiguation::Square
    }
}

pub fn disambiguation_symbol<P: Position>(
    pos: &P,
    sq: Square,
    notation: Notation,
    disambiguation: Disambiguation,
) -> String {
    match disambiguation {
        Disambiguation::None => String::new(),
        Disambiguation::File => file_symbol(pos, sq, notation),
        Disambiguation::Rank => rank_symbol(pos, sq, notation),
        Disambiguation::Square => square_symbol(pos, sq, notation),
    }
}

fn push_gate<P: Position>(san: &mut String, pos: &P, gate: Gate, notation: Notation) {
    san.push('/');
    push_letter(san, pos.variant(), gate.role);
    san.push_str(&square_symbol(pos, gate.square, notation));
}

/// Writes a legal move of `pos` in the given notation, with a `+` or `#`
/// suffix for checks and checkmates except in shogi notations.
///
/// The position is temporarily changed to look for checkmate, and
/// restored before returning.
pub fn move_to_san<P: Position>(pos: &mut P, m: &Move, notation: Notation) -> String {
    let notation = notation.resolve(pos.variant());
    let mut san = String::new();

    match *m {
        Move::Castle { king, rook, gate } => {
            san.push_str(if rook > king { "O-O" } else { "O-O-O" });
            if let Some(gate) = gate {
                push_gate(&mut san, pos, gate, notation);
            }
        }
        _ => {
            let to = m.to();
            san.push_str(&piece_symbol(pos, m, notation));

            let disambiguation = disambiguation_level(pos, m, notation);
            if let Some(from) = m.from() {
                san.push_str(&disambiguation_symbol(pos, from, notation, disambiguation));
            }

            match m.from() {
                None => san.push(match notation {
                    Notation::ShogiHosking => '\'',
                    _ if notation.is_shogi() => '*',
                    _ => '@',
                }),
                Some(from) if notation == Notation::XiangqiWxf => {
                    let max_rank = pos.variant().max_rank;
                    let us = pos.turn();
                    san.push(if from.rank() == to.rank() {
                        '='
                    } else if to.relative_rank(us, max_rank) > from.relative_rank(us, max_rank) {
                        '+'
                    } else {
                        '-'
                    });
                }
                Some(_) if pos.is_capture(m) => san.push('x'),
                Some(_)
                    if matches!(notation, Notation::Lan | Notation::Janggi)
                        || (notation.is_shogi()
                            && (notation != Notation::ShogiHosking
                                || disambiguation == Disambiguation::Square)) =>
                {
                    san.push('-');
                }
                Some(_) => (),
            }

            match m.from() {
                Some(from) if notation == Notation::XiangqiWxf => {
                    if from.file() == to.file() {
                        san.push_str(&from.rank().index().abs_diff(to.rank().index()).to_string());
                    } else {
                        san.push_str(&file_symbol(pos, to, notation));
                    }
                }
                _ => san.push_str(&square_symbol(pos, to, notation)),
            }

            let variant = pos.variant();
            match *m {
                Move::Normal {
                    promotion: Some(promotion),
                    ..
                } => {
                    san.push('=');
                    push_letter(&mut san, variant, promotion);
                }
                Move::PiecePromotion { role, .. } => {
                    if notation.is_shogi() {
                        san.push('+');
                    } else {
                        san.push('=');
                        match variant.promoted_role(role).and_then(|promoted| letter(variant, promoted)) {
                            Some(ch) => san.push(ch),
                            None => {
                                san.push('+');
                                push_letter(&mut san, variant, role);
                            }
                        }
                    }
                }
                Move::PieceDemotion { role, from, .. } => {
                    if notation.is_shogi() {
                        san.push('-');
                    } else {
                        san.push('=');
                        push_letter(&mut san, variant, pos.unpromoted_role_at(from).unwrap_or(role));
                    }
                }
                Move::Normal {
                    role,
                    from,
                    capture,
                    to,
                    promotion: None,
                    ..
                } if notation.is_shogi()
                    && pos.is_pseudo_legal(&Move::PiecePromotion {
                        role,
                        from,
                        capture,
                        to,
                    }) =>
                {
                    san.push('=');
                }
                _ => (),
            }

            if let Some(gate) = m.gate() {
                push_gate(&mut san, pos, gate, notation);
            }
        }
    }

    if !notation.is_shogi() && pos.gives_check(m) {
        let after = pos.play(m);
        san.push(if after.legal_moves().is_empty() { '#' } else { '+' });
    }

    san
}
