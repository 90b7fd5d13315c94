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

//! Parse and write moves in Universal Chess Interface representation.
//!
//! Board moves are written as origin and target square, followed by the
//! letter of a promotion or of a gated piece, or by `+` or `-` for piece
//! promotions and demotions. Drops are written as `P@e4`. Castling is
//! written as the king capturing its own rook, but the king's target
//! square is accepted as well. A piece gated in on the rook square while
//! castling is written as the rook capturing the king, e.g. `h1e1h`.
//!
//! # Examples
//!
//! ```
//! use fairyfen::{uci::UciMove, Fairy, Position, Variant};
//!
//! let mut pos = Fairy::new(Variant::shogi())?;
//! let uci: UciMove = "c3c4".parse()?;
//! let m = uci.to_move(&pos)?;
//! pos.do_move(&m);
//! assert_eq!(UciMove::from_move(&m, pos.variant()).to_string(), "c3c4");
//!
//! # #[derive(Debug)] struct CommonError;
//! # impl From<fairyfen::FromFenError> for CommonError { fn from(_: fairyfen::FromFenError) -> Self { Self } }
//! # impl From<fairyfen::uci::ParseUciError> for CommonError { fn from(_: fairyfen::uci::ParseUciError) -> Self { Self } }
//! # impl From<fairyfen::uci::IllegalUciMoveError> for CommonError { fn from(_: fairyfen::uci::IllegalUciMoveError) -> Self { Self } }
//! # Ok::<_, CommonError>(())
//! ```

use core::{fmt, str::FromStr};
use std::error::Error;

use crate::{
    m::Move,
    position::Position,
    role::Role,
    square::Square,
    variant::Variant,
};

/// Error when parsing an invalid UCI move.
#[derive(Clone, Debug)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

/// Error when a UCI move is not legal in the position.
#[derive(Clone, Debug)]
pub struct IllegalUciMoveError;

impl fmt::Display for IllegalUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal uci move")
    }
}

impl Error for IllegalUciMoveError {}

/// What follows the squares of a board move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UciSuffix {
    /// Lowercase letter of a promotion or of a gated piece.
    Piece(char),
    /// `+`, a piece promotion.
    Promote,
    /// `-`, a piece demotion.
    Demote,
}

/// A move as represented in the UCI protocol.
///
/// Piece letters are kept as written, since their meaning depends on the
/// variant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UciMove {
    Normal {
        from: Square,
        to: Square,
        suffix: Option<UciSuffix>,
    },
    /// A drop. `piece` is the uppercase letter.
    Put { piece: char, to: Square },
    /// `0000`.
    Null,
}

/// Splits a square like `e4` or `a10` off the front of `s`.
fn split_square(s: &[u8]) -> Option<(Square, &[u8])> {
    let digits = s
        .iter()
        .skip(1)
        .take(2)
        .take_while(|b| b.is_ascii_digit())
        .count();
    let (sq, rest) = s.split_at_checked(1 + digits)?;
    Some((Square::from_ascii(sq).ok()?, rest))
}

impl UciMove {
    /// Parses a move like `e2e4`, `e7e8q`, `c3c4+` or `P@e4`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciError`] if the syntax is invalid.
    pub fn from_ascii(s: &[u8]) -> Result<UciMove, ParseUciError> {
        if s == b"0000" {
            return Ok(UciMove::Null);
        }

        if let [piece, b'@', to @ ..] = s {
            if !piece.is_ascii_alphabetic() {
                return Err(ParseUciError);
            }
            let (to, rest) = split_square(to).ok_or(ParseUciError)?;
            return if rest.is_empty() {
                Ok(UciMove::Put {
                    piece: char::from(piece.to_ascii_uppercase()),
                    to,
                })
            } else {
                Err(ParseUciError)
            };
        }

        let (from, rest) = split_square(s).ok_or(ParseUciError)?;
        let (to, rest) = split_square(rest).ok_or(ParseUciError)?;
        let suffix = match *rest {
            [] => None,
            [b'+'] => Some(UciSuffix::Promote),
            [b'-'] => Some(UciSuffix::Demote),
            [ch] if ch.is_ascii_alphabetic() => {
                Some(UciSuffix::Piece(char::from(ch.to_ascii_lowercase())))
            }
            _ => return Err(ParseUciError),
        };
        Ok(UciMove::Normal { from, to, suffix })
    }

    /// Converts a move to its UCI representation in `variant`.
    pub fn from_move(m: &Move, variant: &Variant) -> UciMove {
        let letter = |role: Role| UciSuffix::Piece(variant.char_of(role).unwrap_or('?'));
        match *m {
            Move::Normal {
                from,
                to,
                promotion,
                gate,
                ..
            } => UciMove::Normal {
                from,
                to,
                suffix: promotion.or(gate.map(|gate| gate.role)).map(letter),
            },
            Move::PiecePromotion { from, to, .. } => UciMove::Normal {
                from,
                to,
                suffix: Some(UciSuffix::Promote),
            },
            Move::PieceDemotion { from, to, .. } => UciMove::Normal {
                from,
                to,
                suffix: Some(UciSuffix::Demote),
            },
            Move::EnPassant { from, to } => UciMove::Normal {
                from,
                to,
                suffix: None,
            },
            Move::Castle {
                king,
                rook,
                gate: Some(gate),
            } if gate.square == rook => UciMove::Normal {
                from: rook,
                to: king,
                suffix: Some(letter(gate.role)),
            },
            Move::Castle { king, rook, gate } => UciMove::Normal {
                from: king,
                to: rook,
                suffix: gate.map(|gate| letter(gate.role)),
            },
            Move::Drop { role, to, .. } => UciMove::Put {
                piece: variant.char_of(role).unwrap_or('?').to_ascii_uppercase(),
                to,
            },
        }
    }

    /// Checks if this is a castling move written with the king's target
    /// square, like `e1g1`.
    fn is_king_to_castle<P: Position>(&self, m: &Move, pos: &P) -> bool {
        let (UciMove::Normal { from, to, suffix }, Move::Castle { king, rook, gate }) = (*self, *m) else {
            return false;
        };
        let Some(side) = m.castling_side() else {
            return false;
        };
        let variant = pos.variant();
        if from != king || to == rook || variant.castling_king_to(pos.turn(), side) != Some(to) {
            return false;
        }
        match (gate, suffix) {
            (None, None) => true,
            (Some(gate), Some(UciSuffix::Piece(ch))) => {
                gate.square == king && variant.char_of(gate.role) == Some(ch)
            }
            _ => false,
        }
    }

    /// Finds the legal move of `pos` this UCI move stands for.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUciMoveError`] if there is no such legal move.
    pub fn to_move<P: Position>(&self, pos: &P) -> Result<Move, IllegalUciMoveError> {
        let variant = pos.variant();
        pos.legal_moves()
            .into_iter()
            .find(|m| UciMove::from_move(m, variant) == *self || self.is_king_to_castle(m, pos))
            .ok_or(IllegalUciMoveError)
    }
}

impl FromStr for UciMove {
    type Err = ParseUciError;

    fn from_str(s: &str) -> Result<UciMove, ParseUciError> {
        UciMove::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            UciMove::Normal { from, to, suffix } => {
                write!(f, "{from}{to}")?;
                match suffix {
                    Some(UciSuffix::Piece(ch)) => write!(f, "{ch}"),
                    Some(UciSuffix::Promote) => f.write_str("+"),
                    Some(UciSuffix::Demote) => f.write_str("-"),
                    None => Ok(()),
                }
            }
            UciMove::Put { piece, to } => write!(f, "{piece}@{to}"),
            UciMove::Null => f.write_str("0000"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Fairy;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "a10b9".parse::<UciMove>().ok(),
            Some(UciMove::Normal {
                from: sq("a10"),
                to: sq("b9"),
                suffix: None
            })
        );
        assert_eq!(
            "e7e8Q".parse::<UciMove>().ok(),
            Some(UciMove::Normal {
                from: sq("e7"),
                to: sq("e8"),
                suffix: Some(UciSuffix::Piece('q'))
            })
        );
        assert_eq!(
            "n@f3".parse::<UciMove>().ok(),
            Some(UciMove::Put {
                piece: 'N',
                to: sq("f3")
            })
        );
        assert_eq!("0000".parse::<UciMove>().ok(), Some(UciMove::Null));
        for invalid in ["", "e2", "e2e", "e2e4qq", "e0e1", "m1a1", "@e4", "P@e4x", "e2e4*"] {
            assert!(invalid.parse::<UciMove>().is_err(), "{invalid}");
        }
    }

    #[test]
    fn test_roundtrip_legal_moves() {
        for variant in [Variant::chess(), Variant::shogi(), Variant::seirawan(), Variant::xiangqi()] {
            let pos = Fairy::new(variant).expect("valid start position");
            for m in pos.legal_moves() {
                let uci = UciMove::from_move(&m, pos.variant());
                let parsed: UciMove = uci.to_string().parse().expect("valid uci");
                assert_eq!(parsed.to_move(&pos).ok(), Some(m), "{uci}");
            }
        }
    }

    #[test]
    fn test_castling() {
        let pos = Fairy::from_fen(Variant::chess(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("valid position");
        let castle = Move::Castle {
            king: sq("e1"),
            rook: sq("h1"),
            gate: None,
        };
        for uci in ["e1h1", "e1g1"] {
            let uci: UciMove = uci.parse().expect("valid uci");
            assert_eq!(uci.to_move(&pos).ok(), Some(castle));
        }
        assert!("e1f1".parse::<UciMove>().expect("valid uci").to_move(&pos).is_ok());
        assert!("e1e3".parse::<UciMove>().expect("valid uci").to_move(&pos).is_err());
    }

    #[test]
    fn test_gating() {
        let pos = Fairy::new(Variant::seirawan()).expect("valid start position");
        let m = "g1f3h".parse::<UciMove>().expect("valid uci").to_move(&pos).expect("legal");
        assert_eq!(m.gate().map(|gate| (gate.role, gate.square)), Some((Role::Archbishop, sq("g1"))));
    }
}
