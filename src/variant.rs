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

//! Data-driven variant descriptions.
//!
//! A [`Variant`] describes board extents, piece letters, drop, castling
//! and promotion rules, the starting position and special win conditions.
//! It is plain data: all fields are public, so callers can describe their
//! own variants in addition to the built-in ones.
//!
//! # Examples
//!
//! ```
//! use fairyfen::{Role, Variant};
//!
//! let xiangqi = Variant::from_uci("xiangqi").expect("built-in variant");
//! assert_eq!(xiangqi.nb_files(), 9);
//! assert_eq!(xiangqi.nb_ranks(), 10);
//! assert_eq!(xiangqi.char_of(Role::Cannon), Some('c'));
//! ```

use bitflags::bitflags;

use crate::{
    bitboard::Bitboard,
    color::{ByColor, Color},
    role::{ByRole, Role, RoleSet},
    square::{File, Rank, Square},
    types::{CastlingSide, Piece},
};

bitflags! {
    /// Rule switches of a [`Variant`].
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Rules: u32 {
        /// Pieces in hand can be dropped onto the board. The FEN carries
        /// pockets.
        const PIECE_DROPS = 1 << 0;
        /// Captured pieces go to the hand of the capturer.
        const CAPTURES_TO_HAND = 1 << 1;
        const CASTLING = 1 << 2;
        /// Castling with arbitrary king and rook start files.
        const CHESS960 = 1 << 3;
        /// Pawns may advance two squares from their double step region.
        const DOUBLE_STEP = 1 << 4;
        /// Pawns promote to met in place or by a diagonal step, as in
        /// sittuyin.
        const SITTUYIN_PROMOTION = 1 << 5;
        /// Pieces in hand enter the board on squares vacated by back rank
        /// pieces, as in Seirawan chess.
        const GATING = 1 << 6;
        /// While a side has pieces in hand it must drop them.
        const MUST_DROP = 1 << 7;
        /// The FEN carries remaining checks and giving the last one wins.
        const CHECK_COUNTING = 1 << 8;
        /// Kings and advisors are confined to the palace.
        const PALACE = 1 << 9;
        /// Kings may not face each other on an open file.
        const FLYING_GENERAL = 1 << 10;
        /// Shogi drop restrictions (no second unpromoted pawn on a file, no
        /// drops onto squares without further moves).
        const SHOGI_DROPS = 1 << 11;
    }
}

/// Outcome of a special rule, from the point of view of the side it applies
/// to.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// The game ends once a side has lost all pieces of the given roles.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Extinction {
    /// Roles that count. An empty set means all pieces.
    pub roles: RoleSet,
    /// Result for the side whose pieces went extinct.
    pub result: GameResult,
}

/// Static description of a variant.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Variant {
    /// Name as used by the `UCI_Variant` option of engines.
    pub name: String,
    /// Family of the variant. Built-in values are `"shogi"`, `"xiangqi"`,
    /// `"janggi"` and the empty string.
    pub template: String,
    pub max_file: File,
    pub max_rank: Rank,
    /// Lowercase FEN letter of each role. Roles without a letter exist only
    /// as promoted forms, written with a `+` prefix.
    pub piece_chars: ByRole<Option<char>>,
    /// Alternative letters accepted on input and preferred by notation.
    pub synonyms: ByRole<Option<char>>,
    pub start_fen: String,
    pub rules: Rules,
    /// Roles a pawn may promote to.
    pub promotion_roles: RoleSet,
    /// First relative rank on which pawns promote.
    pub promotion_rank: Rank,
    /// Promoted form of each role, for shogi-style promotions.
    pub promoted_roles: ByRole<Option<Role>>,
    /// Number of ranks forming the zone for shogi-style promotions.
    pub promotion_zone: u32,
    /// Squares from which pawns may advance two squares.
    pub double_step_region: ByColor<Bitboard>,
    /// Squares onto which pieces may be dropped.
    pub drop_region: ByColor<Bitboard>,
    pub extinction: Option<Extinction>,
    /// Role that wins by reaching its target. The capture-the-flag piece.
    pub flag_role: Option<Role>,
    /// Result for the side to move when it has no legal moves and is not
    /// in check.
    pub stalemate: GameResult,
    /// Move limit of the makruk counting rule.
    pub counting_limit: Option<u32>,
    /// First relative rank on which soldiers may step sideways.
    pub soldier_sideways_rank: Rank,
}

fn chars(pieces: &[(Role, char)]) -> ByRole<Option<char>> {
    let mut table = ByRole::default();
    for &(role, ch) in pieces {
        table[role] = Some(ch);
    }
    table
}

fn ranks(color: Color, max_rank: Rank, relative: &[Rank]) -> Bitboard {
    relative
        .iter()
        .map(|&rank| Bitboard::relative_rank(color, rank, max_rank))
        .fold(Bitboard::EMPTY, |acc, bb| acc | bb)
}

const CHESS_PROMOTIONS: RoleSet =
    RoleSet::of(&[Role::Knight, Role::Bishop, Role::Rook, Role::Queen]);

impl Variant {
    /// Names of the built-in variants.
    pub const NAMES: [&'static str; 16] = [
        "chess",
        "chess960",
        "capablanca",
        "crazyhouse",
        "placement",
        "seirawan",
        "3check",
        "kingofthehill",
        "horde",
        "makruk",
        "shatranj",
        "sittuyin",
        "shogi",
        "minishogi",
        "xiangqi",
        "janggi",
    ];

    /// Selects a built-in variant by the name used by the `UCI_Variant`
    /// option of engines.
    pub fn from_uci(name: &str) -> Option<Variant> {
        Some(match name {
            "chess" => Variant::chess(),
            "chess960" => Variant::chess960(),
            "capablanca" => Variant::capablanca(),
            "crazyhouse" => Variant::crazyhouse(),
            "placement" => Variant::placement(),
            "seirawan" => Variant::seirawan(),
            "3check" => Variant::three_check(),
            "kingofthehill" => Variant::king_of_the_hill(),
            "horde" => Variant::horde(),
            "makruk" => Variant::makruk(),
            "shatranj" => Variant::shatranj(),
            "sittuyin" => Variant::sittuyin(),
            "shogi" => Variant::shogi(),
            "minishogi" => Variant::minishogi(),
            "xiangqi" => Variant::xiangqi(),
            "janggi" => Variant::janggi(),
            _ => return None,
        })
    }

    /// Standard chess.
    pub fn chess() -> Variant {
        let max_rank = Rank::EIGHTH;
        Variant {
            name: "chess".to_owned(),
            template: String::new(),
            max_file: File::H,
            max_rank,
            piece_chars: chars(&[
                (Role::Pawn, 'p'),
                (Role::Knight, 'n'),
                (Role::Bishop, 'b'),
                (Role::Rook, 'r'),
                (Role::Queen, 'q'),
                (Role::King, 'k'),
            ]),
            synonyms: ByRole::default(),
            start_fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_owned(),
            rules: Rules::CASTLING | Rules::DOUBLE_STEP,
            promotion_roles: CHESS_PROMOTIONS,
            promotion_rank: max_rank,
            promoted_roles: ByRole::default(),
            promotion_zone: 0,
            double_step_region: ByColor::new_with(|color| ranks(color, max_rank, &[Rank::SECOND])),
            drop_region: ByColor::new_with(|_| Bitboard::board(File::H, max_rank)),
            extinction: None,
            flag_role: None,
            stalemate: GameResult::Draw,
            counting_limit: None,
            soldier_sideways_rank: Rank::FIRST,
        }
    }

    /// Fischer random chess. The start FEN is the standard one.
    pub fn chess960() -> Variant {
        let mut variant = Variant::chess();
        variant.name = "chess960".to_owned();
        variant.rules |= Rules::CHESS960;
        variant
    }

    /// Capablanca chess on 10 by 8 with archbishop and chancellor.
    pub fn capablanca() -> Variant {
        let max_rank = Rank::EIGHTH;
        Variant {
            name: "capablanca".to_owned(),
            max_file: File::J,
            piece_chars: chars(&[
                (Role::Pawn, 'p'),
                (Role::Knight, 'n'),
                (Role::Bishop, 'b'),
                (Role::Rook, 'r'),
                (Role::Queen, 'q'),
                (Role::King, 'k'),
                (Role::Archbishop, 'a'),
                (Role::Chancellor, 'c'),
            ]),
            start_fen: "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1"
                .to_owned(),
            promotion_roles: CHESS_PROMOTIONS
                | RoleSet::of(&[Role::Archbishop, Role::Chancellor]),
            drop_region: ByColor::new_with(|_| Bitboard::board(File::J, max_rank)),
            ..Variant::chess()
        }
    }

    /// Chess where captured pieces can be dropped back onto the board.
    pub fn crazyhouse() -> Variant {
        let mut variant = Variant::chess();
        variant.name = "crazyhouse".to_owned();
        variant.start_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[] w KQkq - 0 1".to_owned();
        variant.rules |= Rules::PIECE_DROPS | Rules::CAPTURES_TO_HAND;
        variant
    }

    /// Chess where the pieces are first placed on the back rank.
    pub fn placement() -> Variant {
        let max_rank = Rank::EIGHTH;
        Variant {
            name: "placement".to_owned(),
            start_fen: "8/pppppppp/8/8/8/8/PPPPPPPP/8[KQRRBBNNkqrrbbnn] w - - 0 1".to_owned(),
            rules: Rules::PIECE_DROPS | Rules::MUST_DROP | Rules::DOUBLE_STEP,
            drop_region: ByColor::new_with(|color| ranks(color, max_rank, &[Rank::FIRST])),
            ..Variant::chess()
        }
    }

    /// Seirawan chess, where hawk and elephant are gated in.
    pub fn seirawan() -> Variant {
        let mut variant = Variant::chess();
        variant.name = "seirawan".to_owned();
        variant.piece_chars[Role::Archbishop] = Some('h');
        variant.piece_chars[Role::Chancellor] = Some('e');
        variant.start_fen =
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[HEhe] w KQBCDFGkqbcdfg - 0 1".to_owned();
        variant.rules |= Rules::GATING;
        variant.promotion_roles = CHESS_PROMOTIONS | RoleSet::of(&[Role::Archbishop, Role::Chancellor]);
        variant
    }

    /// Giving three checks wins.
    pub fn three_check() -> Variant {
        let mut variant = Variant::chess();
        variant.name = "3check".to_owned();
        variant.start_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 3+3 0 1".to_owned();
        variant.rules |= Rules::CHECK_COUNTING;
        variant
    }

    /// Bringing the king to the center wins.
    pub fn king_of_the_hill() -> Variant {
        let mut variant = Variant::chess();
        variant.name = "kingofthehill".to_owned();
        variant.flag_role = Some(Role::King);
        variant
    }

    /// White has 36 pawns and no king and loses once all of them are gone.
    pub fn horde() -> Variant {
        let max_rank = Rank::EIGHTH;
        let mut variant = Variant::chess();
        variant.name = "horde".to_owned();
        variant.start_fen =
            "rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP w kq - 0 1".to_owned();
        variant.double_step_region = ByColor {
            white: ranks(Color::White, max_rank, &[Rank::FIRST, Rank::SECOND]),
            black: ranks(Color::Black, max_rank, &[Rank::SECOND]),
        };
        variant.extinction = Some(Extinction {
            roles: RoleSet::EMPTY,
            result: GameResult::Loss,
        });
        variant
    }

    /// Thai chess.
    pub fn makruk() -> Variant {
        Variant {
            name: "makruk".to_owned(),
            piece_chars: chars(&[
                (Role::Pawn, 'p'),
                (Role::Knight, 'n'),
                (Role::Silver, 's'),
                (Role::Fers, 'm'),
                (Role::Rook, 'r'),
                (Role::King, 'k'),
            ]),
            start_fen: "rnsmksnr/8/pppppppp/8/8/PPPPPPPP/8/RNSKMSNR w - - 0 1".to_owned(),
            rules: Rules::empty(),
            promotion_roles: RoleSet::of(&[Role::Fers]),
            promotion_rank: Rank::SIXTH,
            counting_limit: Some(64),
            ..Variant::chess()
        }
    }

    /// Medieval chess with alfil and fers. A bare king loses.
    pub fn shatranj() -> Variant {
        Variant {
            name: "shatranj".to_owned(),
            piece_chars: chars(&[
                (Role::Pawn, 'p'),
                (Role::Knight, 'n'),
                (Role::Alfil, 'b'),
                (Role::Rook, 'r'),
                (Role::Fers, 'q'),
                (Role::King, 'k'),
            ]),
            start_fen: "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR w - - 0 1".to_owned(),
            rules: Rules::empty(),
            promotion_roles: RoleSet::of(&[Role::Fers]),
            extinction: Some(Extinction {
                roles: RoleSet::of(&[
                    Role::Pawn,
                    Role::Knight,
                    Role::Alfil,
                    Role::Rook,
                    Role::Fers,
                ]),
                result: GameResult::Loss,
            }),
            stalemate: GameResult::Loss,
            ..Variant::chess()
        }
    }

    /// Burmese chess. Pieces are placed behind the pawns before play.
    pub fn sittuyin() -> Variant {
        let max_rank = Rank::EIGHTH;
        Variant {
            name: "sittuyin".to_owned(),
            piece_chars: chars(&[
                (Role::Pawn, 'p'),
                (Role::Knight, 'n'),
                (Role::Silver, 's'),
                (Role::Fers, 'f'),
                (Role::Rook, 'r'),
                (Role::King, 'k'),
            ]),
            start_fen: "8/8/4pppp/pppp4/4PPPP/PPPP4/8/8[KFRRSSNNkfrrssnn] w - - 0 1".to_owned(),
            rules: Rules::PIECE_DROPS | Rules::MUST_DROP | Rules::SITTUYIN_PROMOTION,
            promotion_roles: RoleSet::of(&[Role::Fers]),
            promotion_rank: Rank::FIFTH,
            drop_region: ByColor::new_with(|color| {
                ranks(color, max_rank, &[Rank::FIRST, Rank::SECOND, Rank::THIRD])
            }),
            ..Variant::chess()
        }
    }

    /// Japanese chess.
    pub fn shogi() -> Variant {
        Variant::shogi_like(
            "shogi",
            File::I,
            Rank::NINTH,
            "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] w 0 1",
            3,
        )
    }

    /// Shogi on a 5 by 5 board.
    pub fn minishogi() -> Variant {
        Variant::shogi_like("minishogi", File::E, Rank::FIFTH, "rbsgk/4p/5/P4/KGSBR[-] w 0 1", 1)
    }

    fn shogi_like(
        name: &str,
        max_file: File,
        max_rank: Rank,
        start_fen: &str,
        promotion_zone: u32,
    ) -> Variant {
        let mut promoted_roles = ByRole::default();
        for role in [Role::ShogiPawn, Role::Lance, Role::ShogiKnight, Role::Silver] {
            promoted_roles[role] = Some(Role::Gold);
        }
        promoted_roles[Role::Bishop] = Some(Role::DragonHorse);
        promoted_roles[Role::Rook] = Some(Role::Dragon);

        Variant {
            name: name.to_owned(),
            template: "shogi".to_owned(),
            max_file,
            max_rank,
            piece_chars: chars(&[
                (Role::ShogiPawn, 'p'),
                (Role::Lance, 'l'),
                (Role::ShogiKnight, 'n'),
                (Role::Silver, 's'),
                (Role::Gold, 'g'),
                (Role::Bishop, 'b'),
                (Role::Rook, 'r'),
                (Role::King, 'k'),
            ]),
            synonyms: ByRole::default(),
            start_fen: start_fen.to_owned(),
            rules: Rules::PIECE_DROPS | Rules::CAPTURES_TO_HAND | Rules::SHOGI_DROPS,
            promotion_roles: RoleSet::EMPTY,
            promotion_rank: max_rank,
            promoted_roles,
            promotion_zone,
            double_step_region: ByColor::default(),
            drop_region: ByColor::new_with(|_| Bitboard::board(max_file, max_rank)),
            extinction: None,
            flag_role: None,
            stalemate: GameResult::Loss,
            counting_limit: None,
            soldier_sideways_rank: Rank::FIRST,
        }
    }

    /// Chinese chess.
    pub fn xiangqi() -> Variant {
        let max_file = File::I;
        let max_rank = Rank::TENTH;
        let mut synonyms = ByRole::default();
        synonyms[Role::Horse] = Some('h');
        synonyms[Role::Elephant] = Some('e');

        Variant {
            name: "xiangqi".to_owned(),
            template: "xiangqi".to_owned(),
            max_file,
            max_rank,
            piece_chars: chars(&[
                (Role::Soldier, 'p'),
                (Role::Horse, 'n'),
                (Role::Elephant, 'b'),
                (Role::Rook, 'r'),
                (Role::Fers, 'a'),
                (Role::King, 'k'),
                (Role::Cannon, 'c'),
            ]),
            synonyms,
            start_fen:
                "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1".to_owned(),
            rules: Rules::PALACE | Rules::FLYING_GENERAL,
            promotion_roles: RoleSet::EMPTY,
            promotion_rank: max_rank,
            promoted_roles: ByRole::default(),
            promotion_zone: 0,
            double_step_region: ByColor::default(),
            drop_region: ByColor::default(),
            extinction: None,
            flag_role: None,
            stalemate: GameResult::Loss,
            counting_limit: None,
            soldier_sideways_rank: Rank::SIXTH,
        }
    }

    /// Korean chess. Palace diagonals are not modelled.
    pub fn janggi() -> Variant {
        let mut variant = Variant::xiangqi();
        variant.name = "janggi".to_owned();
        variant.template = "janggi".to_owned();
        variant.piece_chars = chars(&[
            (Role::Soldier, 'p'),
            (Role::Horse, 'n'),
            (Role::JanggiElephant, 'b'),
            (Role::Rook, 'r'),
            (Role::Wazir, 'a'),
            (Role::King, 'k'),
            (Role::JanggiCannon, 'c'),
        ]);
        variant.synonyms = ByRole::default();
        variant.synonyms[Role::Horse] = Some('h');
        variant.synonyms[Role::JanggiElephant] = Some('e');
        variant.start_fen =
            "rnba1abnr/4k4/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/4K4/RNBA1ABNR w - - 0 1".to_owned();
        variant.rules = Rules::PALACE;
        variant.stalemate = GameResult::Draw;
        variant.soldier_sideways_rank = Rank::FIRST;
        variant
    }

    #[inline]
    pub const fn nb_files(&self) -> u32 {
        self.max_file.index() + 1
    }

    #[inline]
    pub const fn nb_ranks(&self) -> u32 {
        self.max_rank.index() + 1
    }

    /// The squares of the board.
    #[inline]
    pub const fn board_mask(&self) -> Bitboard {
        Bitboard::board(self.max_file, self.max_rank)
    }

    pub fn contains(&self, sq: Square) -> bool {
        sq.file() <= self.max_file && sq.rank() <= self.max_rank
    }

    /// Lowercase FEN letter of `role`.
    #[inline]
    pub fn char_of(&self, role: Role) -> Option<char> {
        self.piece_chars[role]
    }

    /// FEN letter of `piece`, uppercase for white.
    pub fn piece_char(&self, piece: Piece) -> Option<char> {
        self.char_of(piece.role).map(|ch| cased(ch, piece.color))
    }

    /// Synonym letter of `piece`, uppercase for white.
    pub fn synonym_char(&self, piece: Piece) -> Option<char> {
        self.synonyms[piece.role].map(|ch| cased(ch, piece.color))
    }

    /// Reads a FEN letter or synonym. Uppercase letters are white.
    pub fn piece_from_char(&self, ch: char) -> Option<Piece> {
        let lower = ch.to_ascii_lowercase();
        let color = Color::from_white(ch.is_ascii_uppercase());
        Role::ALL
            .into_iter()
            .find(|&role| self.piece_chars[role] == Some(lower))
            .or_else(|| {
                Role::ALL
                    .into_iter()
                    .find(|&role| self.synonyms[role] == Some(lower))
            })
            .map(|role| role.of(color))
    }

    /// Roles that can appear on the board, promoted forms included.
    pub fn piece_types(&self) -> RoleSet {
        Role::ALL
            .into_iter()
            .filter(|&role| self.piece_chars[role].is_some())
            .chain(self.promoted_roles.0.iter().flatten().copied())
            .collect()
    }

    #[inline]
    pub fn promoted_role(&self, role: Role) -> Option<Role> {
        self.promoted_roles[role]
    }

    /// Number of whitespace separated fields of the start FEN.
    pub fn fen_field_count(&self) -> usize {
        self.start_fen.split(' ').filter(|part| !part.is_empty()).count()
    }

    /// Checks if promoted pieces are written with a `~` suffix, so that
    /// they can be told apart from original pieces.
    pub fn distinguishes_promoted(&self) -> bool {
        self.rules.contains(Rules::CAPTURES_TO_HAND) && !self.promotion_roles.is_empty()
    }

    /// Checks if the FEN of this variant carries pockets.
    pub fn has_pockets(&self) -> bool {
        self.rules.intersects(Rules::PIECE_DROPS | Rules::GATING)
    }

    /// The palace of `color`, the centered three by three region on its
    /// side of the board.
    pub fn palace(&self, color: Color) -> Bitboard {
        let center = self.nb_files() / 2;
        let files = (center - 1..=center + 1)
            .filter_map(File::try_new)
            .fold(Bitboard::EMPTY, |acc, file| acc | Bitboard::file(file));
        let ranks = ranks(color, self.max_rank, &[Rank::FIRST, Rank::SECOND, Rank::THIRD]);
        files & ranks & self.board_mask()
    }

    /// The half of the board on the side of `color`.
    pub fn home_half(&self, color: Color) -> Bitboard {
        let half: Vec<Rank> = (0..self.nb_ranks() / 2).filter_map(Rank::try_new).collect();
        ranks(color, self.max_rank, &half) & self.board_mask()
    }

    /// Squares a piece of the given role and color may ever stand on.
    pub fn mobility_region(&self, color: Color, role: Role) -> Bitboard {
        match role {
            Role::King | Role::Fers | Role::Wazir if self.rules.contains(Rules::PALACE) => {
                self.palace(color)
            }
            Role::Elephant => self.home_half(color),
            _ => self.board_mask(),
        }
    }

    /// Squares on which pawns of `color` promote.
    pub fn promotion_region(&self, color: Color) -> Bitboard {
        let relative: Vec<Rank> = (self.promotion_rank.index()..=self.max_rank.index())
            .filter_map(Rank::try_new)
            .collect();
        let region = ranks(color, self.max_rank, &relative) & self.board_mask();
        if self.rules.contains(Rules::SITTUYIN_PROMOTION) {
            region & self.main_diagonals()
        } else {
            region
        }
    }

    fn main_diagonals(&self) -> Bitboard {
        self.board_mask()
            .filter(|sq| {
                let file = sq.file().index();
                let rank = sq.rank().index();
                file == rank || file + rank == self.max_file.index()
            })
            .collect()
    }

    /// Squares on which shogi-style promotions of `color` start or end.
    pub fn promotion_zone(&self, color: Color) -> Bitboard {
        let relative: Vec<Rank> = (0..self.promotion_zone)
            .filter_map(|i| Rank::try_new(self.max_rank.index().checked_sub(i)?))
            .collect();
        ranks(color, self.max_rank, &relative) & self.board_mask()
    }

    /// Target square of the king when castling.
    pub fn castling_king_to(&self, color: Color, side: CastlingSide) -> Option<Square> {
        let file = match side {
            CastlingSide::KingSide => self.max_file.offset(-1)?,
            CastlingSide::QueenSide => File::C,
        };
        Some(Square::from_coords(file, self.backrank(color)))
    }

    /// Target square of the rook when castling.
    pub fn castling_rook_to(&self, color: Color, side: CastlingSide) -> Option<Square> {
        let king_to = self.castling_king_to(color, side)?;
        king_to.offset(if side.is_king_side() { -1 } else { 1 }, 0)
    }

    /// The first rank of `color`.
    pub fn backrank(&self, color: Color) -> Rank {
        color.fold_wb(Rank::FIRST, self.max_rank)
    }
}

impl Default for Variant {
    fn default() -> Variant {
        Variant::chess()
    }
}

fn cased(ch: char, color: Color) -> char {
    color.fold_wb(ch.to_ascii_uppercase(), ch.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_from_uci() {
        for name in Variant::NAMES {
            let variant = Variant::from_uci(name).expect("built-in variant");
            assert_eq!(variant.name, name);
        }
        assert!(Variant::from_uci("atomic").is_none());
    }

    #[test]
    fn test_piece_chars() {
        let xiangqi = Variant::xiangqi();
        assert_eq!(
            xiangqi.piece_from_char('H'),
            Some(Role::Horse.of(Color::White))
        );
        assert_eq!(
            xiangqi.piece_from_char('n'),
            Some(Role::Horse.of(Color::Black))
        );
        assert_eq!(xiangqi.synonym_char(Role::Elephant.of(Color::White)), Some('E'));
        assert_eq!(xiangqi.piece_from_char('q'), None);
    }

    #[test]
    fn test_piece_types() {
        let shogi = Variant::shogi();
        let types = shogi.piece_types();
        assert!(types.contains(Role::Dragon));
        assert!(types.contains(Role::Gold));
        assert!(!types.contains(Role::Pawn));
        assert_eq!(shogi.char_of(Role::Dragon), None);
    }

    #[test]
    fn test_palace() {
        let xiangqi = Variant::xiangqi();
        let palace = xiangqi.palace(Color::Black);
        assert_eq!(palace.count(), 9);
        assert!(palace.contains(sq("e10")));
        assert!(palace.contains(sq("d8")));
        assert!(!palace.contains(sq("c10")));
        assert_eq!(xiangqi.mobility_region(Color::White, Role::Elephant).count(), 45);
        assert_eq!(xiangqi.mobility_region(Color::White, Role::Rook).count(), 90);
    }

    #[test]
    fn test_promotion_zone() {
        let shogi = Variant::shogi();
        let zone = shogi.promotion_zone(Color::White);
        assert_eq!(zone.count(), 27);
        assert!(zone.contains(sq("a7")));
        assert!(!zone.contains(sq("a6")));
        assert!(shogi.promotion_zone(Color::Black).contains(sq("i3")));
    }

    #[test]
    fn test_sittuyin_promotion_region() {
        let sittuyin = Variant::sittuyin();
        let region = sittuyin.promotion_region(Color::White);
        assert_eq!(region.count(), 8);
        assert!(region.contains(sq("d5")));
        assert!(region.contains(sq("h8")));
        assert!(!region.contains(sq("d4")));
    }

    #[test]
    fn test_castling_targets() {
        let capablanca = Variant::capablanca();
        assert_eq!(
            capablanca.castling_king_to(Color::White, CastlingSide::KingSide),
            Some(sq("i1"))
        );
        assert_eq!(
            capablanca.castling_rook_to(Color::Black, CastlingSide::QueenSide),
            Some(sq("d8"))
        );
    }

    #[test]
    fn test_fen_field_count() {
        assert_eq!(Variant::chess().fen_field_count(), 6);
        assert_eq!(Variant::three_check().fen_field_count(), 7);
        assert_eq!(Variant::shogi().fen_field_count(), 4);
    }
}
