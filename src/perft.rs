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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use fairyfen::{perft::perft, Fairy, Variant};
//!
//! let mut pos = Fairy::new(Variant::chess())?;
//! assert_eq!(perft(&mut pos, 1), 20);
//! assert_eq!(perft(&mut pos, 2), 400);
//! assert_eq!(perft(&mut pos, 3), 8902);
//! # Ok::<_, fairyfen::FromFenError>(())
//! ```

use crate::{position::Position, uci::UciMove};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the
/// final position. Useful for comparing, testing and debugging move
/// generation correctness. The position is restored before returning.
pub fn perft<P: Position>(pos: &mut P, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for m in &moves {
        pos.do_move(m);
        nodes += perft(pos, depth - 1);
        pos.undo_move();
    }
    nodes
}

/// Like [`perft()`], but returns the count below each legal move, for
/// comparing against other move generators.
pub fn divide<P: Position>(pos: &mut P, depth: u32) -> Vec<(UciMove, u64)> {
    let moves = pos.legal_moves();
    let mut counts = Vec::with_capacity(moves.len());
    for m in &moves {
        let uci = UciMove::from_move(m, pos.variant());
        pos.do_move(m);
        let nodes = perft(pos, depth.saturating_sub(1));
        pos.undo_move();
        tracing::trace!(%uci, nodes, "divide");
        counts.push((uci, nodes));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{position::Fairy, variant::Variant};

    #[test]
    fn test_divide() {
        let mut pos = Fairy::new(Variant::chess()).expect("valid start position");
        let counts = divide(&mut pos, 2);
        assert_eq!(counts.len(), 20);
        assert!(counts.iter().all(|&(_, nodes)| nodes == 20));
        assert_eq!(pos.ply(), 0);
    }

    #[test]
    fn test_minishogi() {
        let mut pos = Fairy::new(Variant::minishogi()).expect("valid start position");
        assert_eq!(perft(&mut pos, 1), 14);
        assert_eq!(perft(&mut pos, 2), 181);
    }
}
