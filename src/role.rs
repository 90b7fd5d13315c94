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

use core::{fmt, iter::FromIterator, ops};

use crate::{color::Color, types::Piece};

/// Piece types of all supported variants.
///
/// Roles describe movement, not names: the makruk khon and the shogi
/// silver general are both a [`Role::Silver`], the xiangqi advisor and the
/// makruk met are both a [`Role::Fers`]. Which letter a role uses in
/// FEN and notation is decided by the [`Variant`](crate::Variant).
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Role {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Commoner,
    Fers,
    Alfil,
    FersAlfil,
    Wazir,
    Archbishop,
    Chancellor,
    Centaur,
    ShogiPawn,
    Lance,
    ShogiKnight,
    Silver,
    Gold,
    DragonHorse,
    Dragon,
    Horse,
    Elephant,
    Cannon,
    Soldier,
    JanggiElephant,
    JanggiCannon,
}

impl Role {
    /// Number of distinct roles.
    pub const COUNT: usize = 27;

    /// All roles, in index order.
    pub const ALL: [Role; Role::COUNT] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
        Role::Commoner,
        Role::Fers,
        Role::Alfil,
        Role::FersAlfil,
        Role::Wazir,
        Role::Archbishop,
        Role::Chancellor,
        Role::Centaur,
        Role::ShogiPawn,
        Role::Lance,
        Role::ShogiKnight,
        Role::Silver,
        Role::Gold,
        Role::DragonHorse,
        Role::Dragon,
        Role::Horse,
        Role::Elephant,
        Role::Cannon,
        Role::Soldier,
        Role::JanggiElephant,
        Role::JanggiCannon,
    ];

    /// Gets a [`Piece`] of the given color.
    ///
    /// # Examples
    ///
    /// ```
    /// use fairyfen::{Color, Piece, Role};
    ///
    /// assert_eq!(Role::Cannon.of(Color::Black), Piece { color: Color::Black, role: Role::Cannon });
    /// ```
    #[inline]
    pub const fn of(self, color: Color) -> Piece {
        Piece { color, role: self }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase English name of the piece type.
    pub const fn name(self) -> &'static str {
        match self {
            Role::Pawn => "pawn",
            Role::Knight => "knight",
            Role::Bishop => "bishop",
            Role::Rook => "rook",
            Role::Queen => "queen",
            Role::King => "king",
            Role::Commoner => "commoner",
            Role::Fers => "fers",
            Role::Alfil => "alfil",
            Role::FersAlfil => "fers-alfil",
            Role::Wazir => "wazir",
            Role::Archbishop => "archbishop",
            Role::Chancellor => "chancellor",
            Role::Centaur => "centaur",
            Role::ShogiPawn => "shogi pawn",
            Role::Lance => "lance",
            Role::ShogiKnight => "shogi knight",
            Role::Silver => "silver",
            Role::Gold => "gold",
            Role::DragonHorse => "dragon horse",
            Role::Dragon => "dragon",
            Role::Horse => "horse",
            Role::Elephant => "elephant",
            Role::Cannon => "cannon",
            Role::Soldier => "soldier",
            Role::JanggiElephant => "janggi elephant",
            Role::JanggiCannon => "janggi cannon",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`Role`]s.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct RoleSet(u32);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    /// Builds a set from a slice, usable in constants.
    pub const fn of(roles: &[Role]) -> RoleSet {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= 1 << roles[i] as u32;
            i += 1;
        }
        RoleSet(bits)
    }

    #[inline]
    pub const fn contains(self, role: Role) -> bool {
        self.0 & (1 << role as u32) != 0
    }

    #[inline]
    pub fn insert(&mut self, role: Role) {
        self.0 |= 1 << role as u32;
    }

    #[inline]
    pub fn remove(&mut self, role: Role) {
        self.0 &= !(1 << role as u32);
    }

    #[inline]
    #[must_use]
    pub const fn with(self, role: Role) -> RoleSet {
        RoleSet(self.0 | 1 << role as u32)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |&role| self.contains(role))
    }
}

impl ops::BitOr for RoleSet {
    type Output = RoleSet;

    fn bitor(self, other: RoleSet) -> RoleSet {
        RoleSet(self.0 | other.0)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> RoleSet {
        let mut set = RoleSet::EMPTY;
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Container with a value for each [`Role`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct ByRole<T>(pub [T; Role::COUNT]);

impl<T> ByRole<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> ByRole<T>
    where
        F: FnMut(Role) -> T,
    {
        ByRole(Role::ALL.map(&mut init))
    }

    #[inline]
    pub const fn get(&self, role: Role) -> &T {
        &self.0[role as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, role: Role) -> &mut T {
        &mut self.0[role as usize]
    }

    /// Iterates over roles and their values, in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T: Default> Default for ByRole<T> {
    fn default() -> ByRole<T> {
        ByRole::new_with(|_| T::default())
    }
}

impl<T> ops::Index<Role> for ByRole<T> {
    type Output = T;

    #[inline]
    fn index(&self, role: Role) -> &T {
        self.get(role)
    }
}

impl<T> ops::IndexMut<Role> for ByRole<T> {
    #[inline]
    fn index_mut(&mut self, role: Role) -> &mut T {
        self.get_mut(role)
    }
}

/// Pieces in hand of one side.
pub type Hand = ByRole<u8>;

impl ByRole<u8> {
    /// Total number of pieces in hand.
    pub fn count(&self) -> usize {
        self.0.iter().map(|&n| usize::from(n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_order() {
        for (i, role) in Role::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_role_set() {
        const MATING: RoleSet = RoleSet::of(&[Role::Rook, Role::Gold]);
        assert!(MATING.contains(Role::Gold));
        assert!(!MATING.contains(Role::Bishop));
        assert_eq!(MATING.count(), 2);
        assert_eq!(MATING.iter().collect::<Vec<_>>(), [Role::Rook, Role::Gold]);

        let mut set: RoleSet = [Role::Cannon, Role::Horse].into_iter().collect();
        set.remove(Role::Cannon);
        assert_eq!(set, RoleSet::EMPTY.with(Role::Horse));
    }

    #[test]
    fn test_hand() {
        let mut hand = Hand::default();
        assert!(hand.is_empty());
        hand[Role::Silver] += 2;
        hand[Role::ShogiPawn] += 1;
        assert_eq!(hand.count(), 3);
    }
}
