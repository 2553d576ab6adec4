//! Unit model and single-step movement.
//!
//! A unit is a soldier or tank belonging to one country. It occupies a grid
//! cell and, while active, takes one uniformly random orthogonal step per
//! tick. Movement is identical across kinds; only the collision resolver
//! branches on [`UnitKind`].
//!
//! The random source is passed in by the caller (`&mut impl Rng`), so tests
//! can seed it for replay, and the candidate-offset set is exposed through
//! [`legal_moves`] for direct assertion.

use glam::IVec2;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::country::CountryId;
use crate::GRID_SIZE;

/// Orthogonal neighbour offsets considered for one movement step.
const STEP_OFFSETS: [IVec2; 4] = [
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
];

/// The two kinds of combat unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Infantry. Dies to enemy tanks and to enemy soldiers.
    Soldier,
    /// Armour. Dies only to enemy tanks.
    Tank,
}

impl UnitKind {
    /// Single-letter tag used in unit identifiers.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Soldier => 'S',
            Self::Tank => 'T',
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Soldier => write!(f, "Soldier"),
            Self::Tank => write!(f, "Tank"),
        }
    }
}

/// Stable string identity of a unit, e.g. `"Aquila-S1"` or `"Borea-T3"`.
///
/// # Example
///
/// ```
/// use skirmish_core::{UnitId, UnitKind};
///
/// let id = UnitId::new("Aquila", UnitKind::Soldier, 1);
/// assert_eq!(id.as_str(), "Aquila-S1");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(String);

impl UnitId {
    /// Builds the id for the `ordinal`-th unit of `kind` enlisted by `country`.
    #[must_use]
    pub fn new(country: &str, kind: UnitKind, ordinal: u32) -> Self {
        Self(format!("{country}-{}{ordinal}", kind.letter()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the step offsets that keep `pos + offset` inside the grid.
///
/// An offset is excluded only when it would cross the grid edge in its
/// direction, so an interior cell has 4 candidates, an edge cell 3, and a
/// corner cell exactly 2.
///
/// # Example
///
/// ```
/// use glam::IVec2;
/// use skirmish_core::legal_moves;
///
/// assert_eq!(legal_moves(IVec2::ZERO).len(), 2);
/// assert_eq!(legal_moves(IVec2::new(5, 5)).len(), 4);
/// ```
#[must_use]
pub fn legal_moves(pos: IVec2) -> Vec<IVec2> {
    STEP_OFFSETS
        .iter()
        .copied()
        .filter(|offset| {
            let next = pos + *offset;
            (0..GRID_SIZE).contains(&next.x) && (0..GRID_SIZE).contains(&next.y)
        })
        .collect()
}

/// A soldier or tank on the battlefield.
///
/// Units are created once, at country enlistment, on a uniformly random
/// cell. The `active` flag only ever transitions true to false, via the
/// collision resolver; inactive units are pruned from the battlefield within
/// the same tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    country: String,
    country_id: CountryId,
    pos: IVec2,
    kind: UnitKind,
    active: bool,
}

impl Unit {
    /// Creates a unit for `country` on a uniformly random cell.
    pub fn spawn<R: Rng + ?Sized>(
        country: &str,
        country_id: CountryId,
        kind: UnitKind,
        ordinal: u32,
        rng: &mut R,
    ) -> Self {
        let pos = IVec2::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));
        Self {
            id: UnitId::new(country, kind, ordinal),
            country: country.to_owned(),
            country_id,
            pos,
            kind,
            active: true,
        }
    }

    /// Takes one movement step: picks one legal offset uniformly at random.
    ///
    /// Inactive units never move. If no offset is legal (impossible for
    /// grids of side 2 or more) the unit stays in place.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.active {
            return;
        }
        let moves = legal_moves(self.pos);
        if let Some(offset) = moves.choose(rng) {
            self.pos += *offset;
        }
    }

    /// Parks the unit on a specific cell, for scenario setup.
    ///
    /// The cell must lie inside the grid.
    pub fn place(&mut self, pos: IVec2) {
        debug_assert!(
            (0..GRID_SIZE).contains(&pos.x) && (0..GRID_SIZE).contains(&pos.y),
            "placement outside the grid: {pos}"
        );
        self.pos = pos;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Returns the unit's stable identity.
    #[must_use]
    pub const fn id(&self) -> &UnitId {
        &self.id
    }

    /// Returns the name of the owning country.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the numeric id of the owning country.
    #[must_use]
    pub const fn country_id(&self) -> CountryId {
        self.country_id
    }

    /// Returns the unit's current grid cell.
    #[must_use]
    pub const fn pos(&self) -> IVec2 {
        self.pos
    }

    /// Returns the unit's kind.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Returns whether the unit still participates in movement and combat.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    /// Returns `true` if this unit is a soldier.
    #[must_use]
    pub const fn is_soldier(&self) -> bool {
        matches!(self.kind, UnitKind::Soldier)
    }

    /// Returns `true` if this unit is a tank.
    #[must_use]
    pub const fn is_tank(&self) -> bool {
        matches!(self.kind, UnitKind::Tank)
    }
}
