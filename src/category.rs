//! World collection identities.

use serde::{Deserialize, Serialize};

/// The four entity collections a world owns, in update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Shots fired by weapons.
    Projectile,
    /// Characters driven by behaviours.
    Character,
    /// Generic objects: props, decals, explosions.
    Object,
    /// Trigger volumes running scripts when crossed.
    Trigger,
}

impl Category {
    /// Categories in the order the world updates them.
    pub const UPDATE_ORDER: [Self; 4] = [
        Self::Projectile,
        Self::Character,
        Self::Object,
        Self::Trigger,
    ];
}

/// Position of an entity inside one of the world collections.
///
/// Slot references are only meaningful for the duration of one query: the
/// world compacts its collections when it culls dead entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    /// Collection holding the entity.
    pub category: Category,
    /// Position inside that collection.
    pub index: usize,
}

impl SlotRef {
    /// Builds a reference to `index` within `category`.
    #[must_use]
    pub const fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }
}

/// Team tag. Entities on the same team do not damage each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team(pub i32);

impl Team {
    /// Reserved tag meaning unset or neutral.
    pub const NEUTRAL: Self = Self(0);

    /// Whether this is the [`Team::NEUTRAL`] tag.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Team {
    fn from(tag: i32) -> Self {
        Self(tag)
    }
}
