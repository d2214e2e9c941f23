//! The collision-query contract between movers and the world.

use crate::category::{Category, SlotRef, Team};
use crate::trace::Trace;

/// Identity of the entity issuing a trace.
///
/// The world needs it to exclude the querying entity from its own trace, to
/// apply friendly-fire rules, and to hand the attacker's damage to the
/// resolved target. It is passed explicitly into every query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Querier {
    /// Collection the querying entity belongs to.
    pub category: Category,
    /// Team of the querying entity.
    pub team: Team,
    /// Time-weighted damage the querying entity inflicts on contact.
    pub damage: f32,
    /// Whether the querying entity is active.
    pub active: bool,
    /// Whether the querying entity is collidable.
    pub collidable: bool,
    /// Slot of the querying entity, skipped during the dynamic pass.
    pub origin: Option<SlotRef>,
}

impl Querier {
    /// An active, collidable querier with no slot in the world, as used for
    /// weapon ray casts and line-of-fire checks.
    #[must_use]
    pub const fn new(category: Category, team: Team, damage: f32) -> Self {
        Self {
            category,
            team,
            damage,
            active: true,
            collidable: true,
            origin: None,
        }
    }

    /// Tags the querier with its own slot so the world skips it.
    #[must_use]
    pub const fn with_origin(mut self, origin: SlotRef) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Whether the query degenerates to "no impact".
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        !self.collidable && !self.active
    }

    /// Whether `slot` is the querier's own slot.
    #[must_use]
    pub fn is_origin(&self, slot: SlotRef) -> bool {
        self.origin == Some(slot)
    }
}

/// Anything able to resolve a trace against the world.
pub trait Tracer {
    /// Resolves `trace` for `querier`; returns whether any impact occurred.
    fn trace(&mut self, querier: &Querier, trace: &mut Trace) -> bool;
}
