//! Ordered entity collections with check-out slots.

use crate::category::Category;
use crate::entity::Entity;

/// An ordered list of entity slots.
///
/// While the world steps an entity it checks the box out of its slot and
/// leaves the slot empty, so the entity can query the rest of the world
/// without aliasing itself. Empty slots are skipped by every iterator.
#[derive(Default)]
pub struct Roster {
    slots: Vec<Option<Box<dyn Entity>>>,
}

impl Roster {
    /// Appends an entity.
    ///
    /// A pooled entity whose slot is already present replaces the present
    /// entity in place. Returns whether the entity was appended.
    pub fn insert(&mut self, entity: Box<dyn Entity>) -> bool {
        if let Some(pool_slot) = entity.pool_slot() {
            let occupied = self.slots.iter_mut().find(|slot| {
                slot.as_ref()
                    .is_some_and(|existing| existing.pool_slot() == Some(pool_slot))
            });
            if let Some(present) = occupied {
                *present = Some(entity);
                return false;
            }
        }
        self.slots.push(Some(entity));
        true
    }

    /// Number of slots, checked-out ones included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the roster has no slots.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entity in slot `index`, unless empty or checked out.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&dyn Entity> {
        self.slots.get(index)?.as_deref()
    }

    /// Mutable access to the entity in slot `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Entity + 'static)> {
        self.slots.get_mut(index)?.as_deref_mut()
    }

    /// Takes the entity out of its slot, leaving the slot empty.
    pub fn check_out(&mut self, index: usize) -> Option<Box<dyn Entity>> {
        self.slots.get_mut(index)?.take()
    }

    /// Puts a checked-out entity back into its slot.
    pub fn restore(&mut self, index: usize, entity: Box<dyn Entity>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(entity);
        }
    }

    /// Drops the slot, shifting later entities down by one.
    pub fn remove(&mut self, index: usize) {
        if index < self.slots.len() {
            self.slots.remove(index);
        }
    }

    /// Occupied slots with their indices, in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &dyn Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|entity| (index, entity)))
    }

    /// Drops every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

/// The four collections a world owns.
#[derive(Default)]
pub struct Rosters {
    projectiles: Roster,
    characters: Roster,
    objects: Roster,
    triggers: Roster,
}

impl Rosters {
    /// Collection for `category`.
    #[must_use]
    pub const fn get(&self, category: Category) -> &Roster {
        match category {
            Category::Projectile => &self.projectiles,
            Category::Character => &self.characters,
            Category::Object => &self.objects,
            Category::Trigger => &self.triggers,
        }
    }

    /// Mutable collection for `category`.
    pub const fn get_mut(&mut self, category: Category) -> &mut Roster {
        match category {
            Category::Projectile => &mut self.projectiles,
            Category::Character => &mut self.characters,
            Category::Object => &mut self.objects,
            Category::Trigger => &mut self.triggers,
        }
    }

    /// Empties all four collections.
    pub fn clear(&mut self) {
        for category in Category::UPDATE_ORDER {
            self.get_mut(category).clear();
        }
    }
}
