//! Buffered world mutations raised by entities and scripts mid-tick.
//!
//! Entities never hold a reference to the world. Whatever they need the world
//! to do (register a decal, toggle a wall, finish the level) goes through a
//! [`WorldCommands`] queue that the world drains at step boundaries.

use crate::category::Category;
use crate::entity::Entity;
use crate::time::FrameTime;

/// A deferred world mutation.
pub enum WorldCommand {
    /// Register an entity into a collection.
    Spawn {
        /// Target collection.
        category: Category,
        /// The entity to register.
        entity: Box<dyn Entity>,
    },
    /// Re-activate a known collision node.
    EnableScenery(String),
    /// Withdraw a collision node from queries.
    DisableScenery(String),
    /// Mark the level finished.
    Finish,
}

/// Ordered queue of pending [`WorldCommand`]s.
#[derive(Default)]
pub struct WorldCommands {
    queue: Vec<WorldCommand>,
}

impl WorldCommands {
    /// Queues `command` after everything already pending.
    pub fn push(&mut self, command: WorldCommand) {
        self.queue.push(command);
    }

    /// Queues registration of `entity` into `category`.
    pub fn spawn(&mut self, category: Category, entity: Box<dyn Entity>) {
        self.push(WorldCommand::Spawn { category, entity });
    }

    /// Queues re-activation of the collision node `name`.
    pub fn enable_scenery(&mut self, name: impl Into<String>) {
        self.push(WorldCommand::EnableScenery(name.into()));
    }

    /// Queues withdrawal of the collision node `name`.
    pub fn disable_scenery(&mut self, name: impl Into<String>) {
        self.push(WorldCommand::DisableScenery(name.into()));
    }

    /// Queues the end of the level.
    pub fn finish(&mut self) {
        self.push(WorldCommand::Finish);
    }

    /// Removes and yields the pending commands in queue order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, WorldCommand> {
        self.queue.drain(..)
    }

    /// Number of pending commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no commands are pending.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Tick context handed to entities: the frame's timing and the command queue.
#[derive(Default)]
pub struct Frame {
    /// Timing of the current tick.
    pub time: FrameTime,
    /// Mutations raised during the tick.
    pub commands: WorldCommands,
}

impl Frame {
    /// Starts a tick with an empty command queue.
    #[must_use]
    pub fn new(time: FrameTime) -> Self {
        Self {
            time,
            commands: WorldCommands::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn commands_drain_in_order() {
        let mut commands = WorldCommands::default();
        assert!(commands.is_empty());
        commands.disable_scenery("gate");
        commands.finish();
        assert_eq!(commands.len(), 2);
        let drained: Vec<_> = commands.drain().collect();
        assert!(matches!(
            drained.as_slice(),
            [WorldCommand::DisableScenery(name), WorldCommand::Finish] if name == "gate"
        ));
        assert!(commands.is_empty());
    }
}
