//! Declarative level scripts.

use serde::{Deserialize, Serialize};

use super::ScriptTrigger;
use crate::commands::WorldCommands;

/// A single level-script action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "node", rename_all = "snake_case")]
pub enum Script {
    /// Re-activates the named collision node.
    EnableScenery(String),
    /// Withdraws the named collision node from queries.
    DisableScenery(String),
    /// Ends the level.
    Finish,
}

/// An ordered list of scripts fired together.
///
/// A one-shot list fires once until reset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScriptList {
    scripts: Vec<Script>,
    #[serde(default)]
    once: bool,
    #[serde(skip)]
    fired: bool,
}

impl ScriptList {
    /// A list that fires on every execution.
    #[must_use]
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts,
            once: false,
            fired: false,
        }
    }

    /// Fires only until the next reset.
    #[must_use]
    pub const fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Whether the list has executed since its last reset.
    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.fired
    }
}

impl ScriptTrigger for ScriptList {
    fn execute_scripts(&mut self, commands: &mut WorldCommands) {
        if self.once && self.fired {
            return;
        }
        self.fired = true;
        for script in &self.scripts {
            match script {
                Script::EnableScenery(name) => commands.enable_scenery(name.clone()),
                Script::DisableScenery(name) => commands.disable_scenery(name.clone()),
                Script::Finish => commands.finish(),
            }
        }
    }

    fn reset(&mut self) {
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn one_shot_list_fires_once_until_reset() {
        let mut list = ScriptList::new(vec![Script::DisableScenery("gate".into())]).once();
        let mut commands = WorldCommands::default();
        list.execute_scripts(&mut commands);
        list.execute_scripts(&mut commands);
        assert_eq!(commands.len(), 1);
        list.reset();
        list.execute_scripts(&mut commands);
        assert_eq!(commands.len(), 2);
    }

    #[rstest]
    fn scripts_parse_from_json() {
        let json = r#"{"scripts":[{"action":"disable_scenery","node":"gate"},{"action":"finish"}],"once":true}"#;
        let list: ScriptList = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(
            list,
            ScriptList::new(vec![Script::DisableScenery("gate".into()), Script::Finish]).once()
        );
    }
}
