//! Input capability
//!
//! The simulation only ever asks "is this action held right now?". Raw key
//! events are folded into [`HeldKeys`] outside the simulation; tests and the
//! headless demo use [`ScriptedInput`].

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Per-tank controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Abstract action identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// A control of the tank in the given slot
    Pilot { slot: u8, control: Control },
    /// Full reset of the match
    Restart,
}

impl Action {
    pub fn pilot(slot: u8, control: Control) -> Self {
        Action::Pilot { slot, control }
    }
}

/// Queryable held-action state
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
}

/// Key code (DOM `KeyboardEvent.code` names) to action map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    pub keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            keys: BTreeMap::new(),
        };
        bindings.bind_slot(0, ["KeyW", "KeyS", "KeyA", "KeyD", "KeyC"]);
        bindings.bind_slot(1, ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "Slash"]);
        bindings.bind("NumpadDivide", Action::pilot(1, Control::Fire));
        bindings.bind_slot(2, ["KeyI", "KeyK", "KeyJ", "KeyL", "KeyB"]);
        bindings.bind("KeyR", Action::Restart);
        bindings
    }
}

impl KeyBindings {
    pub fn bind(&mut self, key: &str, action: Action) {
        self.keys.insert(key.to_string(), action);
    }

    /// Bind up, down, left, right, fire for a slot
    pub fn bind_slot(&mut self, slot: u8, keys: [&str; 5]) {
        let controls = [Control::Up, Control::Down, Control::Left, Control::Right, Control::Fire];
        for (key, control) in keys.into_iter().zip(controls) {
            self.bind(key, Action::pilot(slot, control));
        }
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(key).copied()
    }
}

/// Held-key set fed by key-down / key-up events
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    bindings: KeyBindings,
    held: HashSet<String>,
}

impl HeldKeys {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    /// Returns true if the key is bound (callers may suppress default handling)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.held.insert(code.to_string());
        self.bindings.action_for(code).is_some()
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Release everything (focus lost)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl InputSource for HeldKeys {
    fn is_held(&self, action: Action) -> bool {
        self.held
            .iter()
            .any(|key| self.bindings.action_for(key) == Some(action))
    }
}

/// Fixed set of held actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedInput {
    pub held: HashSet<Action>,
}

impl ScriptedInput {
    pub fn holding(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            held: actions.into_iter().collect(),
        }
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }
}

impl InputSource for ScriptedInput {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}
