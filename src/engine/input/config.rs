// Input configuration and remapping

use super::action::{default_bindings, global_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys) to game actions.
///
/// Global bindings are kept apart so remapping gameplay keys can never
/// shadow the menu key.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<InputSource>>,

    global: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Empty configuration, nothing bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Default gameplay bindings plus global bindings
    pub fn with_defaults() -> Self {
        let mut config = Self::from_bindings(default_bindings());
        config.global = global_bindings().into_iter().collect();
        config
    }

    /// Create a configuration from a list of gameplay bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind an input source to an action, replacing its previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind_source(source);
        self.bindings.insert(source, action);
        self.action_to_sources.entry(action).or_default().push(source);
    }

    pub fn unbind_source(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.remove(&source) {
            if let Some(sources) = self.action_to_sources.get_mut(&action) {
                sources.retain(|s| *s != source);
                if sources.is_empty() {
                    self.action_to_sources.remove(&action);
                }
            }
        }
    }

    /// Unbind all sources for an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(sources) = self.action_to_sources.remove(&action) {
            for source in sources {
                self.bindings.remove(&source);
            }
        }
    }

    /// Action for a source. Gameplay bindings win over global ones.
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings
            .get(&source)
            .or_else(|| self.global.get(&source))
            .copied()
    }

    /// Get all gameplay sources bound to an action
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.action_to_sources
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }

    /// Clear gameplay bindings; global bindings stay
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.action_to_sources.clear();
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::with_defaults();
    }
}
