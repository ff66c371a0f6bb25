// Input configuration and remapping system

use super::action::{
    default_action_bindings, default_axis_bindings, Action, Axis, AxisBinding, InputSource,
};
use std::collections::HashMap;

/// Maps input sources to actions and axes
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<InputSource>>,

    /// Axis mappings; a source may feed several axes
    axis_bindings: Vec<AxisBinding>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            action_to_sources: HashMap::new(),
            axis_bindings: Vec::new(),
        }
    }

    /// Create a configuration from lists of bindings
    pub fn from_bindings(actions: Vec<(InputSource, Action)>, axes: Vec<AxisBinding>) -> Self {
        let mut config = Self::new();
        for (source, action) in actions {
            config.bind(source, action);
        }
        for binding in axes {
            config.bind_axis(binding);
        }
        config
    }

    /// Bind an input source to an action. Mouse motion only feeds axes and
    /// is ignored here.
    pub fn bind(&mut self, source: InputSource, action: Action) {
        if source.is_motion() {
            log::warn!("Cannot bind {:?} to action {:?}", source, action);
            return;
        }
        self.remove_action_binding(source);

        self.bindings.insert(source, action);
        self.action_to_sources
            .entry(action)
            .or_default()
            .push(source);
    }

    /// Add an axis mapping, replacing an existing mapping of the same
    /// source onto the same axis
    pub fn bind_axis(&mut self, binding: AxisBinding) {
        self.axis_bindings
            .retain(|b| !(b.source == binding.source && b.axis == binding.axis));
        self.axis_bindings.push(binding);
    }

    /// Unbind an input source from its action and every axis
    pub fn unbind_source(&mut self, source: InputSource) {
        self.remove_action_binding(source);
        self.axis_bindings.retain(|b| b.source != source);
    }

    fn remove_action_binding(&mut self, source: InputSource) {
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

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Get all input sources bound to an action
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.action_to_sources
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }

    /// Axis mappings feeding `axis`
    pub fn axis_bindings(&self, axis: Axis) -> impl Iterator<Item = &AxisBinding> {
        self.axis_bindings.iter().filter(move |b| b.axis == axis)
    }

    /// Check if an input source is bound to any action or axis
    pub fn is_bound(&self, source: InputSource) -> bool {
        self.bindings.contains_key(&source)
            || self.axis_bindings.iter().any(|b| b.source == source)
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.action_to_sources.clear();
        self.axis_bindings.clear();
    }

    /// Reset to the default bindings
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        for (source, action) in default_action_bindings() {
            self.bind(source, action);
        }
        for binding in default_axis_bindings() {
            self.bind_axis(binding);
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        let mut config = Self::new();
        config.reset_to_defaults();
        config
    }
}
