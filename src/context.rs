//! Template rendering context.
//!
//! Configuration templates can reach beyond their per-call variables into
//! three externally supplied stores: an inventory/variable-store snapshot,
//! gathered device facts, and engine settings. The stores are opaque JSON
//! maps passed through verbatim; the core never interprets their contents.
//!
//! The context is injected explicitly when the session is constructed,
//! never read from ambient globals, so two sessions against different
//! devices can carry entirely different snapshots.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved template variable name for the inventory snapshot.
pub const INVENTORY_KEY: &str = "inventory";
/// Reserved template variable name for gathered device facts.
pub const FACTS_KEY: &str = "facts";
/// Reserved template variable name for engine settings.
pub const SETTINGS_KEY: &str = "settings";

/// External variable stores made available to every template rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateContext {
    /// Inventory/variable-store snapshot, exposed to templates as `inventory`.
    #[serde(default)]
    pub inventory: Map<String, Value>,
    /// Gathered device facts, exposed to templates as `facts`.
    #[serde(default)]
    pub facts: Map<String, Value>,
    /// Engine settings, exposed to templates as `settings`.
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl TemplateContext {
    /// An empty context; templates see empty maps under the reserved keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inventory snapshot.
    #[must_use]
    pub fn with_inventory(mut self, inventory: Map<String, Value>) -> Self {
        self.inventory = inventory;
        self
    }

    /// Set the gathered device facts.
    #[must_use]
    pub fn with_facts(mut self, facts: Map<String, Value>) -> Self {
        self.facts = facts;
        self
    }

    /// Set the engine settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Map<String, Value>) -> Self {
        self.settings = settings;
        self
    }

    /// Merge the context into a set of per-call template variables.
    ///
    /// The reserved keys always reflect the injected stores; a caller
    /// variable that collides with a reserved name is overwritten.
    pub fn inject_into(&self, vars: &mut Map<String, Value>) {
        vars.insert(INVENTORY_KEY.to_string(), Value::Object(self.inventory.clone()));
        vars.insert(FACTS_KEY.to_string(), Value::Object(self.facts.clone()));
        vars.insert(SETTINGS_KEY.to_string(), Value::Object(self.settings.clone()));
    }
}
