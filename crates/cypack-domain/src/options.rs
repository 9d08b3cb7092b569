use anyhow::Result;
use serde_json::{Map, Value};

/// Source of the serialized runner configuration written to `cypress.json`.
pub trait CypressConfig {
    /// Returns the text written verbatim to `cypress.json`.
    fn cypress_json(&self) -> Result<String>;
}

/// Runner configuration for a workspace.
///
/// The layout keys always point the runner at the generated entry points;
/// `overrides` are merged on top and win over every built-in key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeOptions {
    pub base_url: Option<String>,
    pub overrides: Map<String, Value>,
}

impl RuntimeOptions {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, value: Value) -> Self {
        self.overrides.insert(key.into(), value);
        self
    }

    /// Builds the effective configuration object.
    pub fn to_value(&self) -> Value {
        let mut config = Map::new();
        config.insert(
            "integrationFolder".to_string(),
            Value::String("integration".to_string()),
        );
        config.insert(
            "pluginsFile".to_string(),
            Value::String("plugins.js".to_string()),
        );
        config.insert(
            "supportFile".to_string(),
            Value::String("support.js".to_string()),
        );
        if let Some(base_url) = &self.base_url {
            config.insert("baseUrl".to_string(), Value::String(base_url.clone()));
        }
        for (key, value) in &self.overrides {
            config.insert(key.clone(), value.clone());
        }
        Value::Object(config)
    }
}

impl CypressConfig for RuntimeOptions {
    fn cypress_json(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&self.to_value())?;
        rendered.push('\n');
        Ok(rendered)
    }
}
