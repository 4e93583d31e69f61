//! Markup contract and endpoint settings.
//!
//! Every field has a default matching the stock todo templates, so an empty
//! JSON object (or no config at all) is a valid configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edit::EditPolicy;

pub const DEFAULT_HIGHLIGHT_MS: u32 = 2_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// `id` of the list container element.
    pub container_id: String,
    pub item_selector: String,
    /// Attribute holding the item's opaque identifier.
    pub id_attribute: String,
    /// Read-only sub-view.
    pub view_selector: String,
    /// Edit sub-view, contains the edit form.
    pub edit_selector: String,
    pub actions_selector: String,
    pub text_input_selector: String,
    pub edit_trigger_selector: String,
    pub cancel_selector: String,
    /// Hidden per-item input synced to the item's id on drop.
    pub order_field_selector: String,
    pub dragging_class: String,
    pub highlight_class: String,
    /// Class used to hide a sub-view.
    pub hidden_class: String,
    pub reorder_endpoint: String,
    pub reorder_field: String,
    pub highlight_ms: u32,
    /// Fired by the fragment-swapping library after a swap.
    pub swap_event: String,
    pub scroll_event: String,
    pub edit_policy: EditPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            container_id: "todo-list".to_owned(),
            item_selector: ".todo-item".to_owned(),
            id_attribute: "data-todo-id".to_owned(),
            view_selector: ".todo-view".to_owned(),
            edit_selector: ".todo-edit".to_owned(),
            actions_selector: ".todo-actions".to_owned(),
            text_input_selector: r#"input[name="text"]"#.to_owned(),
            edit_trigger_selector: ".todo-text, .edit-btn".to_owned(),
            cancel_selector: ".cancel-btn".to_owned(),
            order_field_selector: r#"input[name="todo-order"]"#.to_owned(),
            dragging_class: "dragging".to_owned(),
            highlight_class: "highlight".to_owned(),
            hidden_class: "hidden".to_owned(),
            reorder_endpoint: "/todos/reorder".to_owned(),
            reorder_field: "todo-ids".to_owned(),
            highlight_ms: DEFAULT_HIGHLIGHT_MS,
            swap_event: "htmx:afterSwap".to_owned(),
            scroll_event: "scroll-to-last".to_owned(),
            edit_policy: EditPolicy::Independent,
        }
    }
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|error| ConfigError::Json(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("container_id", &self.container_id),
            ("item_selector", &self.item_selector),
            ("id_attribute", &self.id_attribute),
            ("view_selector", &self.view_selector),
            ("edit_selector", &self.edit_selector),
            ("text_input_selector", &self.text_input_selector),
            ("dragging_class", &self.dragging_class),
            ("highlight_class", &self.highlight_class),
            ("hidden_class", &self.hidden_class),
            ("reorder_endpoint", &self.reorder_endpoint),
            ("reorder_field", &self.reorder_field),
            ("swap_event", &self.swap_event),
            ("scroll_event", &self.scroll_event),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Empty(*field));
        }
        let classes = [&self.dragging_class, &self.highlight_class, &self.hidden_class];
        if let Some(class) = classes.iter().find(|class| class.contains(char::is_whitespace)) {
            return Err(ConfigError::InvalidClass(class.to_string()));
        }
        if self.highlight_ms == 0 {
            return Err(ConfigError::ZeroHighlightDelay);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Json(String),
    /// A required setting is empty.
    Empty(&'static str),
    /// Class names are passed to `classList`, which rejects whitespace.
    InvalidClass(String),
    ZeroHighlightDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(error) => write!(f, "invalid controller config: {error}"),
            ConfigError::Empty(field) => write!(f, "controller config field '{field}' must not be empty"),
            ConfigError::InvalidClass(class) => write!(f, "class name '{class}' must not contain whitespace"),
            ConfigError::ZeroHighlightDelay => write!(f, "highlight_ms must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
