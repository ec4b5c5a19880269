use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use strum::{EnumMessage, IntoEnumIterator};

/// Contract for an adjacently tagged (`type` / `params`) choice enum that the
/// wizard can offer as a menu and fill in field by field.
pub trait UIChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    /// JSON Schema for the whole tagged enum.
    fn schema() -> Schema;

    fn prompt_label() -> &'static str {
        "Choose an action:"
    }

    fn prompt_help() -> Option<&'static str> {
        Some("↑/↓ to navigate, ↵ to select")
    }

    /// Pre-filled `params` for a kind.
    fn default_params(kind: Self::Kind) -> Value;

    /// Extra params that cannot be described by flat schema fields.
    fn subprompts<D: PromptDriver>(
        _driver: &D,
        _kind: Self::Kind,
    ) -> Result<Option<Map<String, Value>>> {
        Ok(None)
    }

    /// Builds the typed enum from a kind and the answered params. Fields the
    /// user was not asked about keep their [`default_params`] value.
    ///
    /// [`default_params`]: UIChoice::default_params
    fn from_parts(kind: Self::Kind, answers: Map<String, Value>) -> Result<Self> {
        let mut params = match Self::default_params(kind) {
            Value::Object(m) => m,
            _ => Map::new(),
        };
        params.extend(answers);
        let key: &'static str = kind.into();
        let v = json!({ "type": key, "params": params });
        Ok(serde_json::from_value(v)?)
    }
}
