//! IPC message protocol for the mission planner
//!
//! Defines all message types exchanged between the UI layer and the
//! annotation engine, plus JSON helpers for single messages and whole
//! command scripts.

pub mod commands;
pub mod error;
pub mod input;
pub mod messages;
pub mod types;

pub use commands::*;
pub use error::*;
pub use input::*;
pub use messages::*;
pub use types::*;

use serde::{Deserialize, Serialize};

/// A recorded sequence of UI commands, replayed in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandScript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub commands: Vec<UiToEngine>,
}

/// Encode a UI message as JSON.
pub fn encode_ui_message(msg: &UiToEngine) -> Result<String, IpcError> {
    Ok(serde_json::to_string(msg)?)
}

/// Decode a UI message from JSON.
pub fn decode_ui_message(json: &str) -> Result<UiToEngine, IpcError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode an engine message as JSON.
pub fn encode_engine_message(msg: &EngineToUi) -> Result<String, IpcError> {
    Ok(serde_json::to_string(msg)?)
}

/// Decode an engine message from JSON.
pub fn decode_engine_message(json: &str) -> Result<EngineToUi, IpcError> {
    Ok(serde_json::from_str(json)?)
}

impl CommandScript {
    /// Parse a script from JSON.
    ///
    /// Accepts either `{"commands": [...]}` or a bare array of commands.
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        match value {
            serde_json::Value::Array(_) => Ok(Self {
                description: None,
                commands: serde_json::from_value(value)?,
            }),
            serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(IpcError::InvalidFormat(format!(
                "expected a command array or object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Serialize the script as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
