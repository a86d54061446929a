//! Argument decoding shared by the tool handlers.

use crate::error::{ToolError, ToolResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

/// One id (JSON string) or a list of ids (JSON array).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdArg {
    One(String),
    Many(Vec<String>),
}

impl IdArg {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            IdArg::One(id) => vec![id],
            IdArg::Many(ids) => ids,
        }
    }
}

pub fn parse<T: DeserializeOwned>(args: JsonValue) -> ToolResult<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Read a required `IdArg` field by name.
pub fn id_arg(args: &JsonValue, field: &str) -> ToolResult<IdArg> {
    let value = args
        .get(field)
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing field `{field}`")))?;
    serde_json::from_value(value.clone()).map_err(|_| {
        ToolError::InvalidArguments(format!("`{field}` must be a string or an array of strings"))
    })
}

/// JSON schema fragment for the optional scope arguments
pub fn scope_properties() -> serde_json::Map<String, JsonValue> {
    let mut props = serde_json::Map::new();
    props.insert(
        "spaceId".into(),
        json!({"type": "string", "description": "Space id; defaults to the configured space"}),
    );
    props.insert(
        "environmentId".into(),
        json!({"type": "string", "description": "Environment id; defaults to the configured environment"}),
    );
    props
}

/// Object schema with the scope arguments merged into `properties`
pub fn object_schema(properties: JsonValue, required: &[&str]) -> JsonValue {
    let mut props = scope_properties();
    if let JsonValue::Object(extra) = properties {
        props.extend(extra);
    }
    json!({
        "type": "object",
        "properties": props,
        "required": required,
    })
}
