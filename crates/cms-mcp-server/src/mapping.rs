//! Conversions between tool registry types and rmcp model types.

use cms_mcp_tools::{ToolResponse, ToolSpec};
use rmcp::model as m;
use serde_json::{Map, Value as JsonValue};
use std::borrow::Cow;
use std::sync::Arc;

fn input_schema_object(schema: &JsonValue) -> Map<String, JsonValue> {
    let mut obj = Map::new();
    obj.insert("type".into(), JsonValue::String("object".into()));
    match schema {
        JsonValue::Object(map) => {
            for (k, v) in map {
                obj.insert(k.clone(), v.clone());
            }
        }
        other => {
            obj.insert("properties".into(), other.clone());
        }
    }
    obj
}

pub fn to_mcp_tool(spec: &ToolSpec) -> m::Tool {
    m::Tool {
        name: Cow::Owned(spec.name.clone()),
        title: spec.title.clone(),
        description: spec.description.as_ref().map(|s| Cow::Owned(s.clone())),
        input_schema: Arc::new(input_schema_object(&spec.input_schema)),
        output_schema: None,
        annotations: spec
            .annotations
            .as_ref()
            .and_then(|v| serde_json::from_value::<m::ToolAnnotations>(v.clone()).ok()),
        icons: None,
    }
}

pub fn to_mcp_call_result(response: ToolResponse) -> m::CallToolResult {
    let is_error = response.is_error();
    let content = response.content.into_iter().map(|c| m::Content::text(c.text)).collect();
    if is_error {
        m::CallToolResult::error(content)
    } else {
        m::CallToolResult::success(content)
    }
}

/// Missing arguments are treated as an empty object
pub fn arguments_value(arguments: Option<Map<String, JsonValue>>) -> JsonValue {
    JsonValue::Object(arguments.unwrap_or_default())
}
