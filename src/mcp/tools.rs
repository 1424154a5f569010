// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! MCP Tools - Expose media resolution as MCP tools

use serde_json::{json, Value};
use std::collections::HashMap;

use super::types::*;
use crate::media::{data_url, MediaGateway, ResolvedOutcome};
use crate::models::{MediaRecord, MediaType};

/// Get the list of available tools
pub fn list_tools() -> Vec<Tool> {
    let media_args = json!({
        "type": {
            "type": "string",
            "enum": ["image", "video", "file", "voice"],
            "description": "Media category"
        },
        "key": {
            "type": "string",
            "description": "Media key from a chat message; may list several candidates separated by commas"
        }
    });

    let mut url_args = media_args.clone();
    url_args["base_url"] = json!({
        "type": "string",
        "description": "Base URL of this server (e.g. http://127.0.0.1:5030)"
    });

    vec![
        Tool {
            name: "chatlog_media_info".to_string(),
            description: Some(
                "Look up metadata for an image, video, file or voice message by its media key"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": media_args,
                "required": ["type", "key"]
            }),
        },
        Tool {
            name: "chatlog_media_url".to_string(),
            description: Some(
                "Get the URL that serves a media item, with images decoded and voice converted to MP3"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": url_args,
                "required": ["type", "key"]
            }),
        },
    ]
}

/// Execute a tool
pub fn call_tool(
    gateway: &MediaGateway,
    name: &str,
    arguments: &HashMap<String, Value>,
) -> CallToolResult {
    let str_arg = |field: &str| arguments.get(field).and_then(|v| v.as_str());

    let category = match str_arg("type").map(str::parse::<MediaType>) {
        Some(Ok(category)) => category,
        Some(Err(e)) => return CallToolResult::error(e.to_string()),
        None => return CallToolResult::error("Missing argument: type".to_string()),
    };
    let key = str_arg("key").unwrap_or("");

    match name {
        "chatlog_media_info" => execute_media_info(gateway, category, key),
        "chatlog_media_url" => {
            let base_url = str_arg("base_url").unwrap_or("");
            execute_media_url(gateway, category, key, base_url)
        }
        _ => CallToolResult::error(format!("Unknown tool: {}", name)),
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

fn execute_media_info(gateway: &MediaGateway, category: MediaType, key: &str) -> CallToolResult {
    let body = match gateway.resolve(category, key, true) {
        Ok(ResolvedOutcome::Metadata(record)) => serde_json::to_value(&record),
        Ok(ResolvedOutcome::Redirect(path)) => Ok(json!({
            "type": category,
            "path": path,
            "url": data_url(&path),
        })),
        Ok(ResolvedOutcome::NotFound) => {
            return CallToolResult::error(format!("No {} found for key {}", category, key))
        }
        Ok(other) => Ok(describe(&other)),
        Err(e) => return CallToolResult::error(format!("Error resolving {}: {}", category, e)),
    };

    match body.and_then(|v| serde_json::to_string_pretty(&v)) {
        Ok(text) => CallToolResult::text(text),
        Err(e) => CallToolResult::error(format!("Error encoding result: {}", e)),
    }
}

fn execute_media_url(
    gateway: &MediaGateway,
    category: MediaType,
    key: &str,
    base_url: &str,
) -> CallToolResult {
    let base = base_url.trim_end_matches('/');
    let path = match gateway.resolve(category, key, true) {
        Ok(ResolvedOutcome::Metadata(record)) => record_url(&record),
        Ok(ResolvedOutcome::Redirect(path)) => data_url(&path),
        Ok(ResolvedOutcome::NotFound) => {
            return CallToolResult::error(format!("No {} found for key {}", category, key))
        }
        Ok(other) => return CallToolResult::error(format!("Unexpected outcome: {}", describe(&other))),
        Err(e) => return CallToolResult::error(format!("Error resolving {}: {}", category, e)),
    };

    CallToolResult::text(format!("{}{}", base, path))
}

/// Voice is converted on the fly, so it is fetched by key; everything else by path
fn record_url(record: &MediaRecord) -> String {
    match record.media_type {
        MediaType::Voice => format!("/voice/{}", urlencoding::encode(&record.key)),
        _ => data_url(&crate::media::normalize_relative(&record.path)),
    }
}

fn describe(outcome: &ResolvedOutcome) -> Value {
    match outcome {
        ResolvedOutcome::InlineBytes {
            content_type,
            bytes,
        } => json!({ "content_type": content_type, "size": bytes.len() }),
        ResolvedOutcome::File(path) => json!({ "file": path.display().to_string() }),
        ResolvedOutcome::Metadata(record) => json!({ "key": record.key }),
        ResolvedOutcome::Redirect(path) => json!({ "path": path }),
        ResolvedOutcome::NotFound => json!(null),
    }
}
