//! Shared fixtures for integration tests
#![allow(dead_code)]

use product_lens::{
    config::LlmConfig, pipeline::ProductAnalyzer, providers::completion::CompletionClient,
};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::{matchers::{method, path}, Mock, MockServer, ResponseTemplate};

/// First bytes of a JFIF file; enough for the model to be handed a "JPEG"
pub const JPEG_HEADER: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub fn llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        model: "claude-4-sonnet".to_string(),
        timeout_seconds: 5,
    }
}

pub fn analyzer_for(server: &MockServer) -> ProductAnalyzer {
    let client = Arc::new(CompletionClient::new(&llm_config(&server.uri())));
    ProductAnalyzer::new(client, "claude-4-sonnet")
}

/// A completion envelope whose first choice carries `content`
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "claude-4-sonnet",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 1200, "completion_tokens": 80, "total_tokens": 1280}
    })
}

/// Mount a 200 reply carrying `content`
pub async fn mock_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(server)
        .await;
}
