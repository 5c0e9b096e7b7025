//! Static hello-world handlers.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub response: String,
    pub status: u16,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    pub body: Option<String>,
    pub status: u16,
}

#[derive(Debug, Deserialize)]
pub struct RepeatParams {
    pub input: Option<String>,
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        response: "Hello, World!".to_string(),
        status: 200,
    })
}

/// Echo the `input` query parameter back.
pub async fn repeat(Query(params): Query<RepeatParams>) -> Json<EchoResponse> {
    Json(EchoResponse {
        body: params.input,
        status: 200,
    })
}

pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        response: "OKAY".to_string(),
        status: 200,
    })
}
