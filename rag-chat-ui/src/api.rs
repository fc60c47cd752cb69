//! HTTP client for the pipeline server.
//!
//! Every call decodes the body even on a non-2xx status: the server reports
//! failures as 400/500 with a JSON envelope whose `message` should reach the
//! user.

use gloo_net::http::{Request, Response};
use rag_types::wire::{decode_history, decode_reply, decode_status};
use rag_types::{
    Acknowledgement, ChatMessage, InitializeRequest, PipelineStatus, QueryAnswer, QueryRequest,
    Reply, WireError,
};
use thiserror::Error;

use crate::config::endpoint;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] gloo_net::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] WireError),
}

async fn body_text(response: Response) -> Result<String, ApiError> {
    if !response.ok() {
        dioxus_logger::tracing::warn!(
            "{} answered HTTP {}",
            response.url(),
            response.status()
        );
    }
    Ok(response.text().await?)
}

pub async fn submit_query(query: &str) -> Result<Reply<QueryAnswer>, ApiError> {
    let request = QueryRequest {
        query: query.to_string(),
    };

    let response = Request::post(&endpoint("/query"))
        .json(&request)?
        .send()
        .await?;

    Ok(decode_reply(&body_text(response).await?)?)
}

pub async fn clear_history() -> Result<Reply<Acknowledgement>, ApiError> {
    let response = Request::post(&endpoint("/clear")).send().await?;
    Ok(decode_reply(&body_text(response).await?)?)
}

pub async fn initialize_pipeline(urls: &[String]) -> Result<Reply<Acknowledgement>, ApiError> {
    let request = InitializeRequest {
        urls: urls.to_vec(),
    };

    let response = Request::post(&endpoint("/initialize"))
        .json(&request)?
        .send()
        .await?;

    Ok(decode_reply(&body_text(response).await?)?)
}

pub async fn fetch_history() -> Result<Vec<ChatMessage>, ApiError> {
    let response = Request::get(&endpoint("/history")).send().await?;
    Ok(decode_history(&body_text(response).await?)?)
}

pub async fn fetch_status() -> Result<PipelineStatus, ApiError> {
    let response = Request::get(&endpoint("/status")).send().await?;
    Ok(decode_status(&body_text(response).await?)?)
}
