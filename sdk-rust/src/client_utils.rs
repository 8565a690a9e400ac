use crate::{
    update_stream::{decode_update_stream, ForgeUpdateStream},
    ForgeError, ForgeResult,
};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON request, parse the response.
/// Throws error on non-success status code.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
) -> ForgeResult<R> {
    let response = client.post(url).json(data).send().await?;
    read_json(response).await
}

/// Issue a GET request, parse the response.
/// Throws error on non-success status code.
pub async fn get_json<R: DeserializeOwned>(client: &Client, url: &str) -> ForgeResult<R> {
    let response = client.get(url).send().await?;
    read_json(response).await
}

/// Create a JSON request whose response body is a stream of `data: ` lines.
/// Throws error on non-success status code, before any line is read.
pub async fn send_update_stream<T: Serialize>(
    client: &Client,
    url: &str,
    data: &T,
) -> ForgeResult<ForgeUpdateStream> {
    let response = client.post(url).json(data).send().await?;
    let response = ensure_success(response).await?;
    Ok(decode_update_stream(response.bytes_stream()))
}

async fn read_json<R: DeserializeOwned>(response: Response) -> ForgeResult<R> {
    let response = ensure_success(response).await?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

pub async fn ensure_success(response: Response) -> ForgeResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ForgeError::StatusCode(status, error_detail(&body)))
}

/// The server reports failures as `{"detail": ...}`, where `detail` is a
/// message or, for rejected request bodies, a list of validation errors.
/// Anything else is passed through as text.
pub fn error_detail(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|mut value| value.get_mut("detail").map(serde_json::Value::take));

    match detail {
        Some(serde_json::Value::String(message)) => message,
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}
