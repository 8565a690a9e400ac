use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    /// The request was rejected locally before anything was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request never completed, or the connection failed while the
    /// response body was being read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-success status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response body is not the JSON the endpoint promises.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// The server answered with a well-formed but unexpected payload
    /// (e.g. `success: false` on an independent run).
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type ForgeResult<T> = Result<T, ForgeError>;
