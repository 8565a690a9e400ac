use crate::{
    client_utils, forge_api::ForgeApi, update_stream::ForgeUpdateStream, DepthRequest,
    ForgeError, ForgeResult, ForgeStatus, IdeaResponse, IndependentRequest,
};
use reqwest::Client;
use std::env;
use tracing::{debug, info_span, warn};
use tracing_futures::Instrument;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Environment variable that overrides the server address.
pub const BASE_URL_ENV: &str = "FORGE_API_URL";

const PROVIDER: &str = "idea-forge";

#[derive(Debug, Clone, Default)]
pub struct ForgeClientOptions {
    /// Server address without the `/api` suffix. Defaults to
    /// `http://localhost:8000`.
    pub base_url: Option<String>,
}

/// HTTP client for an Idea Forge server.
/// It keeps no state between calls; callers that must not run two depth
/// runs at once are responsible for serializing them.
#[derive(Debug, Clone)]
pub struct ForgeClient {
    base_url: String,
    client: Client,
}

impl ForgeClient {
    #[must_use]
    pub fn new(options: ForgeClientOptions) -> Self {
        let base_url = options
            .base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Build a client from `FORGE_API_URL`, falling back to the local
    /// development server when it is unset or blank.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ForgeClientOptions {
            base_url: env::var(BASE_URL_ENV).ok(),
        })
    }

    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn request_independent(&self, request: &IndependentRequest) -> ForgeResult<IdeaResponse> {
        debug!("requesting independent idea");
        let response: IdeaResponse =
            client_utils::send_json(&self.client, &self.url("/api/independent"), request).await?;

        if !response.success {
            return Err(ForgeError::Invariant(
                PROVIDER,
                format!("independent run reported failure (mode {})", response.mode),
            ));
        }

        Ok(response)
    }

    async fn request_depth(&self, request: &DepthRequest) -> ForgeResult<ForgeUpdateStream> {
        debug!("starting depth run");
        client_utils::send_update_stream(&self.client, &self.url("/api/depth"), request).await
    }
}

#[async_trait::async_trait]
impl ForgeApi for ForgeClient {
    async fn run_independent(&self, request: IndependentRequest) -> ForgeResult<IdeaResponse> {
        request.validate()?;
        let span = info_span!("idea_forge.independent", track = %request.track);

        self.request_independent(&request).instrument(span).await
    }

    async fn run_depth(&self, request: DepthRequest) -> ForgeResult<ForgeUpdateStream> {
        request.validate()?;
        let span = info_span!(
            "idea_forge.depth",
            track = %request.track,
            threshold = request.threshold,
            max_iterations = request.max_iterations,
        );

        let updates = self
            .request_depth(&request)
            .instrument(span.clone())
            .await?;

        Ok(ForgeUpdateStream::from_stream(updates.instrument(span)))
    }

    async fn stop_depth(&self) {
        let result = self.client.post(self.url("/api/depth/stop")).send().await;
        match result {
            Ok(response) if response.status().is_success() => {
                debug!("stop request delivered");
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!(
                    %status,
                    detail = %client_utils::error_detail(&body),
                    "server refused stop request"
                );
            }
            Err(error) => {
                warn!(%error, "failed to send stop request");
            }
        }
    }

    async fn status(&self) -> ForgeResult<ForgeStatus> {
        client_utils::get_json(&self.client, &self.url("/api/status")).await
    }
}
