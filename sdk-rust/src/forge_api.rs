use crate::{
    update_stream::ForgeUpdateStream, DepthRequest, ForgeResult, ForgeStatus, IdeaResponse,
    IndependentRequest,
};

/// Operations offered by an Idea Forge server.
#[async_trait::async_trait]
pub trait ForgeApi: Send + Sync {
    /// Generate a single idea. One attempt, no retries.
    async fn run_independent(&self, request: IndependentRequest) -> ForgeResult<IdeaResponse>;

    /// Start an iterative run and return its updates as they arrive.
    /// Fails before any update is produced if the server rejects the run.
    async fn run_depth(&self, request: DepthRequest) -> ForgeResult<ForgeUpdateStream>;

    /// Ask the server to stop the running depth loop. The server then closes
    /// the update stream. Delivery failures are logged, never returned.
    async fn stop_depth(&self);

    async fn status(&self) -> ForgeResult<ForgeStatus>;
}
