use serde::{Deserialize, Serialize};

/// A generated hackathon idea.
/// Ideas come out of a language model, so every field falls back to its
/// default when the server leaves it out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Idea {
    /// Short `snake_case` identifier.
    pub name: String,
    pub title: String,
    pub problem: String,
    pub solution: String,
    pub tech_stack: Vec<String>,
    pub unique_angle: String,
    pub demo_potential: String,
    pub feasibility_score: f64,
    pub innovation_score: f64,
    pub impact_score: f64,
    /// URLs the idea was inspired by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

/// The six criteria a critique scores an idea on, each from 1 to 10.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct EvaluationScores {
    pub innovation: f64,
    pub feasibility: f64,
    pub impact: f64,
    pub demo_potential: f64,
    pub technical_depth: f64,
    pub market_fit: f64,
}

/// Outcome of an evaluation relative to the configured threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    #[default]
    Fail,
}

/// A critique of one idea.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Evaluation {
    pub scores: EvaluationScores,
    /// Weighted average of `scores`.
    pub overall_score: f64,
    pub verdict: Verdict,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    /// One suggestion that would turn the idea into a winner.
    pub killer_feature_idea: String,
    pub reasoning: String,
}

/// The phase a depth run is in when it emits an update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ForgeStage {
    /// The researcher is generating a new idea.
    Researching,
    /// An idea was generated and is being critiqued.
    Evaluating,
    /// An idea passed the threshold. Carries the final idea and evaluation.
    Complete,
    /// An idea failed the threshold; the next iteration follows.
    Rejected,
    /// The run was stopped on request.
    Interrupted,
    /// No idea passed; carries the best-scoring idea and its evaluation.
    MaxIterations,
}

/// One discrete event of a depth run, as read off the update stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ForgeUpdate {
    #[serde(default)]
    pub iteration: u32,
    /// Absent only on error records, which the server emits as
    /// `{"error": "..."}` when the run fails internally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<ForgeStage>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea: Option<Idea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /api/independent`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct IndependentRequest {
    /// Hackathon track or domain.
    pub track: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

/// Body of `POST /api/depth`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct DepthRequest {
    /// Hackathon track or domain.
    pub track: String,
    pub problem_statement: String,
    /// Minimum overall score (1-9) an idea needs to pass.
    pub threshold: u32,
    /// Iterations (1-20) before the server settles for the best idea so far.
    pub max_iterations: u32,
}

/// Response of `POST /api/independent`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct IdeaResponse {
    pub success: bool,
    pub idea: Idea,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ForgeStatusKind {
    /// No run has happened since the server started.
    Idle,
    Running,
    /// The last run finished, failed or was interrupted.
    Stopped,
    NotInitialized,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ForgeMode {
    Independent,
    Depth,
}

/// Response of `GET /api/status`.
/// Everything but `status` is only reported once a run has started.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ForgeStatus {
    pub status: ForgeStatusKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ForgeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideas_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_idea: Option<Idea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_evaluation: Option<Evaluation>,
}
