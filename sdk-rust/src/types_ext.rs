use crate::{
    DepthRequest, Evaluation, EvaluationScores, ForgeError, ForgeResult, ForgeStage, ForgeUpdate,
    Idea, IndependentRequest, Verdict,
};
use std::{fmt, ops::RangeInclusive};

pub const DEFAULT_THRESHOLD: u32 = 7;
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;
pub const THRESHOLD_RANGE: RangeInclusive<u32> = 1..=9;
pub const MAX_ITERATIONS_RANGE: RangeInclusive<u32> = 1..=20;

impl ForgeStage {
    /// `complete` and `max_iterations` carry the final idea of a run.
    /// Whether `interrupted` ends a run for display purposes is up to the
    /// caller.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::MaxIterations)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Researching => "researching",
            Self::Evaluating => "evaluating",
            Self::Complete => "complete",
            Self::Rejected => "rejected",
            Self::Interrupted => "interrupted",
            Self::MaxIterations => "max_iterations",
        }
    }
}

impl fmt::Display for ForgeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("PASS"),
            Self::Fail => f.write_str("FAIL"),
        }
    }
}

impl ForgeUpdate {
    pub fn new(iteration: u32, stage: ForgeStage, message: impl Into<String>) -> Self {
        Self {
            iteration,
            stage: Some(stage),
            message: message.into(),
            idea: None,
            evaluation: None,
            error: None,
        }
    }

    /// An update that reports a failure of the run on the server side.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_idea(mut self, idea: Idea) -> Self {
        self.idea = Some(idea);
        self
    }

    #[must_use]
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = Some(evaluation);
        self
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.stage.is_some_and(ForgeStage::is_terminal)
    }
}

impl EvaluationScores {
    /// Scores paired with their wire names, in a fixed order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("innovation", self.innovation),
            ("feasibility", self.feasibility),
            ("impact", self.impact),
            ("demo_potential", self.demo_potential),
            ("technical_depth", self.technical_depth),
            ("market_fit", self.market_fit),
        ]
    }
}

impl Evaluation {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

impl IndependentRequest {
    pub fn new(track: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            requirements: None,
        }
    }

    /// Blank requirements are treated as none.
    #[must_use]
    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        let requirements = requirements.into();
        self.requirements = if requirements.trim().is_empty() {
            None
        } else {
            Some(requirements)
        };
        self
    }

    pub fn validate(&self) -> ForgeResult<()> {
        require_non_empty("track", &self.track)
    }
}

impl DepthRequest {
    pub fn new(track: impl Into<String>, problem_statement: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            problem_statement: problem_statement.into(),
            threshold: DEFAULT_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> ForgeResult<()> {
        require_non_empty("track", &self.track)?;
        require_non_empty("problem_statement", &self.problem_statement)?;
        require_in_range("threshold", self.threshold, &THRESHOLD_RANGE)?;
        require_in_range("max_iterations", self.max_iterations, &MAX_ITERATIONS_RANGE)
    }
}

fn require_non_empty(field: &str, value: &str) -> ForgeResult<()> {
    if value.trim().is_empty() {
        return Err(ForgeError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_in_range(field: &str, value: u32, range: &RangeInclusive<u32>) -> ForgeResult<()> {
    if !range.contains(&value) {
        return Err(ForgeError::InvalidInput(format!(
            "{field} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}
