use crate::{Evaluation, ForgeUpdate, Idea, IdeaResponse};

/// Something that happened to a run, as seen by a front end.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A new run begins. Everything from the previous run is discarded.
    Started,
    /// An update arrived on the depth stream.
    Update(ForgeUpdate),
    /// An independent run returned its idea.
    Generated(IdeaResponse),
    /// The run failed as a whole. Results already shown stay in place.
    Failed(String),
    /// The request settled or the stream ended, successfully or not.
    Finished,
}

/// Client-side state of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub loading: bool,
    /// The most recent update.
    pub current_update: Option<ForgeUpdate>,
    /// Every update of this run in arrival order. Append-only until the next
    /// `Started`.
    pub history: Vec<ForgeUpdate>,
    pub final_idea: Option<Idea>,
    pub final_evaluation: Option<Evaluation>,
    /// Last failure, from the request itself or from a server error record.
    pub error: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event and return the next state.
    #[must_use]
    pub fn reduce(mut self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Started => Self {
                loading: true,
                ..Self::default()
            },
            SessionEvent::Update(update) => {
                if update.is_terminal() {
                    self.final_idea.clone_from(&update.idea);
                    self.final_evaluation.clone_from(&update.evaluation);
                }
                if let Some(error) = &update.error {
                    self.error = Some(error.clone());
                }
                self.current_update = Some(update.clone());
                self.history.push(update);
                self
            }
            SessionEvent::Generated(response) => {
                self.final_idea = Some(response.idea);
                self.final_evaluation = response.evaluation;
                self
            }
            SessionEvent::Failed(error) => {
                self.loading = false;
                self.error = Some(error);
                self
            }
            SessionEvent::Finished => {
                self.loading = false;
                self
            }
        }
    }

    /// A final result has been delivered for this run: an independent idea
    /// arrived or the stream reached a terminal stage, with or without an
    /// idea attached.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.final_idea.is_some() || self.history.iter().any(ForgeUpdate::is_terminal)
    }

    /// The newest idea seen in the history. Useful for showing something
    /// when a run is interrupted before it finalizes.
    #[must_use]
    pub fn latest_idea(&self) -> Option<&Idea> {
        self.history.iter().rev().find_map(|update| update.idea.as_ref())
    }

    /// The highest iteration number seen so far.
    #[must_use]
    pub fn iteration(&self) -> u32 {
        self.history
            .iter()
            .map(|update| update.iteration)
            .max()
            .unwrap_or(0)
    }
}
