//! Top-level view router: landing → quiz → loading → result.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::GenerationError;
use crate::profile::{MealPlan, UserProfile};

/// Message shown on the landing page after any generation failure.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Não foi possível gerar seu plano no momento. Verifique sua chave API ou tente novamente.";

/// The current screen. `Result` holds profile and plan together, so one is
/// never present without the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Landing { error: Option<String> },
    Quiz,
    Loading { profile: UserProfile },
    Result { profile: UserProfile, plan: MealPlan },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Landing { .. } => "landing",
            Self::Quiz => "quiz",
            Self::Loading { .. } => "loading",
            Self::Result { .. } => "result",
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::Landing { error: None }
    }
}

/// Handle for one in-flight generation. Resolving with a ticket that is not
/// the one the orchestrator is waiting on has no effect.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationTicket {
    pub id: u64,
    pub profile: UserProfile,
}

#[derive(Debug, Default)]
pub struct Orchestrator {
    view: View,
    /// Id of the ticket `Loading` is waiting for.
    awaiting: Option<u64>,
    next_ticket: u64,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// landing → quiz. Clears any previous error.
    pub fn start(&mut self) -> bool {
        if !matches!(self.view, View::Landing { .. }) {
            return false;
        }
        self.view = View::Quiz;
        true
    }

    /// quiz → landing.
    pub fn cancel_quiz(&mut self) -> bool {
        if self.view != View::Quiz {
            return false;
        }
        self.view = View::default();
        true
    }

    /// quiz → loading. The returned ticket must be resolved with the
    /// generator's outcome.
    pub fn complete(&mut self, profile: UserProfile) -> Option<GenerationTicket> {
        if self.view != View::Quiz {
            warn!(view = self.view.name(), "Quiz completion outside the quiz view");
            return None;
        }

        self.next_ticket += 1;
        let id = self.next_ticket;
        self.awaiting = Some(id);
        self.view = View::Loading {
            profile: profile.clone(),
        };
        info!(ticket = id, "Generating meal plan");
        Some(GenerationTicket { id, profile })
    }

    /// loading → result on success, loading → landing with the fixed
    /// message on failure. Returns `false` for a stale ticket.
    pub fn resolve(
        &mut self,
        ticket: &GenerationTicket,
        outcome: Result<MealPlan, GenerationError>,
    ) -> bool {
        if self.awaiting != Some(ticket.id) || !matches!(self.view, View::Loading { .. }) {
            warn!(ticket = ticket.id, "Discarding stale generation result");
            return false;
        }
        self.awaiting = None;

        let profile = match std::mem::take(&mut self.view) {
            View::Loading { profile } => profile,
            _ => ticket.profile.clone(),
        };

        self.view = match outcome {
            Ok(plan) => {
                info!(ticket = ticket.id, "Meal plan ready");
                View::Result { profile, plan }
            }
            Err(e) => {
                error!(ticket = ticket.id, error = %e, "Meal plan generation failed");
                View::Landing {
                    error: Some(GENERATION_FAILED_MESSAGE.to_string()),
                }
            }
        };
        true
    }

    /// result → landing, dropping profile, plan and error.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.view, View::Result { .. }) {
            return false;
        }
        self.view = View::default();
        true
    }

    /// Close the error toast on the landing page.
    pub fn dismiss_error(&mut self) -> bool {
        match &mut self.view {
            View::Landing { error } if error.is_some() => {
                *error = None;
                true
            }
            _ => false,
        }
    }
}
