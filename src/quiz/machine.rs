//! Quiz state machine, a step pointer over a growing profile draft.
//!
//! Moves strictly linearly: `advance` only succeeds when the current step's
//! predicate holds, and `retreat` from the first step cancels the quiz.

use tracing::debug;

use crate::profile::UserProfile;

use super::draft::ProfileDraft;
use super::step::{Answer, Field, NumericField, TOTAL_STEPS};

/// Outcome of `advance` / `retreat`.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Nothing changed (current step invalid, or a stale auto-advance).
    Unchanged,
    Advanced { step: usize },
    Retreated { step: usize },
    /// The final step was confirmed with a complete profile.
    Completed(UserProfile),
    /// `retreat` was called on the first step.
    Cancelled,
}

/// Outcome of `select_option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Answer stored; no automatic move.
    Recorded,
    /// Answer stored; the host should hand `token` back to
    /// `apply_auto_advance` after the selection delay.
    AutoAdvance(AutoAdvanceToken),
}

/// Identifies the quiz position an auto-advance was scheduled from. Any
/// step change in between makes it stale, even one that returns to the
/// same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvanceToken {
    pub step: usize,
    moves: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Quiz {
    step: usize,
    /// Bumped on every step change.
    moves: u64,
    draft: ProfileDraft,
}

impl Quiz {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn current_field(&self) -> Field {
        Field::ORDER[self.step]
    }

    pub fn is_last_step(&self) -> bool {
        self.step == TOTAL_STEPS - 1
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Fraction of the quiz reached, counting the current step.
    pub fn progress(&self) -> f64 {
        (self.step + 1) as f64 / TOTAL_STEPS as f64
    }

    pub fn progress_percent(&self) -> u32 {
        (self.progress() * 100.0).round() as u32
    }

    /// Whether `advance` would do anything. Hosts disable their "next"
    /// control when this is false.
    pub fn can_advance(&self) -> bool {
        self.draft.is_valid(self.current_field())
    }

    /// Record a single-choice answer. Asks for an auto-advance when the
    /// answer belongs to the current step and that step is not the last one;
    /// the last step always needs an explicit `advance`.
    pub fn select_option(&mut self, answer: Answer) -> Selection {
        self.draft.record(answer);

        if answer.field() == self.current_field() && !self.is_last_step() {
            Selection::AutoAdvance(AutoAdvanceToken {
                step: self.step,
                moves: self.moves,
            })
        } else {
            Selection::Recorded
        }
    }

    /// Record a typed number. Never auto-advances.
    pub fn set_numeric_field(&mut self, field: NumericField, raw: &str) {
        self.draft.set_numeric(field, raw);
    }

    pub fn advance(&mut self) -> Transition {
        if !self.can_advance() {
            debug!(step = self.step, field = %self.current_field(), "Advance blocked by invalid step");
            return Transition::Unchanged;
        }

        if self.is_last_step() {
            return match self.draft.finalize() {
                Ok(profile) => Transition::Completed(profile),
                Err(e) => {
                    debug!("Final step confirmed with incomplete profile: {}", e);
                    Transition::Unchanged
                }
            };
        }

        self.step += 1;
        self.moves += 1;
        Transition::Advanced { step: self.step }
    }

    pub fn retreat(&mut self) -> Transition {
        if self.step == 0 {
            return Transition::Cancelled;
        }
        self.step -= 1;
        self.moves += 1;
        Transition::Retreated { step: self.step }
    }

    /// Run a scheduled auto-advance. Ignored if the quiz has moved at all
    /// since the selection that produced `token`.
    pub fn apply_auto_advance(&mut self, token: AutoAdvanceToken) -> Transition {
        if token.step != self.step || token.moves != self.moves {
            debug!(scheduled = token.step, current = self.step, "Ignoring stale auto-advance");
            return Transition::Unchanged;
        }
        self.advance()
    }
}
