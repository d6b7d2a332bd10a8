//! Ten-step questionnaire that builds a `UserProfile`.

pub mod auto_advance;
pub mod draft;
pub mod machine;
pub mod step;

pub use auto_advance::{AUTO_ADVANCE_DELAY, AutoAdvanceTimer};
pub use draft::ProfileDraft;
pub use machine::{AutoAdvanceToken, Quiz, Selection, Transition};
pub use step::{Answer, Field, NumericField, StepKind, TOTAL_STEPS};
