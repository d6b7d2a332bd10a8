//! Meal plan generation through an external LLM service.
//!
//! `PlanGenerator` owns the request contract (prompt, schema, parsing);
//! `GenerationTransport` implementations own the wire. The shipped transport
//! talks to Gemini's `generateContent` endpoint with structured output.

pub mod client;
pub mod gemini;
pub mod prompt;
pub mod schema;
pub mod transport;

pub use client::{PlanGenerator, parse_meal_plan};
pub use gemini::GeminiTransport;
pub use prompt::{meal_plan_prompt, objective_elaboration};
pub use schema::meal_plan_schema;
pub use transport::{GenerationRequest, GenerationTransport};
