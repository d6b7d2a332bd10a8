//! Plan generator: one profile in, one service call, one parsed plan out.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info, warn};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::profile::{MealPlan, UserProfile};

use super::prompt::meal_plan_prompt;
use super::schema::meal_plan_schema;
use super::transport::{GenerationRequest, GenerationTransport};

pub struct PlanGenerator {
    config: GenerationConfig,
    transport: Arc<dyn GenerationTransport>,
}

impl PlanGenerator {
    pub fn new(config: GenerationConfig, transport: Arc<dyn GenerationTransport>) -> Self {
        Self { config, transport }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the request that `generate` would send for `profile`.
    pub fn build_request(&self, profile: &UserProfile) -> GenerationRequest {
        GenerationRequest {
            model: self.config.model.clone(),
            prompt: meal_plan_prompt(profile),
            response_schema: meal_plan_schema(),
        }
    }

    /// Generate a plan for a complete profile. Single attempt, no retry.
    pub async fn generate(&self, profile: &UserProfile) -> Result<MealPlan, GenerationError> {
        let api_key = self.credential()?;
        let request = self.build_request(profile);

        info!(
            provider = self.transport.provider(),
            model = %request.model,
            objective = %profile.objective,
            "Requesting meal plan"
        );

        let text = match self.transport.generate_content(api_key, &request).await {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!(provider = self.transport.provider(), "Generation service returned no text");
                return Err(GenerationError::EmptyResponse);
            }
            Err(e) => {
                error!("Error generating plan: {}", e);
                return Err(e);
            }
        };

        let plan = parse_meal_plan(&text)?;
        info!(
            calories = plan.calories_target,
            "Meal plan generated"
        );
        Ok(plan)
    }

    fn credential(&self) -> Result<&SecretString, GenerationError> {
        match self.config.api_key.as_ref() {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(key),
            _ => {
                error!("Generation credential is not configured");
                Err(GenerationError::Configuration(
                    "API key not found".to_string(),
                ))
            }
        }
    }
}

/// Parse the service's structured reply. Structured-output mode should make
/// failures rare, but the text is never trusted without parsing.
pub fn parse_meal_plan(text: &str) -> Result<MealPlan, GenerationError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        error!(error = %e, response = text, "Failed to parse meal plan");
        GenerationError::MalformedResponse(e)
    })
}

/// Remove a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
