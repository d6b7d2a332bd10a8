//! Transport seam between the plan generator and the generation service.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::GenerationError;

/// One structured-output generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    /// Schema the reply must follow; the reply is requested as JSON.
    pub response_schema: serde_json::Value,
}

/// Sends generation requests to a service. Implementations perform exactly
/// one call per invocation, with no retry.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// Name used in logs and transport errors.
    fn provider(&self) -> &str;

    /// Returns the reply text, or `None` when the service produced none.
    async fn generate_content(
        &self,
        api_key: &SecretString,
        request: &GenerationRequest,
    ) -> Result<Option<String>, GenerationError>;
}
