use log::{error, info, warn};

use crate::models::{EvaluationInput, EvaluationResult};
use crate::services::llm::{CompletionProvider, LlmError, PromptMessage};
use crate::services::{schema, scoring};

const SYSTEM_PROMPT: &str = "You are an expert startup consultant and venture capitalist. \
Your goal is to evaluate startup ideas critically and provide actionable feedback.";

const NOT_SPECIFIED: &str = "Not specified";

pub fn build_prompt(input: &EvaluationInput) -> String {
    let or_unspecified =
        |field: &Option<String>| field.as_deref().unwrap_or(NOT_SPECIFIED).to_string();

    format!(
        "Evaluate the following startup idea:\n\n\
         **Name:** {}\n\
         **Description:** {}\n\
         **Target Market:** {}\n\
         **Industry:** {}\n\
         **Monetization Model:** {}\n\n\
         Provide a comprehensive analysis including SWOT, market potential, profitability, \
         competitors, risks, an overall score (0-100), a recommendation, and actionable \
         next steps.\n\
         Be critical but constructive.",
        input.idea_name,
        input.description,
        or_unspecified(&input.target_market),
        or_unspecified(&input.industry),
        or_unspecified(&input.monetization_model),
    )
}

/// Produces exactly one evaluation: the LLM's structured answer when it
/// arrives and conforms, the heuristic fallback otherwise.
pub async fn evaluate_idea(
    provider: &dyn CompletionProvider,
    input: &EvaluationInput,
) -> EvaluationResult {
    match request_evaluation(provider, input).await {
        Ok(result) => {
            info!(
                "Evaluated \"{}\" via {} (score {})",
                input.idea_name,
                provider.provider_name(),
                result.overall_score.value()
            );
            result
        }
        Err(err) => {
            error!("Error evaluating \"{}\" with LLM: {}", input.idea_name, err);
            warn!("Falling back to heuristic evaluation");
            scoring::generate_fallback(input, &mut rand::rng())
        }
    }
}

async fn request_evaluation(
    provider: &dyn CompletionProvider,
    input: &EvaluationInput,
) -> Result<EvaluationResult, LlmError> {
    let messages = [
        PromptMessage::system(SYSTEM_PROMPT),
        PromptMessage::user(build_prompt(input)),
    ];
    let format = schema::evaluation_response_format();
    let payload = provider.complete_structured(&messages, &format).await?;
    Ok(schema::validate(payload)?)
}
