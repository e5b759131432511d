use crate::models::{ChatContext, ChatMessage};
use crate::services::llm::{CompletionProvider, LlmError, PromptMessage};

const UNKNOWN: &str = "Unknown";
const GENERAL_ADVICE: &str = "General advice";

fn field_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

pub fn system_prompt(context: &ChatContext) -> String {
    format!(
        "You are an expert startup consultant. The user is asking for help with a specific \
         \"Next Step\" from a startup idea evaluation.\n\n\
         **Startup Idea Context:**\n\
         Name: {}\n\
         Description: {}\n\
         Target Market: {}\n\n\
         **Focus Step:**\n\
         {}\n\n\
         Your goal is to provide specific, actionable, and practical advice on how to execute \
         this step. Be concise but thorough.",
        field_or(&context.idea_name, UNKNOWN),
        field_or(&context.description, UNKNOWN),
        field_or(&context.target_market, UNKNOWN),
        field_or(&context.step, GENERAL_ADVICE),
    )
}

/// Forwards the client-held conversation, prefixed with a context-specific
/// system prompt, and returns the assistant's reply. No fallback.
pub async fn relay(
    provider: &dyn CompletionProvider,
    context: &ChatContext,
    messages: &[ChatMessage],
) -> Result<String, LlmError> {
    let mut prompt = Vec::with_capacity(messages.len() + 1);
    prompt.push(PromptMessage::system(system_prompt(context)));
    prompt.extend(messages.iter().map(PromptMessage::from));

    provider.complete_chat(&prompt).await
}
