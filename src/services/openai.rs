use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::LlmConfig;
use crate::services::llm::{CompletionProvider, LlmError, PromptMessage, ResponseFormat};

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
/// Built once at startup and shared by every request.
pub struct OpenAiClient {
    client: Client,
    config: LlmConfig,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    async fn send(&self, body: &ChatRequestBody<'_>) -> Result<ChoiceMessage, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey)?;

        let mut req = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(body);

        if let Some(referer) = &self.config.http_referer {
            req = req.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.app_title {
            req = req.header("X-Title", title);
        }

        debug!("Sending completion request to {} (model {})", self.endpoint(), body.model);
        let res = match req.send().await {
            Ok(r) => r,
            Err(err) => {
                error!("LLM request failed to send: {}", err);
                return Err(err.into());
            }
        };

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            error!("LLM provider non-success status: {} body: {}", status, text);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        first_message(&text)
    }
}

fn first_message(text: &str) -> Result<ChoiceMessage, LlmError> {
    let body: ChatResponseBody = serde_json::from_str(text)?;
    body.choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or(LlmError::EmptyChoices)
}

fn chat_content(message: ChoiceMessage) -> Result<String, LlmError> {
    match message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(LlmError::EmptyContent),
    }
}

fn structured_content(mut message: ChoiceMessage) -> Result<Value, LlmError> {
    if let Some(refusal) = message.refusal.take().filter(|r| !r.is_empty()) {
        return Err(LlmError::Refusal(refusal));
    }
    let content = chat_content(message)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Null => Err(LlmError::EmptyContent),
        parsed => Ok(parsed),
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete_chat(&self, messages: &[PromptMessage]) -> Result<String, LlmError> {
        let body = ChatRequestBody {
            model: &self.config.chat_model,
            messages,
            response_format: None,
        };
        chat_content(self.send(&body).await?)
    }

    async fn complete_structured(
        &self,
        messages: &[PromptMessage],
        format: &ResponseFormat,
    ) -> Result<Value, LlmError> {
        let body = ChatRequestBody {
            model: &self.config.evaluation_model,
            messages,
            response_format: Some(format),
        };
        structured_content(self.send(&body).await?)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::schema;

    #[test]
    fn structured_request_carries_response_format() {
        let messages = vec![PromptMessage::system("be critical"), PromptMessage::user("evaluate")];
        let format = schema::evaluation_response_format();
        let body = ChatRequestBody {
            model: "gpt-4o-2024-08-06",
            messages: &messages,
            response_format: Some(&format),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-2024-08-06");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "evaluate");
        assert_eq!(json["response_format"]["type"], "json_schema");
        assert_eq!(json["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn chat_request_omits_response_format() {
        let messages = vec![PromptMessage::user("hello")];
        let body = ChatRequestBody {
            model: "gpt-4o",
            messages: &messages,
            response_format: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn extracts_chat_reply() {
        let text = r#"{"choices":[{"message":{"role":"assistant","content":"Interview ten."}}]}"#;
        let reply = chat_content(first_message(text).unwrap()).unwrap();
        assert_eq!(reply, "Interview ten.");
    }

    #[test]
    fn parses_structured_content() {
        let text = r#"{"choices":[{"message":{"content":"{\"ideaSummary\":\"x\"}"}}]}"#;
        let value = structured_content(first_message(text).unwrap()).unwrap();
        assert_eq!(value["ideaSummary"], "x");
    }

    #[test]
    fn empty_choices_is_an_error() {
        assert!(matches!(first_message(r#"{"choices":[]}"#), Err(LlmError::EmptyChoices)));
        assert!(matches!(first_message("not json"), Err(LlmError::Decode(_))));
    }

    #[test]
    fn empty_refusal_does_not_hide_content() {
        let text = r#"{"choices":[{"message":{"content":"{\"risks\":[]}","refusal":""}}]}"#;
        let value = structured_content(first_message(text).unwrap()).unwrap();
        assert_eq!(value["risks"], serde_json::json!([]));
    }

    #[test]
    fn null_or_refused_structured_content_is_an_error() {
        let null_content = r#"{"choices":[{"message":{"content":null}}]}"#;
        assert!(matches!(
            structured_content(first_message(null_content).unwrap()),
            Err(LlmError::EmptyContent)
        ));

        let literal_null = r#"{"choices":[{"message":{"content":"null"}}]}"#;
        assert!(matches!(
            structured_content(first_message(literal_null).unwrap()),
            Err(LlmError::EmptyContent)
        ));

        let refused = r#"{"choices":[{"message":{"content":null,"refusal":"I can't help"}}]}"#;
        assert!(matches!(
            structured_content(first_message(refused).unwrap()),
            Err(LlmError::Refusal(_))
        ));
    }

    #[actix_web::test]
    async fn missing_api_key_fails_without_network() {
        let client = OpenAiClient::new(LlmConfig::default()).unwrap();
        let err = client.complete_chat(&[PromptMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
