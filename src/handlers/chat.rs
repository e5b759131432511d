use actix_web::{web, HttpResponse};
use log::{error, warn};
use serde_json::{json, Value};

use crate::models::{ChatContext, ChatMessage, ChatReply};
use crate::services::chat;
use crate::state::AppState;

const MESSAGES_REQUIRED: &str = "Messages array is required";
const INVALID_MESSAGE: &str =
    "Each message must have a role of \"user\" or \"assistant\" and string content";
const INTERNAL_ERROR: &str = "Internal server error";

pub async fn send_message(body: web::Bytes, state: web::Data<AppState>) -> HttpResponse {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(err) => {
            error!("Chat API error: malformed request body: {}", err);
            return internal_error();
        }
    };

    let messages = match payload.get("messages") {
        Some(Value::Array(items)) => items.clone(),
        _ => {
            return HttpResponse::BadRequest().json(json!({
                "error": MESSAGES_REQUIRED
            }));
        }
    };
    let messages: Vec<ChatMessage> = match serde_json::from_value(Value::Array(messages)) {
        Ok(m) => m,
        Err(err) => {
            warn!("Rejected chat request with invalid message: {}", err);
            return HttpResponse::BadRequest().json(json!({
                "error": INVALID_MESSAGE
            }));
        }
    };

    let context = ChatContext::from_json(payload.get("context"));

    match chat::relay(state.provider.as_ref(), &context, &messages).await {
        Ok(content) => HttpResponse::Ok().json(ChatReply::assistant(content)),
        Err(err) => {
            error!("Chat API error: {}", err);
            internal_error()
        }
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "error": INTERNAL_ERROR
    }))
}
