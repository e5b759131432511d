pub mod chat;
pub mod evaluate;

use actix_web::{web, HttpResponse};
use serde_json::json;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(main))
        .route("/health", web::get().to(health_check))
        .route("/api/evaluate", web::get().to(evaluate::describe))
        .route("/api/evaluate", web::post().to(evaluate::evaluate))
        .route("/api/chat", web::post().to(chat::send_message));
}

pub async fn main() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Startup Idea Evaluation API")
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
