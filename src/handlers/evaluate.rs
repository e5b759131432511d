use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use log::{error, warn};
use serde_json::{json, Value};

use crate::models::{EvaluationApiResponse, EvaluationInput};
use crate::services::evaluation;
use crate::state::AppState;

const INVALID_JSON: &str = "Invalid JSON in request body";
const IDEA_NAME_REQUIRED: &str = "Idea name is required and must be a non-empty string";
const DESCRIPTION_REQUIRED: &str = "Description is required and must be a non-empty string";
const GENERIC_ERROR: &str = "An error occurred while processing your request";

pub async fn describe() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Startup Idea Evaluation API",
        "usage": "Send a POST request with ideaName and description in the body",
        "endpoint": "/api/evaluate"
    }))
}

pub async fn evaluate(body: web::Bytes, state: web::Data<AppState>) -> HttpResponse {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(err) => {
            warn!("Rejected evaluation request with malformed JSON: {}", err);
            return respond(StatusCode::BAD_REQUEST, &EvaluationApiResponse::failure(INVALID_JSON));
        }
    };

    let input = match parse_input(&payload) {
        Ok(input) => input,
        Err(message) => {
            return respond(StatusCode::BAD_REQUEST, &EvaluationApiResponse::failure(message));
        }
    };

    let result = evaluation::evaluate_idea(state.provider.as_ref(), &input).await;
    respond(StatusCode::OK, &EvaluationApiResponse::ok(result))
}

/// Validates required fields and normalizes the rest: strings are trimmed
/// and blank optional fields become absent.
fn parse_input(payload: &Value) -> Result<EvaluationInput, &'static str> {
    let idea_name = string_field(payload, "ideaName").ok_or(IDEA_NAME_REQUIRED)?;
    let description = string_field(payload, "description").ok_or(DESCRIPTION_REQUIRED)?;

    Ok(EvaluationInput {
        idea_name,
        description,
        target_market: string_field(payload, "targetMarket"),
        industry: string_field(payload, "industry"),
        monetization_model: string_field(payload, "monetizationModel"),
    })
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn respond(status: StatusCode, envelope: &EvaluationApiResponse) -> HttpResponse {
    match serde_json::to_vec(envelope) {
        Ok(bytes) => HttpResponse::build(status)
            .content_type("application/json")
            .body(bytes),
        Err(err) => {
            error!("Evaluation API error: failed to serialize response: {}", err);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": GENERIC_ERROR
            }))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::routes;
    use crate::services::llm::testing::ScriptedProvider;
    use actix_web::{test, App};
    use std::sync::Arc;

    fn state(provider: ScriptedProvider) -> web::Data<AppState> {
        web::Data::new(AppState::new(Arc::new(provider)))
    }

    #[actix_web::test]
    async fn valid_request_falls_back_when_llm_fails() {
        let app = test::init_service(
            App::new().app_data(state(ScriptedProvider::failing())).configure(routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/evaluate")
            .set_json(json!({
                "ideaName": "A",
                "description": "x".repeat(350),
                "targetMarket": "m",
                "industry": "i",
                "monetizationModel": "sub"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        let data = &body["data"];
        let score = data["overallScore"].as_u64().unwrap();
        assert!((85..=94).contains(&score));
        for field in [
            "ideaSummary",
            "swot",
            "marketPotential",
            "profitability",
            "competitors",
            "risks",
            "recommendation",
            "nextSteps",
        ] {
            assert!(!data[field].is_null(), "{field} missing");
        }
    }

    #[actix_web::test]
    async fn valid_request_returns_llm_result() {
        let payload = json!({
            "ideaSummary": "Drone deliveries for islands",
            "swot": {"strengths": [], "weaknesses": [], "opportunities": [], "threats": []},
            "marketPotential": "High",
            "profitability": "Medium",
            "competitors": [],
            "risks": [],
            "overallScore": 88,
            "recommendation": "Proceed",
            "nextSteps": []
        });
        let app = test::init_service(
            App::new()
                .app_data(state(ScriptedProvider::with_structured(payload)))
                .configure(routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/evaluate")
            .set_json(json!({"ideaName": "SkyDrop", "description": "Drone deliveries for islands"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["overallScore"], 88);
        assert_eq!(body["data"]["ideaSummary"], "Drone deliveries for islands");
    }

    #[actix_web::test]
    async fn missing_idea_name_is_rejected() {
        let app = test::init_service(
            App::new().app_data(state(ScriptedProvider::failing())).configure(routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/evaluate")
            .set_json(json!({"description": "a valid description here"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Idea name"));
    }

    #[actix_web::test]
    async fn blank_description_is_rejected() {
        let app = test::init_service(
            App::new().app_data(state(ScriptedProvider::failing())).configure(routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/evaluate")
            .set_json(json!({"ideaName": "Idea", "description": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Description"));
    }

    #[actix_web::test]
    async fn absent_description_is_rejected() {
        let provider = Arc::new(ScriptedProvider::failing());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(provider.clone())))
                .configure(routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/evaluate")
            .set_json(json!({"ideaName": "Idea"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], DESCRIPTION_REQUIRED);
        assert!(provider.recorded().is_empty());
    }

    #[actix_web::test]
    async fn malformed_json_is_rejected() {
        let provider = Arc::new(ScriptedProvider::failing());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(provider.clone())))
                .configure(routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/evaluate")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"ideaName\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], INVALID_JSON);
        assert!(provider.recorded().is_empty());
    }

    #[actix_web::test]
    async fn usage_descriptor_is_static() {
        let app = test::init_service(
            App::new().app_data(state(ScriptedProvider::failing())).configure(routes),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/evaluate").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["endpoint"], "/api/evaluate");
        assert_eq!(body["message"], "Startup Idea Evaluation API");
    }
}
