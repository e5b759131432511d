mod config;
mod handlers;
mod models;
mod services;
mod state;

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use log::{info, warn};

use config::Config;
use services::openai::OpenAiClient;
use state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.llm.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; evaluations fall back to the heuristic, chat will fail");
    }

    let provider = OpenAiClient::new(config.llm.clone()).map_err(io::Error::other)?;
    let app_state = web::Data::new(AppState::new(Arc::new(provider)));

    info!(
        "Starting idea evaluator on {}:{} (evaluation model {}, chat model {})",
        config.bind_address, config.port, config.llm.evaluation_model, config.llm.chat_model
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(Cors::permissive())
            .app_data(app_state.clone())
            .configure(handlers::routes)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
