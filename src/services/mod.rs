pub mod chat;
pub mod evaluation;
pub mod llm;
pub mod openai;
pub mod schema;
pub mod scoring;
