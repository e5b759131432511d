pub mod chat;
pub mod evaluation;

pub use chat::{ChatContext, ChatMessage, ChatReply, ChatRole};
pub use evaluation::{
    Competitor,
    EvaluationApiResponse,
    EvaluationInput,
    EvaluationResult,
    OverallScore,
    Similarity,
    SwotAnalysis,
};
