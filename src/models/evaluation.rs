use std::borrow::Cow;

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A startup idea as submitted through the evaluation form, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationInput {
    pub idea_name: String,
    pub description: String,
    pub target_market: Option<String>,
    pub industry: Option<String>,
    pub monetization_model: Option<String>,
}

/// Structured evaluation of a startup idea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EvaluationResult {
    /// A concise summary of the startup idea
    pub idea_summary: String,
    /// SWOT analysis of the idea
    pub swot: SwotAnalysis,
    /// Assessment of market potential (High/Medium/Low) with reasoning
    pub market_potential: String,
    /// Assessment of profitability potential with reasoning
    pub profitability: String,
    /// List of potential competitors
    pub competitors: Vec<Competitor>,
    /// List of major risks
    pub risks: Vec<String>,
    /// Overall score from 0 to 100
    pub overall_score: OverallScore,
    /// Final recommendation (e.g., Proceed, Pivot, etc.) with justification
    pub recommendation: String,
    /// List of actionable next steps
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SwotAnalysis {
    /// List of strengths
    pub strengths: Vec<String>,
    /// List of weaknesses
    pub weaknesses: Vec<String>,
    /// List of opportunities
    pub opportunities: Vec<String>,
    /// List of threats
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Competitor {
    /// Name of the competing company or product
    pub name: String,
    /// What the competitor offers
    pub description: String,
    /// How closely the competitor overlaps with the idea
    pub similarity: Similarity,
}

/// Degree of overlap between a competitor and the evaluated idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Similarity {
    High,
    Medium,
    Low,
}

pub const MAX_SCORE: u8 = 100;

/// Score in `0..=100`. Out-of-range values are rejected on deserialization
/// and clamped when computed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OverallScore(u8);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("overall score {0} is outside 0..=100")]
pub struct ScoreOutOfRange(pub u8);

impl OverallScore {
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(0, i32::from(MAX_SCORE)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for OverallScore {
    type Error = ScoreOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > MAX_SCORE {
            return Err(ScoreOutOfRange(value));
        }
        Ok(Self(value))
    }
}

impl From<OverallScore> for u8 {
    fn from(score: OverallScore) -> Self {
        score.0
    }
}

impl JsonSchema for OverallScore {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "OverallScore".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "minimum": 0,
            "maximum": MAX_SCORE
        })
    }
}

/// Envelope returned by `POST /api/evaluate`.
#[derive(Debug, Serialize)]
pub struct EvaluationApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EvaluationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationApiResponse {
    pub fn ok(data: EvaluationResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
