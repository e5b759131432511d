use rand::Rng;

use crate::models::{
    Competitor, EvaluationInput, EvaluationResult, OverallScore, Similarity, SwotAnalysis,
};

pub const BASE_SCORE: i32 = 60;
const SUMMARY_PREVIEW_CHARS: usize = 100;

/// Score before noise: base plus bonuses for a detailed description and for
/// each optional field that was filled in.
pub fn base_score(input: &EvaluationInput) -> i32 {
    let length = input.description.chars().count();
    let mut score = BASE_SCORE;

    for threshold in [100, 200, 300] {
        if length > threshold {
            score += 5;
        }
    }
    if input.target_market.is_some() {
        score += 5;
    }
    if input.industry.is_some() {
        score += 3;
    }
    if input.monetization_model.is_some() {
        score += 7;
    }
    score
}

/// Heuristic score with uniform noise in `-5..=4`, clamped into range.
pub fn score<R: Rng + ?Sized>(input: &EvaluationInput, rng: &mut R) -> OverallScore {
    let noise: i32 = rng.random_range(-5..=4);
    OverallScore::clamped(base_score(input) + noise)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationBand {
    StrongProceed,
    ProceedWithCaution,
    PivotRecommended,
    Reconsider,
}

impl RecommendationBand {
    pub fn for_score(score: OverallScore) -> Self {
        match score.value() {
            80.. => Self::StrongProceed,
            65..=79 => Self::ProceedWithCaution,
            50..=64 => Self::PivotRecommended,
            _ => Self::Reconsider,
        }
    }

    pub fn recommendation(self, idea_name: &str) -> String {
        match self {
            Self::StrongProceed => format!(
                "Strong proceed: \"{}\" shows strong potential. Move quickly to build an MVP \
                 and validate with early customers.",
                idea_name
            ),
            Self::ProceedWithCaution => format!(
                "Proceed with caution: \"{}\" has promise, but validate the riskiest assumptions \
                 before investing heavily.",
                idea_name
            ),
            Self::PivotRecommended => format!(
                "Pivot recommended: \"{}\" needs a sharper problem, audience or business model \
                 before it is worth pursuing.",
                idea_name
            ),
            Self::Reconsider => format!(
                "Reconsider: \"{}\" faces significant challenges. Revisit the core problem and \
                 whether customers will pay to solve it.",
                idea_name
            ),
        }
    }
}

/// Builds a complete evaluation from the input alone. Used when the LLM path
/// is unavailable; never fails.
pub fn generate_fallback<R: Rng + ?Sized>(
    input: &EvaluationInput,
    rng: &mut R,
) -> EvaluationResult {
    let overall_score = score(input, rng);
    let band = RecommendationBand::for_score(overall_score);

    let industry = input.industry.as_deref().unwrap_or("tech");
    let market = input.target_market.as_deref().unwrap_or("its target customers");
    let monetization = input.monetization_model.as_deref();

    let mut strengths = vec![
        "Addresses a clearly stated need".to_string(),
        "Innovative approach".to_string(),
    ];
    if let Some(target) = &input.target_market {
        strengths.push(format!("Defined target market: {}", target));
    }
    if let Some(model) = monetization {
        strengths.push(format!("Revenue model identified: {}", model));
    }

    let profitability = match monetization {
        Some(model) => format!(
            "Moderate - a {} model can work, but unit economics in {} still need to be proven.",
            model, industry
        ),
        None => "Uncertain - no monetization model specified yet.".to_string(),
    };

    EvaluationResult {
        idea_summary: format!(
            "(Fallback) \"{}\" is a solution in the {} space. {}",
            input.idea_name,
            industry,
            preview(&input.description)
        ),
        swot: SwotAnalysis {
            strengths,
            weaknesses: vec![
                "Execution risk".to_string(),
                "Resource intensive to build and market".to_string(),
            ],
            opportunities: vec![
                format!("Growing demand in the {} sector", industry),
                format!("Partnerships that reach {}", market),
            ],
            threats: vec![
                format!("Established competitors in {}", industry),
                "Regulatory changes".to_string(),
            ],
        },
        market_potential: format!(
            "Medium - demand from {} looks plausible but requires further validation.",
            market
        ),
        profitability,
        competitors: vec![
            Competitor {
                name: format!("Established {} incumbent", industry),
                description: "An existing player already serving this need".to_string(),
                similarity: Similarity::Medium,
            },
            Competitor {
                name: "Niche startups".to_string(),
                description: format!("Early-stage teams targeting {}", market),
                similarity: Similarity::Low,
            },
        ],
        risks: vec![
            "Market adoption slower than expected".to_string(),
            "Funding and runway".to_string(),
            "Customer acquisition cost".to_string(),
        ],
        overall_score,
        recommendation: band.recommendation(&input.idea_name),
        next_steps: vec![
            format!("Interview at least 10 potential customers in {}", market),
            "Validate key assumptions with a landing page or pre-sales".to_string(),
            "Build a minimum viable product".to_string(),
            "Analyse competitors' pricing and positioning".to_string(),
        ],
    }
}

fn preview(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(SUMMARY_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
