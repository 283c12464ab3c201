//! Lead profile assembly: one heuristic pass plus one recommendation call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{BudgetRange, BusinessStage, ExperienceLevel, Language, Turn, Urgency};
use super::llm::LanguageModel;
use super::recommend::Recommender;
use super::scoring::HeuristicScorer;

/// Boolean business signals mined from the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessMetrics {
    pub has_existing_business: bool,
    pub has_team: bool,
    pub has_capital: bool,
    pub has_experience: bool,
    pub seeking_growth: bool,
}

/// Immutable qualification snapshot for one contact.
///
/// Built once per qualification request and handed to the persistence
/// and notification layers; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadProfile {
    pub email: String,
    pub name: String,
    pub language: Language,
    pub readiness_score: u8,
    pub stage: BusinessStage,
    pub urgency: Urgency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,
    pub recommended_product: super::domain::Product,
    pub product_confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_error: Option<String>,
    pub pain_points: Vec<String>,
    pub business_metrics: BusinessMetrics,
    pub conversation_length: usize,
    pub quality_score: u8,
}

/// `floor(readiness*0.4 + confidence*0.4 + (100 - 15*pain_count)*0.2)`,
/// clamped to [0, 100].
pub(crate) fn quality_score(readiness: u8, confidence: u8, pain_point_count: usize) -> u8 {
    let readiness = f64::from(readiness);
    let confidence = f64::from(confidence);
    let pain_term = 100.0 - pain_point_count as f64 * 15.0;

    let raw = (readiness * 0.4 + confidence * 0.4 + pain_term * 0.2).floor();
    raw.clamp(0.0, 100.0) as u8
}

/// Composes the heuristic scorer and the recommender into one profile.
/// The recommender call is the only network round trip.
pub struct LeadProfileBuilder<M> {
    scorer: Arc<HeuristicScorer>,
    recommender: Recommender<M>,
}

impl<M> LeadProfileBuilder<M>
where
    M: LanguageModel,
{
    pub fn new(scorer: Arc<HeuristicScorer>, model: Arc<M>) -> Self {
        Self {
            scorer,
            recommender: Recommender::new(model),
        }
    }

    pub async fn build(
        &self,
        turns: &[Turn],
        email: &str,
        name: &str,
        language: Language,
        experience: Option<ExperienceLevel>,
    ) -> LeadProfile {
        let assessment = self.scorer.assess(turns, experience);
        let recommendation = self.recommender.recommend(turns).await;

        let quality_score = quality_score(
            assessment.readiness_score,
            recommendation.confidence,
            assessment.pain_points.len(),
        );

        LeadProfile {
            email: email.to_string(),
            name: name.to_string(),
            language,
            readiness_score: assessment.readiness_score,
            stage: assessment.stage,
            urgency: assessment.urgency,
            budget_range: assessment.budget_range,
            recommended_product: recommendation.product,
            product_confidence: recommendation.confidence,
            recommendation_error: recommendation.error,
            pain_points: assessment.pain_points,
            business_metrics: assessment.metrics,
            conversation_length: turns.len(),
            quality_score,
        }
    }
}
