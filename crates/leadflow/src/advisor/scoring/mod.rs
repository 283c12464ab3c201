mod config;
mod rules;

pub use config::ScoringConfig;

use serde::{Deserialize, Serialize};

use super::domain::{BudgetRange, BusinessStage, ExperienceLevel, Turn, Urgency};
use super::profile::BusinessMetrics;

/// Stateless scorer applying the configured keyword tables to a transcript.
///
/// Every operation is pure and deterministic given the same transcript
/// and configuration; no network or clock access happens here.
pub struct HeuristicScorer {
    config: ScoringConfig,
}

impl HeuristicScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Run all sub-computations over one transcript read.
    pub fn assess(&self, turns: &[Turn], experience: Option<ExperienceLevel>) -> HeuristicAssessment {
        let readiness_score = rules::readiness_score(turns, &self.config);
        let budget_range = rules::extract_budget_range(turns);
        let stage = rules::determine_stage(turns, budget_range, experience, &self.config);
        let urgency = rules::determine_urgency(turns, readiness_score, &self.config);
        let pain_points = rules::extract_pain_points(turns, &self.config);
        let metrics = rules::extract_business_metrics(turns);

        HeuristicAssessment {
            readiness_score,
            stage,
            urgency,
            budget_range,
            pain_points,
            metrics,
        }
    }

    pub fn readiness_score(&self, turns: &[Turn]) -> u8 {
        rules::readiness_score(turns, &self.config)
    }

    pub fn stage(
        &self,
        turns: &[Turn],
        budget: Option<BudgetRange>,
        experience: Option<ExperienceLevel>,
    ) -> BusinessStage {
        rules::determine_stage(turns, budget, experience, &self.config)
    }

    pub fn urgency(&self, turns: &[Turn], readiness_score: u8) -> Urgency {
        rules::determine_urgency(turns, readiness_score, &self.config)
    }

    pub fn budget_range(&self, turns: &[Turn]) -> Option<BudgetRange> {
        rules::extract_budget_range(turns)
    }

    pub fn pain_points(&self, turns: &[Turn]) -> Vec<String> {
        rules::extract_pain_points(turns, &self.config)
    }

    pub fn business_metrics(&self, turns: &[Turn]) -> BusinessMetrics {
        rules::extract_business_metrics(turns)
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Result of one heuristic pass over a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicAssessment {
    pub readiness_score: u8,
    pub stage: BusinessStage,
    pub urgency: Urgency,
    pub budget_range: Option<BudgetRange>,
    pub pain_points: Vec<String>,
    pub metrics: BusinessMetrics,
}
