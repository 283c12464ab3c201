use serde::{Deserialize, Serialize};

/// Tunable tables and thresholds driving the heuristic scorer.
///
/// The default values are deliberate: they reproduce the tables the
/// production funnel was tuned with, so scores stay comparable across
/// deployments. Treat them as configuration, not as code to improve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Keywords whose presence raises the readiness score, with points.
    pub positive_keywords: Vec<(String, i32)>,
    /// Keywords whose presence lowers the readiness score, with points.
    pub negative_keywords: Vec<(String, i32)>,
    /// Points granted per transcript turn.
    pub engagement_points_per_turn: i32,
    /// Cap on the engagement bonus.
    pub engagement_bonus_cap: i32,
    /// Budgets below this (low bound of the extracted range) read as STARTUP.
    pub startup_budget_ceiling: u64,
    /// Budgets below this but at or above the startup ceiling read as TRACTION.
    pub traction_budget_ceiling: u64,
    /// Any of these words pushes the stage to SCALING.
    pub growth_keywords: Vec<String>,
    /// Readiness must exceed this before immediacy keywords mean HIGH urgency.
    pub high_urgency_readiness_floor: i32,
    /// Words signalling the contact wants to move now.
    pub immediacy_keywords: Vec<String>,
    /// Words signalling the contact is deferring.
    pub deferral_keywords: Vec<String>,
    /// Pain-point taxonomy: label plus the keywords that imply it,
    /// scanned in declared order. At most three labels are reported.
    pub pain_point_taxonomy: Vec<(String, Vec<String>)>,
}

fn keyed(entries: &[(&str, i32)]) -> Vec<(String, i32)> {
    entries
        .iter()
        .map(|(keyword, points)| (keyword.to_string(), *points))
        .collect()
}

fn words(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|word| word.to_string()).collect()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            positive_keywords: keyed(&[
                ("ready", 10),
                ("launch", 10),
                ("invest", 10),
                ("growth", 10),
                ("expand", 10),
                ("scale", 10),
                ("business", 5),
                ("experience", 8),
                ("capital", 10),
                ("team", 8),
            ]),
            negative_keywords: keyed(&[
                ("maybe", 5),
                ("unsure", 5),
                ("later", 8),
                ("consider", 3),
                ("budget", 5),
            ]),
            engagement_points_per_turn: 2,
            engagement_bonus_cap: 20,
            startup_budget_ceiling: 50_000,
            traction_budget_ceiling: 200_000,
            growth_keywords: words(&["scale", "growth", "expand"]),
            high_urgency_readiness_floor: 75,
            immediacy_keywords: words(&["asap", "immediately", "this week"]),
            deferral_keywords: words(&["later", "maybe", "in a year"]),
            pain_point_taxonomy: vec![
                (
                    "time management".to_string(),
                    words(&["busy", "time", "schedule", "overwhelm"]),
                ),
                (
                    "limited revenue".to_string(),
                    words(&["income", "revenue", "money", "cash flow", "profit"]),
                ),
                (
                    "lack of expertise".to_string(),
                    words(&["don't know", "inexperienced", "learning", "help"]),
                ),
                (
                    "scaling challenges".to_string(),
                    words(&["grow", "expand", "scale", "growth"]),
                ),
                (
                    "operational issues".to_string(),
                    words(&["process", "operations", "system", "structure"]),
                ),
                (
                    "customer acquisition".to_string(),
                    words(&["customers", "clients", "sales", "marketing"]),
                ),
            ],
        }
    }
}
