use std::sync::OnceLock;

use regex::Regex;

use super::config::ScoringConfig;
use crate::advisor::domain::{BudgetRange, BusinessStage, ExperienceLevel, Turn, Urgency};
use crate::advisor::profile::BusinessMetrics;

/// Concatenated turn text, as spoken.
pub(crate) fn joined_text(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| turn.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Concatenated turn text, lowercased for presence checks.
pub(crate) fn normalized_text(turns: &[Turn]) -> String {
    joined_text(turns).to_lowercase()
}

/// Keyword-presence readiness score, clamped to [0, 100].
///
/// Each table entry contributes once regardless of how often the keyword
/// appears; the engagement bonus rewards longer conversations.
pub(crate) fn readiness_score(turns: &[Turn], config: &ScoringConfig) -> u8 {
    let text = normalized_text(turns);
    let mut score: i32 = 0;

    for (keyword, points) in &config.positive_keywords {
        if text.contains(keyword.as_str()) {
            score += points;
        }
    }

    for (keyword, points) in &config.negative_keywords {
        if text.contains(keyword.as_str()) {
            score -= points;
        }
    }

    let engagement = (config.engagement_points_per_turn * turns.len() as i32)
        .min(config.engagement_bonus_cap);
    score += engagement;

    score.clamp(0, 100) as u8
}

/// Stage classification. Evaluated in fixed order; first match wins.
pub(crate) fn determine_stage(
    turns: &[Turn],
    budget: Option<BudgetRange>,
    experience: Option<ExperienceLevel>,
    config: &ScoringConfig,
) -> BusinessStage {
    let budget_low = budget.map(|range| range.low);

    if experience == Some(ExperienceLevel::None)
        || budget_low.is_some_and(|low| low < config.startup_budget_ceiling)
    {
        return BusinessStage::Startup;
    }

    if experience == Some(ExperienceLevel::Some)
        || budget_low.is_some_and(|low| {
            low >= config.startup_budget_ceiling && low < config.traction_budget_ceiling
        })
    {
        return BusinessStage::Traction;
    }

    let text = normalized_text(turns);
    if config
        .growth_keywords
        .iter()
        .any(|keyword| text.contains(keyword.as_str()))
    {
        return BusinessStage::Scaling;
    }

    BusinessStage::Traction
}

/// Urgency classification: HIGH needs both a hot readiness score and an
/// immediacy keyword, LOW needs only a deferral keyword.
pub(crate) fn determine_urgency(
    turns: &[Turn],
    readiness_score: u8,
    config: &ScoringConfig,
) -> Urgency {
    let text = normalized_text(turns);

    if i32::from(readiness_score) > config.high_urgency_readiness_floor
        && config
            .immediacy_keywords
            .iter()
            .any(|keyword| text.contains(keyword.as_str()))
    {
        return Urgency::High;
    }

    if config
        .deferral_keywords
        .iter()
        .any(|keyword| text.contains(keyword.as_str()))
    {
        return Urgency::Low;
    }

    Urgency::Medium
}

fn budget_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"\$([0-9][0-9,]*)").expect("currency pattern compiles"),
            Regex::new(r"(?i)([0-9][0-9,]*)\s*k\b").expect("k-suffix pattern compiles"),
            Regex::new(r"(?i)([0-9][0-9,]*)\s*(?:thousand|usd|dollars)\b")
                .expect("unit-suffix pattern compiles"),
        ]
    })
}

/// Scan the raw (non-lowercased) transcript for money mentions and keep
/// the smallest and largest magnitudes. Captured digits are taken at face
/// value; a "k" suffix marks a money mention but does not scale it.
pub(crate) fn extract_budget_range(turns: &[Turn]) -> Option<BudgetRange> {
    let text = joined_text(turns);
    let mut low: Option<u64> = None;
    let mut high: Option<u64> = None;

    for pattern in budget_patterns() {
        for capture in pattern.captures_iter(&text) {
            let digits = capture[1].replace(',', "");
            let Ok(amount) = digits.parse::<u64>() else {
                continue;
            };
            if amount == 0 {
                continue;
            }
            low = Some(low.map_or(amount, |current| current.min(amount)));
            high = Some(high.map_or(amount, |current| current.max(amount)));
        }
    }

    match (low, high) {
        (Some(low), Some(high)) => Some(BudgetRange { low, high }),
        _ => None,
    }
}

/// First three taxonomy labels whose keyword set hits the transcript,
/// in the taxonomy's declared order.
pub(crate) fn extract_pain_points(turns: &[Turn], config: &ScoringConfig) -> Vec<String> {
    let text = normalized_text(turns);

    config
        .pain_point_taxonomy
        .iter()
        .filter(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| text.contains(keyword.as_str()))
        })
        .map(|(label, _)| label.clone())
        .take(3)
        .collect()
}

fn metric_patterns() -> &'static [Regex; 5] {
    static PATTERNS: OnceLock<[Regex; 5]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(?i)business|company|shop|store|operation")
                .expect("business pattern compiles"),
            Regex::new(r"(?i)team|staff|employee|work|people").expect("team pattern compiles"),
            Regex::new(r"(?i)budget|capital|investment|money|fund")
                .expect("capital pattern compiles"),
            Regex::new(r"(?i)experience|worked|years|background")
                .expect("experience pattern compiles"),
            Regex::new(r"(?i)grow|scale|expand|revenue|income").expect("growth pattern compiles"),
        ]
    })
}

/// Boolean business signals used by downstream nurture flows.
pub(crate) fn extract_business_metrics(turns: &[Turn]) -> BusinessMetrics {
    let text = joined_text(turns);
    let [business, team, capital, experience, growth] = metric_patterns();

    BusinessMetrics {
        has_existing_business: business.is_match(&text),
        has_team: team.is_match(&text),
        has_capital: capital.is_match(&text),
        has_experience: experience.is_match(&text),
        seeking_growth: growth.is_match(&text),
    }
}
