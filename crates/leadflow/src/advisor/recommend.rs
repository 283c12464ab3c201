//! Product recommendation over the language-model completion endpoint.
//!
//! The upstream reply format is not contractually guaranteed, so parsing
//! is tolerant and every failure mode collapses into a usable default
//! recommendation. Nothing here propagates an error to the caller.

use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{Product, Turn};
use super::llm::LanguageModel;
use super::prompts;

/// Output-token budget for the recommendation call.
const RECOMMENDATION_MAX_TOKENS: u32 = 200;

/// Confidence reported when the reply carried a product but no confidence.
const DEFAULT_CONFIDENCE: u8 = 70;

/// Confidence reported when the call or the parse failed outright.
const FAILURE_CONFIDENCE: u8 = 50;

/// Product suggestion derived from one completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: Product,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Recommendation {
    fn fallback(raw_reply: Option<String>, error: String) -> Self {
        Self {
            product: Product::Fintech,
            confidence: FAILURE_CONFIDENCE,
            raw_reply,
            error: Some(error),
        }
    }
}

/// Recommender bound to a model endpoint.
pub struct Recommender<M> {
    model: Arc<M>,
}

impl<M> Recommender<M>
where
    M: LanguageModel,
{
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    /// Ask the model for a product suggestion. Transport and parse
    /// failures are absorbed into the fallback recommendation.
    pub async fn recommend(&self, turns: &[Turn]) -> Recommendation {
        let prompt = prompts::recommendation_prompt(turns);

        let reply = match self.model.complete(&prompt, RECOMMENDATION_MAX_TOKENS).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "recommendation call failed, using fallback product");
                return Recommendation::fallback(None, err.to_string());
            }
        };

        match parse_recommendation(&reply) {
            Some((product, confidence)) => Recommendation {
                product,
                confidence,
                raw_reply: Some(reply),
                error: None,
            },
            None => {
                warn!("recommendation reply carried no PRODUCT line, using fallback product");
                Recommendation::fallback(
                    Some(reply),
                    "reply carried no PRODUCT line".to_string(),
                )
            }
        }
    }
}

fn product_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)PRODUCT:\s*(\w+)").expect("product pattern compiles"))
}

fn confidence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)CONFIDENCE:\s*(\d+)").expect("confidence pattern compiles"))
}

/// Tolerant extraction of the `PRODUCT:`/`CONFIDENCE:` lines.
///
/// Returns `None` when no `PRODUCT:` line is present at all; an
/// unrecognized product tag degrades to fintech, a missing confidence
/// to 70, and out-of-range confidences clamp to 100.
pub(crate) fn parse_recommendation(reply: &str) -> Option<(Product, u8)> {
    let tag = product_pattern().captures(reply)?;
    let product = Product::from_tag(&tag[1]).unwrap_or(Product::Fintech);

    let confidence = confidence_pattern()
        .captures(reply)
        .and_then(|capture| capture[1].parse::<u64>().ok())
        .map(|value| value.min(100) as u8)
        .unwrap_or(DEFAULT_CONFIDENCE);

    Some((product, confidence))
}
