//! Conversational lead-qualification advisor.
//!
//! Chat turns accumulate a transcript in the session store; on a
//! qualification request the transcript is read once and fed through the
//! heuristic scorer and the product recommender to produce an immutable
//! lead profile. The only network call in the pipeline is the
//! language-model boundary behind [`LanguageModel`].

pub mod domain;
pub mod llm;
pub(crate) mod prompts;
pub mod recommend;
pub mod router;
pub(crate) mod scoring;
pub mod service;
pub mod session;

mod profile;

#[cfg(test)]
mod tests;

pub use domain::{
    BudgetRange, BusinessStage, ExperienceLevel, Language, Product, SessionId, Turn, TurnRole,
    Urgency,
};
pub use llm::{AnthropicModel, ChatReply, LanguageModel, LlmError};
pub use profile::{BusinessMetrics, LeadProfile, LeadProfileBuilder};
pub use recommend::{Recommendation, Recommender};
pub use router::advisor_router;
pub use scoring::{HeuristicAssessment, HeuristicScorer, ScoringConfig};
pub use service::{AdvisorService, AdvisorServiceError, ChatOutcome, ChatRequest, QualifyRequest};
pub use session::{Session, SessionError, SessionSnapshot, SessionStore};
