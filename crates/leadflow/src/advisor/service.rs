//! Chat turn handling and lead qualification, composed over the session
//! store, the heuristic scorer, and the language-model seam.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{ExperienceLevel, Language, SessionId, Turn};
use super::llm::{LanguageModel, LlmError};
use super::profile::{LeadProfile, LeadProfileBuilder};
use super::prompts;
use super::scoring::HeuristicScorer;
use super::session::{SessionError, SessionSnapshot, SessionStore};

/// Inbound chat turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Result of a successful chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub session_id: SessionId,
    pub response: String,
    pub model: String,
}

/// Qualification request for an accumulated conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct QualifyRequest {
    pub session_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
}

/// Error raised by the advisor service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorServiceError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("session not found")]
    SessionNotFound,
    #[error(transparent)]
    Model(#[from] LlmError),
}

impl From<SessionError> for AdvisorServiceError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::NotFound => Self::SessionNotFound,
        }
    }
}

/// Service facade for the chat wizard and the qualification pipeline.
pub struct AdvisorService<M> {
    model: Arc<M>,
    sessions: Arc<SessionStore>,
    scorer: Arc<HeuristicScorer>,
    profiles: LeadProfileBuilder<M>,
}

impl<M> AdvisorService<M>
where
    M: LanguageModel,
{
    pub fn new(model: Arc<M>, sessions: Arc<SessionStore>, scorer: HeuristicScorer) -> Self {
        let scorer = Arc::new(scorer);
        let profiles = LeadProfileBuilder::new(scorer.clone(), model.clone());
        Self {
            model,
            sessions,
            scorer,
            profiles,
        }
    }

    /// Run one chat turn: resolve the session, send the history plus the
    /// new user message under the language-specific system prompt, and
    /// persist both turns only once the reply arrived. A model failure
    /// leaves the stored transcript untouched.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatOutcome, AdvisorServiceError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AdvisorServiceError::EmptyMessage);
        }

        let language = request.language.as_deref().map(Language::from_code);
        let session = self
            .sessions
            .get_or_create(request.session_id.as_deref(), language);

        let user_turn = Turn::user(message);
        let mut outgoing = session.turns.clone();
        outgoing.push(user_turn.clone());

        let system = prompts::system_prompt(session.language);
        let reply = self.model.chat(system, &outgoing).await?;

        self.sessions
            .record_exchange(&session.id, user_turn, Turn::assistant(&reply.text))?;

        debug!(
            session = %session.id,
            language = %session.language,
            input_tokens = reply.input_tokens,
            output_tokens = reply.output_tokens,
            "chat turn completed"
        );

        Ok(ChatOutcome {
            session_id: session.id,
            response: reply.text,
            model: reply.model,
        })
    }

    /// Build the immutable lead profile for a session's transcript. The
    /// heuristics run locally; the recommender performs the single
    /// network call and absorbs its own failures.
    pub async fn qualify(
        &self,
        request: QualifyRequest,
    ) -> Result<LeadProfile, AdvisorServiceError> {
        let session = self
            .sessions
            .get(&request.session_id)
            .ok_or(AdvisorServiceError::SessionNotFound)?;

        let profile = self
            .profiles
            .build(
                &session.turns,
                &request.email,
                &request.name,
                session.language,
                request.experience,
            )
            .await;

        info!(
            session = %session.id,
            readiness = profile.readiness_score,
            stage = profile.stage.label(),
            product = profile.recommended_product.tag(),
            quality = profile.quality_score,
            "lead qualified"
        );

        Ok(profile)
    }

    /// Metadata view for the session-status endpoint.
    pub fn session(&self, id: &str) -> Result<SessionSnapshot, AdvisorServiceError> {
        self.sessions
            .snapshot(id)
            .ok_or(AdvisorServiceError::SessionNotFound)
    }

    /// Drop a session. Deleting an unknown identifier is a no-op.
    pub fn delete_session(&self, id: &str) {
        self.sessions.delete(id);
    }

    pub fn scorer(&self) -> &HeuristicScorer {
        &self.scorer
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }
}
