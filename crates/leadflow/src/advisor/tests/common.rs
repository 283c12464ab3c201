use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::advisor::domain::Turn;
use crate::advisor::llm::{ChatReply, LanguageModel, LlmError};
use crate::advisor::scoring::{HeuristicScorer, ScoringConfig};
use crate::advisor::service::AdvisorService;
use crate::advisor::session::SessionStore;
use crate::config::SessionConfig;

pub(super) fn user_turns(contents: &[&str]) -> Vec<Turn> {
    contents.iter().map(|content| Turn::user(*content)).collect()
}

pub(super) fn dialogue(contents: &[&str]) -> Vec<Turn> {
    contents
        .iter()
        .enumerate()
        .map(|(index, content)| {
            if index % 2 == 0 {
                Turn::user(*content)
            } else {
                Turn::assistant(*content)
            }
        })
        .collect()
}

pub(super) fn scorer() -> HeuristicScorer {
    HeuristicScorer::new(ScoringConfig::default())
}

pub(super) fn session_config(capacity: usize, ttl: Duration) -> SessionConfig {
    SessionConfig { capacity, ttl }
}

pub(super) fn default_session_config() -> SessionConfig {
    session_config(64, Duration::from_secs(1800))
}

/// Model double replaying queued replies. An empty queue answers with a
/// canned reply so chat-heavy tests need not script every turn.
pub(super) struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ()>>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub(super) fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn with_replies(replies: &[Result<&str, ()>]) -> Self {
        let model = Self::new();
        {
            let mut queue = model.replies.lock().expect("script mutex poisoned");
            for reply in replies {
                queue.push_back(reply.map(|text| text.to_string()));
            }
        }
        model
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.replies.lock().expect("script mutex poisoned");
        match queue.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(())) => Err(LlmError::Api {
                status: 503,
                body: "scripted outage".to_string(),
            }),
            None => Ok("Scripted reply".to_string()),
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn chat(&self, _system: &str, _turns: &[Turn]) -> Result<ChatReply, LlmError> {
        let text = self.next_reply()?;
        Ok(ChatReply {
            text,
            model: self.model_name().to_string(),
            input_tokens: 12,
            output_tokens: 24,
        })
    }

    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, LlmError> {
        self.next_reply()
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

pub(super) fn build_service(
    model: ScriptedModel,
) -> (
    Arc<AdvisorService<ScriptedModel>>,
    Arc<SessionStore>,
    Arc<ScriptedModel>,
) {
    let model = Arc::new(model);
    let sessions = Arc::new(SessionStore::new(default_session_config()));
    let service = Arc::new(AdvisorService::new(
        model.clone(),
        sessions.clone(),
        scorer(),
    ));
    (service, sessions, model)
}
