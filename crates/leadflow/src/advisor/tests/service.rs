use super::common::{build_service, ScriptedModel};
use crate::advisor::domain::{BudgetRange, BusinessStage, Language, Product, TurnRole, Urgency};
use crate::advisor::service::{AdvisorServiceError, ChatRequest, QualifyRequest};

fn chat_request(message: &str, session_id: Option<&str>, language: Option<&str>) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
        session_id: session_id.map(str::to_string),
        language: language.map(str::to_string),
    }
}

fn qualify_request(session_id: &str) -> QualifyRequest {
    QualifyRequest {
        session_id: session_id.to_string(),
        email: "lead@example.com".to_string(),
        name: "Dana".to_string(),
        experience: None,
    }
}

#[tokio::test]
async fn chat_turn_stores_both_messages() {
    let (service, sessions, model) =
        build_service(ScriptedModel::with_replies(&[Ok("Hello there!")]));

    let outcome = service
        .chat(chat_request("  Hi  ", None, Some("en")))
        .await
        .expect("chat succeeds");

    assert_eq!(outcome.response, "Hello there!");
    assert_eq!(outcome.model, "scripted-model");
    assert_eq!(model.calls(), 1);

    let session = sessions.get(&outcome.session_id.0).expect("session exists");
    assert_eq!(session.language, Language::En);
    assert_eq!(session.turns.len(), 2);
    assert_eq!(session.turns[0].role, TurnRole::User);
    assert_eq!(session.turns[0].content, "Hi");
    assert_eq!(session.turns[1].role, TurnRole::Assistant);
    assert_eq!(session.turns[1].content, "Hello there!");
}

#[tokio::test]
async fn blank_message_is_rejected_before_the_model_call() {
    let (service, _sessions, model) = build_service(ScriptedModel::new());

    let result = service.chat(chat_request("   ", None, None)).await;

    assert!(matches!(result, Err(AdvisorServiceError::EmptyMessage)));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn failed_turn_leaves_the_transcript_untouched() {
    let (service, sessions, _model) =
        build_service(ScriptedModel::with_replies(&[Ok("Welcome!"), Err(())]));

    let outcome = service
        .chat(chat_request("Hi", None, None))
        .await
        .expect("first turn succeeds");
    let session_id = outcome.session_id.0.clone();

    let result = service
        .chat(chat_request("And now?", Some(&session_id), None))
        .await;
    assert!(matches!(result, Err(AdvisorServiceError::Model(_))));

    let session = sessions.get(&session_id).expect("session exists");
    assert_eq!(session.turns.len(), 2);
    assert_eq!(session.turns[1].content, "Welcome!");
}

#[tokio::test]
async fn follow_up_turns_extend_the_same_session() {
    let (service, sessions, model) = build_service(ScriptedModel::new());

    let first = service
        .chat(chat_request("Hi", None, None))
        .await
        .expect("chat succeeds");
    let session_id = first.session_id.0.clone();

    service
        .chat(chat_request("Tell me more", Some(&session_id), None))
        .await
        .expect("chat succeeds");

    assert_eq!(model.calls(), 2);
    let session = sessions.get(&session_id).expect("session exists");
    assert_eq!(session.turns.len(), 4);
}

#[tokio::test]
async fn qualify_builds_the_full_profile() {
    let (service, _sessions, _model) = build_service(ScriptedModel::with_replies(&[
        Ok("Sure."),
        Ok("PRODUCT: healthcare\nREASON: stated interest\nCONFIDENCE: 88"),
    ]));

    let outcome = service
        .chat(chat_request(
            "I'm ready to launch and can invest $80,000",
            None,
            Some("en"),
        ))
        .await
        .expect("chat succeeds");

    let profile = service
        .qualify(qualify_request(&outcome.session_id.0))
        .await
        .expect("qualification succeeds");

    assert_eq!(profile.email, "lead@example.com");
    assert_eq!(profile.name, "Dana");
    assert_eq!(profile.language, Language::En);
    assert_eq!(profile.readiness_score, 34);
    assert_eq!(profile.stage, BusinessStage::Traction);
    assert_eq!(profile.urgency, Urgency::Medium);
    assert_eq!(profile.budget_range, Some(BudgetRange::single(80_000)));
    assert_eq!(profile.recommended_product, Product::Healthcare);
    assert_eq!(profile.product_confidence, 88);
    assert!(profile.recommendation_error.is_none());
    assert!(profile.pain_points.is_empty());
    assert_eq!(profile.conversation_length, 2);
    assert_eq!(profile.quality_score, 68);
}

#[tokio::test]
async fn qualify_survives_a_recommendation_outage() {
    let (service, _sessions, _model) =
        build_service(ScriptedModel::with_replies(&[Ok("Welcome!"), Err(())]));

    let outcome = service
        .chat(chat_request("Hi", None, None))
        .await
        .expect("chat succeeds");

    let profile = service
        .qualify(qualify_request(&outcome.session_id.0))
        .await
        .expect("qualification succeeds");

    assert_eq!(profile.recommended_product, Product::Fintech);
    assert_eq!(profile.product_confidence, 50);
    assert!(profile.recommendation_error.is_some());
}

#[tokio::test]
async fn qualify_requires_an_existing_session() {
    let (service, _sessions, _model) = build_service(ScriptedModel::new());

    let result = service.qualify(qualify_request("missing")).await;

    assert!(matches!(result, Err(AdvisorServiceError::SessionNotFound)));
}

#[tokio::test]
async fn session_snapshot_and_delete_round_trip() {
    let (service, _sessions, _model) = build_service(ScriptedModel::new());

    let outcome = service
        .chat(chat_request("Hi", None, None))
        .await
        .expect("chat succeeds");
    let session_id = outcome.session_id.0;

    let snapshot = service.session(&session_id).expect("session exists");
    assert_eq!(snapshot.message_count, 2);

    service.delete_session(&session_id);
    assert!(matches!(
        service.session(&session_id),
        Err(AdvisorServiceError::SessionNotFound)
    ));

    // Deleting again is a no-op.
    service.delete_session(&session_id);
}
