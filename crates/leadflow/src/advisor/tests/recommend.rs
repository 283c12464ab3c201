use std::sync::Arc;

use super::common::{user_turns, ScriptedModel};
use crate::advisor::domain::Product;
use crate::advisor::recommend::{parse_recommendation, Recommender};

#[test]
fn parses_product_and_confidence() {
    let reply = "PRODUCT: healthcare\nREASON: matches the stated interests\nCONFIDENCE: 88";

    assert_eq!(parse_recommendation(reply), Some((Product::Healthcare, 88)));
}

#[test]
fn field_labels_are_case_insensitive() {
    let reply = "product: Cosmetics\nconfidence: 42";

    assert_eq!(parse_recommendation(reply), Some((Product::Cosmetics, 42)));
}

#[test]
fn unknown_product_degrades_to_fintech() {
    let reply = "PRODUCT: gastronomy\nCONFIDENCE: 40";

    assert_eq!(parse_recommendation(reply), Some((Product::Fintech, 40)));
}

#[test]
fn missing_confidence_defaults_to_seventy() {
    let reply = "PRODUCT: fintech\nREASON: steady interest in finance";

    assert_eq!(parse_recommendation(reply), Some((Product::Fintech, 70)));
}

#[test]
fn oversized_confidence_clamps_to_one_hundred() {
    let reply = "PRODUCT: cosmetics\nCONFIDENCE: 250";

    assert_eq!(parse_recommendation(reply), Some((Product::Cosmetics, 100)));
}

#[test]
fn reply_without_a_product_line_does_not_parse() {
    assert_eq!(parse_recommendation("I would suggest the cosmetics package."), None);
}

#[tokio::test]
async fn well_formed_reply_becomes_a_recommendation() {
    let model = Arc::new(ScriptedModel::with_replies(&[Ok(
        "PRODUCT: cosmetics\nREASON: beauty retail background\nCONFIDENCE: 91",
    )]));
    let recommender = Recommender::new(model);

    let recommendation = recommender
        .recommend(&user_turns(&["I ran a beauty shop for years"]))
        .await;

    assert_eq!(recommendation.product, Product::Cosmetics);
    assert_eq!(recommendation.confidence, 91);
    assert!(recommendation.raw_reply.is_some());
    assert!(recommendation.error.is_none());
}

#[tokio::test]
async fn transport_failure_falls_back_to_fintech() {
    let model = Arc::new(ScriptedModel::with_replies(&[Err(())]));
    let recommender = Recommender::new(model);

    let recommendation = recommender.recommend(&user_turns(&["hello"])).await;

    assert_eq!(recommendation.product, Product::Fintech);
    assert_eq!(recommendation.confidence, 50);
    assert!(recommendation.raw_reply.is_none());
    assert!(recommendation.error.is_some());
}

#[tokio::test]
async fn unparseable_reply_keeps_the_raw_text() {
    let model = Arc::new(ScriptedModel::with_replies(&[Ok(
        "Hard to say without more detail.",
    )]));
    let recommender = Recommender::new(model);

    let recommendation = recommender.recommend(&user_turns(&["hello"])).await;

    assert_eq!(recommendation.product, Product::Fintech);
    assert_eq!(recommendation.confidence, 50);
    assert_eq!(
        recommendation.raw_reply.as_deref(),
        Some("Hard to say without more detail.")
    );
    assert!(recommendation.error.is_some());
}
