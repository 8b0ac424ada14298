use std::time::Duration;

use color_advisor_model::ErrorKind;
use color_advisor_test_model::{PresetResponse, TestModelProvider};
use tokio::time::Instant;

use crate::{
    ANALYSIS_SENTINEL, AdvisorBuilder, ChatError, ConversationTurn,
    RetryPolicy, Season,
};

#[tokio::test]
async fn test_chat_sends_persona_and_history() {
    let provider = TestModelProvider::default();
    provider.add_response(PresetResponse::with_text("What color are your eyes?"));

    let advisor = AdvisorBuilder::with_model_provider(provider.clone())
        .with_persona("You are a color analyst.")
        .build();
    let history = vec![
        ConversationTurn::user("Hi"),
        ConversationTurn::assistant("Hello! Tell me about your hair."),
    ];
    let reply = advisor.chat("It is red.", &history).await.unwrap();

    assert_eq!(reply.response, "What color are your eyes?");
    assert!(!reply.should_analyze);
    assert_eq!(
        provider.last_prompt().as_deref(),
        Some(
            "You are a color analyst.\nConversation:\n\
             User: Hi\n\
             Advisor: Hello! Tell me about your hair.\n\
             User: It is red.\nAdvisor: "
        )
    );
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let provider = TestModelProvider::default();
    let advisor = AdvisorBuilder::with_model_provider(provider.clone()).build();

    let err = advisor.chat("", &[]).await.unwrap_err();
    assert_eq!(err, ChatError::MessageRequired);
    assert_eq!(provider.attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_two_unavailable_replies_fail() {
    let provider = TestModelProvider::default();
    provider.add_response(PresetResponse::with_text("never").with_failures(0));

    let advisor = AdvisorBuilder::with_model_provider(provider.clone()).build();
    let err = advisor.chat("Hi", &[]).await.unwrap_err();

    assert!(matches!(
        err,
        ChatError::Failed {
            kind: ErrorKind::Unavailable,
            ..
        }
    ));
    assert_eq!(provider.attempts(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_one_unavailable_reply_is_retried() {
    let provider = TestModelProvider::default();
    provider.add_response(PresetResponse::with_text("Welcome!").with_failures(1));

    let advisor = AdvisorBuilder::with_model_provider(provider.clone()).build();
    let started = Instant::now();
    let reply = advisor.chat("Hi", &[]).await.unwrap();

    assert_eq!(reply.response, "Welcome!");
    assert_eq!(provider.attempts(), 2);
    assert!(started.elapsed() >= Duration::from_millis(800));
}

#[tokio::test]
async fn test_retry_policy_is_configurable() {
    let provider = TestModelProvider::default();
    provider.add_response(PresetResponse::with_text("never").with_failures(1));

    let advisor = AdvisorBuilder::with_model_provider(provider.clone())
        .with_retry_policy(RetryPolicy::none())
        .build();
    assert!(advisor.chat("Hi", &[]).await.is_err());
    assert_eq!(provider.attempts(), 1);
}

#[tokio::test]
async fn test_should_analyze_matches_exact_marker() {
    let provider = TestModelProvider::default();
    let replies = [
        (format!("Done!\n{ANALYSIS_SENTINEL}\n{{\"season\":\"winter\"}}"), true),
        ("Done! színanalízis_kész".to_owned(), false),
        ("Done! SZINANALIZIS_KESZ".to_owned(), false),
        (ANALYSIS_SENTINEL.to_owned(), true),
    ];
    for (text, _) in &replies {
        provider.add_response(PresetResponse::with_text(text.clone()));
    }

    let advisor = AdvisorBuilder::with_model_provider(provider).build();
    for (text, should_analyze) in replies {
        let reply = advisor.chat("Hi", &[]).await.unwrap();
        assert_eq!(reply.response, text);
        assert_eq!(reply.should_analyze, should_analyze, "{text}");
    }
}

#[tokio::test]
async fn test_chat_then_analyze() {
    let provider = TestModelProvider::default();
    provider.add_response(PresetResponse::with_text(format!(
        "You are a cool winter.\n{ANALYSIS_SENTINEL}\n\
         ```json\n{{\"season\": \"winter\", \"undertone\": \"cool\"}}\n```"
    )));

    let advisor = AdvisorBuilder::with_model_provider(provider).build();
    let mut history = vec![ConversationTurn::user("I have dark hair.")];
    let reply = advisor.chat("And grey eyes.", &history).await.unwrap();
    assert!(reply.should_analyze);

    history.push(ConversationTurn::user("And grey eyes."));
    history.push(ConversationTurn::assistant(reply.response));
    let result = advisor.analyze(&history).unwrap();
    assert_eq!(result.season(), Some(Season::Winter));
}

#[test]
fn test_chat_reply_serialization() {
    let reply = crate::ChatReply {
        response: "Hi".to_owned(),
        should_analyze: false,
    };
    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        serde_json::json!({ "response": "Hi", "shouldAnalyze": false })
    );
}
