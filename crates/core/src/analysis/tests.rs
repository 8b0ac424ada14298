use serde_json::{Value, json};

use super::*;

fn analysis_turn(payload: &str) -> ConversationTurn {
    ConversationTurn::assistant(format!(
        "Your colors are ready!\n{ANALYSIS_SENTINEL}\n{payload}"
    ))
}

#[test]
fn test_most_recent_match_wins() {
    let history = vec![
        ConversationTurn::user("I have red hair."),
        analysis_turn(r#"{"season": "autumn"}"#),
        ConversationTurn::user("Can you check again?"),
        ConversationTurn::assistant(format!(
            "blah {ANALYSIS_SENTINEL} {{\"season\":\"spring\"}}"
        )),
        ConversationTurn::user("Thanks!"),
        ConversationTurn::assistant("You are welcome."),
    ];

    let result = extract_analysis(&history).unwrap();
    assert_eq!(result.season(), Some(Season::Spring));
}

#[test]
fn test_malformed_candidate_is_skipped() {
    let history = vec![
        analysis_turn(r#"{"season": "winter", "undertone": "cool"}"#),
        analysis_turn(r#"{"season": "summer", "#),
    ];

    let result = extract_analysis(&history).unwrap();
    assert_eq!(result.season(), Some(Season::Winter));
    assert_eq!(result.get("undertone"), Some(&json!("cool")));
}

#[test]
fn test_primary_season_is_normalized() {
    let history = vec![analysis_turn(r#"{"primary_season": "Autumn"}"#)];

    let result = extract_analysis(&history).unwrap();
    assert_eq!(result.season_label(), Some("autumn"));
    assert_eq!(result.get("primary_season"), Some(&json!("Autumn")));

    let result = parse_payload(r#"{"primary_season": ["Autumn"]}"#).unwrap();
    assert_eq!(result.season_label(), Some("autumn"));
    assert_eq!(result.as_map().len(), 2);

    let result = parse_payload(r#"{"season": "", "primary_season": "WINTER"}"#)
        .unwrap();
    assert_eq!(result.season(), Some(Season::Winter));

    let result =
        parse_payload(r#"{"season": "summer", "primary_season": "Autumn"}"#)
            .unwrap();
    assert_eq!(result.season(), Some(Season::Summer));
}

#[test]
fn test_no_assistant_turns() {
    let history = vec![
        ConversationTurn::user(format!("{ANALYSIS_SENTINEL} {{\"season\":\"spring\"}}")),
        ConversationTurn {
            role: Role::Other,
            content: Some(json!(r#"{"season":"spring"}"#)),
        },
    ];
    assert_eq!(extract_analysis(&history), Err(AnalysisError::NotFound));
    assert_eq!(extract_analysis(&[]), Err(AnalysisError::NotFound));
}

#[test]
fn test_fenced_payload() {
    let fenced = extract_analysis(&[analysis_turn(
        "```json\n{\"season\": \"summer\", \"best_colors\": [\"lavender\"]}\n```",
    )])
    .unwrap();
    let plain = extract_analysis(&[analysis_turn(
        "{\"season\": \"summer\", \"best_colors\": [\"lavender\"]}",
    )])
    .unwrap();
    assert_eq!(fenced, plain);
}

#[test]
fn test_payload_without_sentinel() {
    let history = vec![ConversationTurn::assistant(
        r#"Result: {"season": "winter"} enjoy"#,
    )];
    assert_eq!(
        extract_analysis(&history).unwrap().season(),
        Some(Season::Winter)
    );
}

#[test]
fn test_non_object_payload_is_skipped() {
    let history = vec![
        analysis_turn(r#"{"season": "spring"}"#),
        ConversationTurn::assistant(format!("{ANALYSIS_SENTINEL} 42")),
    ];
    assert_eq!(
        extract_analysis(&history).unwrap().season(),
        Some(Season::Spring)
    );
    assert!(parse_payload("[1, 2]").is_none());
}

#[test]
fn test_greedy_braces_over_capture() {
    // Braces after the object are captured too, so this turn is skipped.
    let history = vec![
        analysis_turn(r#"{"season": "autumn"}"#),
        analysis_turn(r#"{"season": "winter"} and {curly} notes"#),
    ];
    assert_eq!(
        extract_analysis(&history).unwrap().season(),
        Some(Season::Autumn)
    );
}

#[test]
fn test_unknown_season_is_kept() {
    let result = parse_payload(r#"{"season": "monsoon"}"#).unwrap();
    assert_eq!(result.season_label(), Some("monsoon"));
    assert_eq!(result.season(), None);
}

#[test]
fn test_extract_from_value() {
    let history = json!([
        null,
        { "role": "user", "content": "Hi" },
        { "role": "assistant", "content": ["{\"season\":\"spring\"}"] },
        "garbage",
    ]);
    let result = extract_analysis_from_value(&history).unwrap();
    assert_eq!(Value::from(result), json!({ "season": "spring" }));

    let history = json!([
        { "role": "assistant", "content": { "season": "winter" } },
    ]);
    assert_eq!(
        extract_analysis_from_value(&history),
        Err(AnalysisError::NotFound)
    );

    let err = extract_analysis_from_value(&json!({ "role": "assistant" }))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidInput(_)));
    assert!(extract_analysis_from_value(&Value::Null).is_err());
}

#[test]
fn test_into_map_keeps_model_fields() {
    let result =
        parse_payload(r#"{"season": "summer", "best_colors": ["lavender"]}"#)
            .unwrap();
    let fields = result.clone().into_map();
    assert_eq!(&fields, result.as_map());
    assert_eq!(fields.get("best_colors"), Some(&json!(["lavender"])));
}
