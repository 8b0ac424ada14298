use color_advisor_model::{
    ErrorKind, ModelCompletion, ModelFinishReason, ModelRequest,
};
use serde::{Deserialize, Serialize};

use crate::Error;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct Part {
    text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &ModelRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: req.prompt.clone(),
            }],
        }],
    }
}

fn finish_reason(reason: &str) -> ModelFinishReason {
    match reason {
        "STOP" => ModelFinishReason::Stop,
        "MAX_TOKENS" => ModelFinishReason::Length,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT"
        | "SPII" => ModelFinishReason::ContentFilter,
        _ => ModelFinishReason::Other,
    }
}

/// Joins the text parts of the first candidate.
pub fn into_completion(
    resp: GenerateContentResponse,
) -> Result<ModelCompletion, Error> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let block_reason = resp
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);
        return Err(match block_reason {
            Some(reason) => Error::new(
                format!("prompt was blocked: {reason}"),
                ErrorKind::Moderated,
            ),
            None => Error::new("response has no candidates", ErrorKind::Other),
        });
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    let finish_reason = candidate.finish_reason.as_deref().map(finish_reason);

    if text.is_empty() && finish_reason == Some(ModelFinishReason::ContentFilter)
    {
        return Err(Error::new(
            "response was blocked by safety settings",
            ErrorKind::Moderated,
        ));
    }

    Ok(ModelCompletion {
        text,
        finish_reason,
    })
}

/// Picks a readable message out of an error response body.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(body) => body.error.message,
        Err(_) => format!("HTTP {status}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use color_advisor_model::ModelProviderError;
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_request() {
        let request = ModelRequest::new("User: Hi\nAdvisor: ");
        assert_eq!(
            serde_json::to_value(create_request(&request)).unwrap(),
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": "User: Hi\nAdvisor: " }]
                }]
            })
        );
    }

    #[test]
    fn test_joins_text_parts() {
        let resp = parse(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Warm undertones. " }, { "text": "Let's talk hair." }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 42 }
        }));
        let completion = into_completion(resp).unwrap();
        assert_eq!(completion.text, "Warm undertones. Let's talk hair.");
        assert_eq!(completion.finish_reason, Some(ModelFinishReason::Stop));
    }

    #[test]
    fn test_blocked_prompt() {
        let resp = parse(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }));
        let err = into_completion(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Moderated);
        assert!(err.message().contains("SAFETY"));
    }

    #[test]
    fn test_blocked_candidate() {
        let resp = parse(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }));
        let err = into_completion(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Moderated);
    }

    #[test]
    fn test_no_candidates() {
        let err = into_completion(parse(json!({}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"code":503,"message":"The model is overloaded. Please try again later.","status":"UNAVAILABLE"}}"#;
        assert_eq!(
            error_message(503, body),
            "The model is overloaded. Please try again later."
        );
        assert_eq!(error_message(500, "oops"), "HTTP 500: oops");
    }
}
