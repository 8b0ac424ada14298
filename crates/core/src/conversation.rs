//! Conversation-related types.
//!
//! The caller owns the conversation and resubmits it in full on every
//! request; nothing in this crate keeps or mutates history.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The author of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking for advice.
    User,
    /// The model, speaking as the color advisor.
    Assistant,
    /// Any role this crate does not know about. Such turns are ignored.
    #[serde(other)]
    Other,
}

impl Role {
    fn from_label(label: &str) -> Self {
        match label {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other,
        }
    }
}

/// One entry of a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who said it.
    pub role: Role,
    /// What was said, as sent by the client. `None` when absent.
    #[serde(default)]
    pub content: Option<Value>,
}

impl ConversationTurn {
    /// Creates a user turn.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::User,
            content: Some(Value::String(content.into())),
        }
    }

    /// Creates an assistant turn.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(Value::String(content.into())),
        }
    }

    /// Returns the content as text if it is truthy and renders to a
    /// non-empty string.
    #[inline]
    pub fn text(&self) -> Option<String> {
        self.content
            .as_ref()
            .and_then(coerce_text)
            .filter(|content| !content.is_empty())
    }

    /// Renders the content the way it appears in a prompt. Absent content
    /// renders as `undefined`.
    pub fn display_content(&self) -> String {
        self.content
            .as_ref()
            .map(display_text)
            .unwrap_or_else(|| "undefined".to_owned())
    }

    /// Decodes one history entry sent by a client.
    ///
    /// Returns `None` for entries that are not objects, which callers
    /// treat as absent turns. The content value is kept as sent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let role = object
            .get("role")
            .and_then(Value::as_str)
            .map(Role::from_label)
            .unwrap_or(Role::Other);
        let content = object.get("content").cloned();
        Some(Self { role, content })
    }
}

/// Returns `false` for `null`, `false`, `0` and `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a JSON value as text with script-style string conversion.
///
/// Strings are kept, arrays join their rendered items with `,` (`null`
/// items render empty), and objects render as `[object Object]`.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => display_text(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

fn number_text(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(n) if n.fract() == 0.0 && n.abs() < 1e21 => format!("{n:.0}"),
        Some(n) => n.to_string(),
        None => number.to_string(),
    }
}

/// Coerces a JSON value into text. Falsy values yield `None`, everything
/// else renders with [`display_text`].
pub fn coerce_text(value: &Value) -> Option<String> {
    is_truthy(value).then(|| display_text(value))
}

/// The error returned when a history payload is not a sequence.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("conversation history must be an array, got {0}")]
pub struct InvalidHistory(&'static str);

/// Decodes a history payload sent by a client.
///
/// `null` decodes to an empty history. Absent entries are dropped, which
/// leaves the relative order of the remaining turns intact.
pub fn history_from_value(
    value: &Value,
) -> Result<Vec<ConversationTurn>, InvalidHistory> {
    match value {
        Value::Null => Ok(vec![]),
        Value::Array(items) => {
            Ok(items.iter().filter_map(ConversationTurn::from_value).collect())
        }
        Value::Bool(_) => Err(InvalidHistory("a boolean")),
        Value::Number(_) => Err(InvalidHistory("a number")),
        Value::String(_) => Err(InvalidHistory("a string")),
        Value::Object(_) => Err(InvalidHistory("an object")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value() {
        let turn = ConversationTurn::from_value(
            &json!({ "role": "assistant", "content": "Hello" }),
        )
        .unwrap();
        assert_eq!(turn, ConversationTurn::assistant("Hello"));

        let turn =
            ConversationTurn::from_value(&json!({ "role": "system" })).unwrap();
        assert_eq!(turn.role, Role::Other);
        assert_eq!(turn.content, None);
        assert_eq!(turn.display_content(), "undefined");

        assert!(ConversationTurn::from_value(&Value::Null).is_none());
        assert!(ConversationTurn::from_value(&json!("user")).is_none());
    }

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text(&json!(42)), Some("42".to_owned()));
        assert_eq!(coerce_text(&json!(2.0)), Some("2".to_owned()));
        assert_eq!(coerce_text(&json!(1.5)), Some("1.5".to_owned()));
        assert_eq!(coerce_text(&json!(true)), Some("true".to_owned()));
        assert_eq!(coerce_text(&json!(0)), None);
        assert_eq!(coerce_text(&json!(false)), None);
        assert_eq!(coerce_text(&json!("")), None);
        assert_eq!(coerce_text(&Value::Null), None);
    }

    #[test]
    fn test_objects_and_arrays_render_like_script_strings() {
        assert_eq!(
            coerce_text(&json!({ "season": "winter" })),
            Some("[object Object]".to_owned())
        );
        assert_eq!(
            coerce_text(&json!(["{\"season\":\"spring\"}"])),
            Some(r#"{"season":"spring"}"#.to_owned())
        );
        assert_eq!(
            display_text(&json!(["a", null, 1, [true, "b"], {}])),
            "a,,1,true,b,[object Object]"
        );
        assert_eq!(coerce_text(&json!([])), Some(String::new()));
    }

    #[test]
    fn test_text_skips_falsy_and_empty_content() {
        let turn = |content: Value| ConversationTurn {
            role: Role::Assistant,
            content: Some(content),
        };
        assert_eq!(turn(json!("Hi")).text().as_deref(), Some("Hi"));
        assert_eq!(turn(json!(0)).text(), None);
        assert_eq!(turn(json!([])).text(), None);
        assert_eq!(turn(json!(0)).display_content(), "0");
        assert_eq!(turn(Value::Null).display_content(), "null");
    }

    #[test]
    fn test_history_from_value() {
        let history = history_from_value(&json!([
            { "role": "user", "content": "Hi" },
            null,
            { "role": "assistant", "content": "Hello" },
        ]))
        .unwrap();
        assert_eq!(
            history,
            vec![
                ConversationTurn::user("Hi"),
                ConversationTurn::assistant("Hello"),
            ]
        );

        assert!(history_from_value(&Value::Null).unwrap().is_empty());
        assert_eq!(
            history_from_value(&json!("nope")),
            Err(InvalidHistory("a string"))
        );
        assert!(history_from_value(&json!({ "role": "user" })).is_err());
    }

    #[test]
    fn test_unknown_role_deserializes() {
        let turn: ConversationTurn =
            serde_json::from_value(json!({ "role": "tool", "content": "x" }))
                .unwrap();
        assert_eq!(turn.role, Role::Other);
    }
}
