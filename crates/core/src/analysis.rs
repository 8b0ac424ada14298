//! Extraction of the structured color analysis from a conversation.
//!
//! The advisor announces a finished analysis by writing
//! [`ANALYSIS_SENTINEL`] followed by a JSON object. The extractor scans the
//! history backwards and returns the first assistant turn whose payload
//! parses; turns that fail to parse are skipped.

mod season;
mod stages;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::conversation::{
    ConversationTurn, Role, coerce_text, history_from_value, is_truthy,
};
use crate::error::AnalysisError;
pub use season::Season;
pub use stages::{Stage, isolate_payload};

/// The marker the model writes once it has enough information.
pub const ANALYSIS_SENTINEL: &str = "SZÍNANALÍZIS_KÉSZ";

const SEASON_KEY: &str = "season";
const PRIMARY_SEASON_KEY: &str = "primary_season";

/// A parsed analysis object.
///
/// Apart from `season`, the fields are whatever the model produced and
/// are passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

impl AnalysisResult {
    /// Returns the raw `season` label, if it is a string.
    #[inline]
    pub fn season_label(&self) -> Option<&str> {
        self.0.get(SEASON_KEY).and_then(Value::as_str)
    }

    /// Returns the season if the label names one of the four seasons.
    #[inline]
    pub fn season(&self) -> Option<Season> {
        self.season_label()?.parse().ok()
    }

    /// Returns a field of the analysis.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns all fields of the analysis.
    #[inline]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the analysis and returns its fields.
    #[inline]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<AnalysisResult> for Value {
    #[inline]
    fn from(result: AnalysisResult) -> Self {
        Value::Object(result.0)
    }
}

/// Parses an isolated payload.
///
/// Returns `None` unless the payload is a JSON object. A missing or falsy
/// `season` is filled from a truthy `primary_season`, lowercased.
pub fn parse_payload(payload: &str) -> Option<AnalysisResult> {
    let Value::Object(mut fields) = serde_json::from_str::<Value>(payload).ok()? else {
        return None;
    };

    let has_season = fields.get(SEASON_KEY).is_some_and(is_truthy);
    if !has_season {
        let primary = fields
            .get(PRIMARY_SEASON_KEY)
            .and_then(coerce_text);
        if let Some(primary) = primary {
            fields.insert(SEASON_KEY.to_owned(), primary.to_lowercase().into());
        }
    }

    Some(AnalysisResult(fields))
}

/// Finds the most recent assistant turn that carries an analysis.
pub fn extract_analysis(
    history: &[ConversationTurn],
) -> Result<AnalysisResult, AnalysisError> {
    history
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, turn)| turn.role == Role::Assistant)
        .filter_map(|(index, turn)| Some((index, turn.text()?)))
        .filter(|(_, text)| stages::is_candidate(text))
        .find_map(|(index, text)| {
            let result = parse_payload(&isolate_payload(&text));
            match &result {
                Some(_) => debug!("analysis extracted from turn {index}"),
                None => trace!("turn {index} does not parse, skipping"),
            }
            result
        })
        .ok_or(AnalysisError::NotFound)
}

/// Decodes a client-sent history and extracts the analysis from it.
///
/// The history must be an array; see
/// [`history_from_value`](crate::conversation::history_from_value) for how
/// its entries are decoded.
pub fn extract_analysis_from_value(
    history: &Value,
) -> Result<AnalysisResult, AnalysisError> {
    if !history.is_array() {
        return Err(AnalysisError::InvalidInput(
            "Invalid conversation history".to_owned(),
        ));
    }
    let history = history_from_value(history)?;
    extract_analysis(&history)
}
