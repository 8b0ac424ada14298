use std::sync::LazyLock;

use regex::Regex;

use super::ANALYSIS_SENTINEL;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```\s*json").unwrap());

const FENCE: &str = "```";

/// One step of isolating the analysis payload from an assistant turn.
///
/// A stage only transforms the text when its predicate holds, otherwise
/// the text passes through unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Keeps the text after the first sentinel. Later sentinels are
    /// ordinary text.
    AfterSentinel,
    /// Removes Markdown code fences, with or without a `json` tag, and
    /// trims the result.
    StripFences,
    /// Keeps the span from the first `{` through the last `}`.
    ///
    /// The capture is greedy: unrelated braces after the real object are
    /// captured too, and the resulting candidate fails to parse.
    BraceSpan,
}

impl Stage {
    /// The stages in the order they run.
    pub const PIPELINE: [Stage; 3] =
        [Stage::AfterSentinel, Stage::StripFences, Stage::BraceSpan];

    /// Returns `true` if this stage transforms `text`.
    pub fn applies(&self, text: &str) -> bool {
        match self {
            Stage::AfterSentinel => text.contains(ANALYSIS_SENTINEL),
            Stage::StripFences => true,
            Stage::BraceSpan => brace_span(text).is_some(),
        }
    }

    /// Transforms `text`. Callers check [`Stage::applies`] first.
    pub fn transform(&self, text: &str) -> String {
        match self {
            Stage::AfterSentinel => text
                .split_once(ANALYSIS_SENTINEL)
                .map(|(_, rest)| rest)
                .unwrap_or(text)
                .to_owned(),
            Stage::StripFences => JSON_FENCE
                .replace_all(text, "")
                .replace(FENCE, "")
                .trim()
                .to_owned(),
            Stage::BraceSpan => {
                brace_span(text).unwrap_or(text).to_owned()
            }
        }
    }
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Returns `true` if `text` may carry an analysis at all.
#[inline]
pub(crate) fn is_candidate(text: &str) -> bool {
    text.contains(ANALYSIS_SENTINEL) || text.contains('{')
}

/// Runs [`Stage::PIPELINE`] over one assistant turn and returns the text
/// to be parsed as the analysis object.
pub fn isolate_payload(text: &str) -> String {
    Stage::PIPELINE
        .iter()
        .fold(text.to_owned(), |text, stage| {
            if stage.applies(&text) {
                stage.transform(&text)
            } else {
                text
            }
        })
}
