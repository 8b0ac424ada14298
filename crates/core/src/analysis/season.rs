use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A color season.
///
/// Parsed case-sensitively from its lowercase English label.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Season {
    /// Warm and light.
    Spring,
    /// Cool and soft.
    Summer,
    /// Warm and deep.
    Autumn,
    /// Cool and clear.
    Winter,
}

impl Season {
    /// The localized name shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Spring => "Tavasz",
            Season::Summer => "Nyár",
            Season::Autumn => "Ősz",
            Season::Winter => "Tél",
        }
    }
}
