//! Prompt building.

use std::fmt::Write as _;

use crate::conversation::{ConversationTurn, Role};

/// The built-in advisor persona.
pub const DEFAULT_PERSONA: &str = include_str!("persona.txt");

const CONVERSATION_HEADER: &str = "\nConversation:\n";
const USER_LABEL: &str = "User";
const ADVISOR_LABEL: &str = "Advisor";

/// Flattens the persona, the visible history and the new message into one
/// prompt that ends where the advisor should start speaking.
///
/// Turns with a role other than user or assistant are skipped. Content is
/// rendered with [`display_text`](crate::conversation::display_text), so
/// missing content reads `undefined` and `null` reads `null`.
pub fn build_prompt(
    persona: &str,
    history: &[ConversationTurn],
    message: &str,
) -> String {
    let mut prompt = String::with_capacity(persona.len() + message.len() + 64);
    prompt.push_str(persona);
    prompt.push_str(CONVERSATION_HEADER);

    for turn in history {
        let label = match turn.role {
            Role::User => USER_LABEL,
            Role::Assistant => ADVISOR_LABEL,
            Role::Other => continue,
        };
        let content = turn.display_content();
        // Writing to a `String` never fails.
        let _ = writeln!(prompt, "{label}: {content}");
    }

    let _ = write!(prompt, "{USER_LABEL}: {message}\n{ADVISOR_LABEL}: ");
    prompt
}
