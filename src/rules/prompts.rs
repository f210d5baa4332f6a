//! Prompt rendering.

use std::fmt::Write;

use crate::core::PromptTemplates;

const WORD: &str = "{word}";

/// Word handout sent once at game start.
#[must_use]
pub fn render_word_delivery(templates: &PromptTemplates, word: &str) -> String {
    templates.word_delivery.replace(WORD, word)
}

/// Per-round description request.
#[must_use]
pub fn render_description(templates: &PromptTemplates, word: &str) -> String {
    templates.description.replace(WORD, word)
}

/// Ballot listing every alive participant by 1-based position.
///
/// `entries` are `(display name, latest description)` in alive order.
///
/// ```
/// use undercover::core::PromptTemplates;
/// use undercover::rules::render_ballot;
///
/// let ballot = render_ballot(&PromptTemplates::default(), &[("Ann", "sweet"), ("Bo", "crunchy")]);
/// assert!(ballot.ends_with("1. Ann: sweet\n2. Bo: crunchy\n"));
/// ```
#[must_use]
pub fn render_ballot<N, D>(templates: &PromptTemplates, entries: &[(N, D)]) -> String
where
    N: AsRef<str>,
    D: AsRef<str>,
{
    let mut out = String::with_capacity(templates.ballot_header.len() + entries.len() * 64);
    out.push_str(&templates.ballot_header);
    out.push('\n');
    for (i, (name, description)) in entries.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}. {}: {}", i + 1, name.as_ref(), description.as_ref());
    }
    out
}
