use crate::cleanup::normalizer::canonicalize;
use crate::core::model::{AssembledLine, Line};
use crate::script::ScriptProfile;

/// Orders a line's words left to right and produces its text and mean bbox.
///
/// The profile's rewrites run on the raw text first, so OCR stand-ins such as
/// `|` for the danda or `:` for the visarga survive the allow-list. Text is
/// then scrubbed with the mixed allow-list (script, Latin, digits,
/// whitespace, punctuation) and whitespace runs collapse to one space.
/// Returns `None` only for a line without members.
pub fn assemble_line(line: &Line<'_>, profile: &ScriptProfile) -> Option<AssembledLine> {
    let bbox = line.bbox()?;

    let mut members = line.members.clone();
    members.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));

    let raw = members
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let scrubbed: String = canonicalize(&raw, profile)
        .chars()
        .filter(|&c| profile.allows(c, true))
        .collect();
    let text = scrubbed.split_whitespace().collect::<Vec<_>>().join(" ");

    Some(AssembledLine { text, bbox })
}
