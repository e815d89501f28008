use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::script::ScriptProfile;

/// Canonicalizes and re-tokenizes text one line at a time.
///
/// The output has exactly as many `\n`-separated lines as the input.
pub fn normalize_text(text: &str, profile: &ScriptProfile) -> String {
    text.split('\n')
        .map(|line| normalize_line(line, profile))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Canonical form of one line: NFC, the profile's rewrites, then word
/// tokens joined by single spaces.
pub fn normalize_line(line: &str, profile: &ScriptProfile) -> String {
    let canonical = canonicalize(line, profile);
    tokenize(&canonical).join(" ")
}

pub fn canonicalize(text: &str, profile: &ScriptProfile) -> String {
    let mut out: String = text.nfc().collect();
    for &(from, to) in profile.replacements {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    profile.correct_visarga(&out)
}

/// Splits on Unicode word boundaries (UAX #29).
///
/// Combining marks stay on their base letter and punctuation such as the
/// danda becomes its own token; whitespace is dropped.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_word_bounds()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}
