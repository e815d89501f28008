use crate::core::config::{ReflowConfig, ScriptMode};
use crate::script::ScriptProfile;

/// Strips non-target content and OCR artifacts from composed text.
#[derive(Debug, Clone, Copy)]
pub struct ScriptCleaner<'p> {
    profile: &'p ScriptProfile,
    mode: ScriptMode,
    short_line_merge_length: usize,
}

impl<'p> ScriptCleaner<'p> {
    pub fn new(profile: &'p ScriptProfile, mode: ScriptMode, short_line_merge_length: usize) -> Self {
        Self {
            profile,
            mode,
            short_line_merge_length,
        }
    }

    pub fn from_config(profile: &'p ScriptProfile, config: &ReflowConfig) -> Self {
        Self::new(profile, config.script_mode, config.short_line_merge_length)
    }

    pub fn clean(&self, text: &str) -> String {
        let keep_latin = self.mode == ScriptMode::Mixed;
        let filtered: String = text
            .chars()
            .filter(|&c| keep_latin || !c.is_ascii_alphanumeric())
            .filter(|&c| self.profile.allows(c, keep_latin))
            .collect();

        let filtered = match self.mode {
            ScriptMode::ScriptOnly => self.drop_dangling_vowel_signs(&filtered),
            ScriptMode::Mixed => filtered,
        };

        let spaced = self.fix_punctuation_spacing(&filtered);
        let collapsed = collapse_spaces(&spaced);

        let lines: Vec<&str> = collapsed
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        merge_fragments(&lines, self.short_line_merge_length).join("\n")
    }

    /// Removes vowel signs that do not directly follow a consonant.
    ///
    /// A nukta between the consonant and the sign is allowed. Each sign is
    /// judged against the unmodified input, so in a run of signs after one
    /// consonant only the first survives.
    pub fn drop_dangling_vowel_signs(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        for (i, &c) in chars.iter().enumerate() {
            if self.profile.is_vowel_sign(c) && !self.follows_consonant(&chars[..i]) {
                continue;
            }
            out.push(c);
        }
        out
    }

    fn follows_consonant(&self, before: &[char]) -> bool {
        match before {
            [.., prev] if self.profile.is_consonant(*prev) => true,
            [.., base, mark] => {
                Some(*mark) == self.profile.nukta && self.profile.is_consonant(*base)
            }
            _ => false,
        }
    }

    /// Drops whitespace before tight marks and guarantees one space after a
    /// sentence mark that is followed by other text on the same line.
    pub fn fix_punctuation_spacing(&self, text: &str) -> String {
        let mut tight = String::with_capacity(text.len());
        for c in text.chars() {
            if self.profile.is_tight_punctuation(c) {
                while tight.ends_with(char::is_whitespace) {
                    tight.pop();
                }
            }
            tight.push(c);
        }

        let mut out = String::with_capacity(tight.len() + 8);
        let mut chars = tight.chars().peekable();
        while let Some(c) = chars.next() {
            out.push(c);
            if self.profile.is_sentence_mark(c) {
                if let Some(&next) = chars.peek() {
                    if next != ' ' && next != '\n' {
                        out.push(' ');
                    }
                }
            }
        }
        out
    }
}

fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ' ' && out.ends_with(' ') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Appends every line after the first that is shorter than `min_len` chars
/// to the previous output line.
///
/// OCR engines often split one sentence across boxes; short trailing pieces
/// are almost always such fragments.
pub fn merge_fragments(lines: &[&str], min_len: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged.last_mut() {
            Some(prev) if line.chars().count() < min_len => {
                prev.push(' ');
                prev.push_str(line);
            }
            _ => merged.push((*line).to_string()),
        }
    }
    merged
}
