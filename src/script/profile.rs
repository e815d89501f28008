/// Character rules for one target script.
///
/// Cleanup and normalization only consult this table, so supporting another
/// script means adding another `ScriptProfile` constant.
#[derive(Debug, Clone, Copy)]
pub struct ScriptProfile {
    pub name: &'static str,
    /// Code point ranges that belong to the script (inclusive).
    pub ranges: &'static [(char, char)],
    pub consonants: &'static [(char, char)],
    /// Dependent vowel signs that must follow a consonant.
    pub vowel_signs: &'static [(char, char)],
    /// Combining mark that extends a consonant without ending it.
    pub nukta: Option<char>,
    pub sentence_marks: &'static [char],
    pub closing_quotes: &'static [char],
    /// Non-script punctuation kept by the allow-list.
    pub generic_punctuation: &'static [char],
    /// Marks that must not be preceded by whitespace.
    pub tight_punctuation: &'static [char],
    /// Ordered literal rewrites applied after NFC, both to raw line text
    /// before the allow-list and again during normalization.
    pub replacements: &'static [(&'static str, &'static str)],
    /// Replacement for an ASCII colon written right after a script letter.
    pub visarga: Option<char>,
}

pub const DEVANAGARI: ScriptProfile = ScriptProfile {
    name: "devanagari",
    ranges: &[('\u{0900}', '\u{097F}')],
    consonants: &[('\u{0915}', '\u{0939}'), ('\u{0958}', '\u{095F}')],
    vowel_signs: &[('\u{093E}', '\u{094C}')],
    nukta: Some('\u{093C}'),
    sentence_marks: &['।', '॥', '!', '?'],
    closing_quotes: &['"', '\''],
    generic_punctuation: &[',', '!', '?', '"', '\'', '-'],
    tight_punctuation: &['।', '॥', ',', '!', '?'],
    replacements: &[
        ("\u{200B}", ""),
        ("\u{200C}", ""),
        ("\u{200D}", ""),
        ("\u{FEFF}", ""),
        ("||", "॥"),
        ("|", "।"),
        ("।।", "॥"),
        // nukta letters that NFC composes
        ("\u{0929}", "\u{0928}\u{093C}"),
        ("\u{0931}", "\u{0930}\u{093C}"),
        ("\u{0934}", "\u{0933}\u{093C}"),
    ],
    visarga: Some('\u{0903}'),
};

fn in_ranges(ranges: &[(char, char)], c: char) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

impl ScriptProfile {
    pub fn in_script(&self, c: char) -> bool {
        in_ranges(self.ranges, c)
    }

    pub fn is_consonant(&self, c: char) -> bool {
        in_ranges(self.consonants, c)
    }

    pub fn is_vowel_sign(&self, c: char) -> bool {
        in_ranges(self.vowel_signs, c)
    }

    pub fn is_sentence_mark(&self, c: char) -> bool {
        self.sentence_marks.contains(&c)
    }

    pub fn is_tight_punctuation(&self, c: char) -> bool {
        self.tight_punctuation.contains(&c)
    }

    /// Whether `text` ends a sentence (mark or closing quote as last char).
    pub fn ends_sentence(&self, text: &str) -> bool {
        text.chars()
            .next_back()
            .map(|c| self.is_sentence_mark(c) || self.closing_quotes.contains(&c))
            .unwrap_or(false)
    }

    /// Allow-list shared by line assembly and both cleaning profiles.
    pub fn allows(&self, c: char, keep_latin: bool) -> bool {
        self.in_script(c)
            || c.is_whitespace()
            || (keep_latin && c.is_ascii_alphanumeric())
            || self.is_sentence_mark(c)
            || self.generic_punctuation.contains(&c)
    }

    /// Rewrites `:` to the visarga sign when it directly follows a script letter.
    pub fn correct_visarga(&self, text: &str) -> String {
        let Some(visarga) = self.visarga else {
            return text.to_string();
        };
        let mut out = String::with_capacity(text.len());
        let mut prev: Option<char> = None;
        for c in text.chars() {
            let fixed = match prev {
                Some(p) if c == ':' && self.in_script(p) => visarga,
                _ => c,
            };
            out.push(fixed);
            prev = Some(fixed);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_devanagari_letters() {
        let p = DEVANAGARI;
        assert!(p.in_script('क'));
        assert!(p.is_consonant('क'));
        assert!(p.is_consonant('\u{0958}'));
        assert!(!p.is_consonant('अ'));
        assert!(p.is_vowel_sign('ा'));
        assert!(p.is_vowel_sign('ौ'));
        assert!(!p.is_vowel_sign('्'));
        assert!(!p.in_script('a'));
    }

    #[test]
    fn allow_list_depends_on_latin_flag() {
        let p = DEVANAGARI;
        assert!(p.allows('a', true));
        assert!(!p.allows('a', false));
        assert!(p.allows('-', false));
        assert!(p.allows('।', false));
        assert!(!p.allows('@', true));
        assert!(!p.allows('(', true));
    }

    #[test]
    fn detects_sentence_endings() {
        let p = DEVANAGARI;
        assert!(p.ends_sentence("वह घर गया।"));
        assert!(p.ends_sentence("क्या?"));
        assert!(p.ends_sentence("\"उद्धरण\""));
        assert!(!p.ends_sentence("अधूरा वाक्य"));
        assert!(!p.ends_sentence(""));
    }

    #[test]
    fn corrects_colon_after_letter_only() {
        let p = DEVANAGARI;
        assert_eq!(p.correct_visarga("दु:ख"), "दुःख");
        assert_eq!(p.correct_visarga("समय: 5"), "समयः 5");
        assert_eq!(p.correct_visarga("a: b"), "a: b");
    }
}
