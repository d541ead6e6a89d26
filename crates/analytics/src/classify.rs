// In crates/analytics/src/classify.rs

//! Keyword tables used to classify free-text emotion, mistake and note
//! labels. Matching is a case-insensitive substring test.

/// A named list of keywords matched as lower-case substrings.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl KeywordTable {
    pub const fn new(name: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { name, keywords }
    }

    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k))
    }

    /// Like `matches`, for optional labels. `None` never matches.
    pub fn matches_opt(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| self.matches(t))
    }
}

/// Emotions counted toward the emotional bias index.
pub const BIAS_NEGATIVE: KeywordTable = KeywordTable::new(
    "bias_negative",
    &["fear", "greed", "fomo", "anxiety", "revenge", "frustration"],
);

/// Emotions scored +1 in the emotion/performance correlation.
pub const POSITIVE_EMOTIONS: KeywordTable = KeywordTable::new(
    "positive",
    &["focused", "calm", "confident", "disciplined", "patient"],
);

/// Mistake tags that cost emotional-control points.
pub const EMOTIONAL_MISTAKES: KeywordTable =
    KeywordTable::new("emotional_mistakes", &["fomo", "revenge", "greed", "fear"]);

/// Pre-trade emotions that mark a trade as emotionally driven.
pub const EMOTIONAL_TRADING: KeywordTable = KeywordTable::new(
    "emotional_trading",
    &["fear", "greed", "fomo", "revenge", "angry", "anxious"],
);

/// Pre-trade emotions behind late FOMO entries.
pub const FOMO: KeywordTable = KeywordTable::new("fomo", &["fomo", "fear"]);

/// Post-trade emotion that signals a winner was cut early.
pub const RELIEF: KeywordTable = KeywordTable::new("relief", &["relief"]);

/// Note phrases showing the trader argued against their own idea.
pub const CONTRARIAN_CHECK: KeywordTable =
    KeywordTable::new("contrarian_check", &["why wrong", "opposite view"]);

/// +1 for a positive emotion, -1 for anything else.
pub fn emotion_polarity(emotion: &str) -> f64 {
    if POSITIVE_EMOTIONS.matches(emotion) { 1.0 } else { -1.0 }
}

/// Upper-cases the first character of a label.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert!(BIAS_NEGATIVE.matches("Fear of loss"));
        assert!(BIAS_NEGATIVE.matches("FOMO"));
        assert!(!BIAS_NEGATIVE.matches("calm"));
        assert!(!FOMO.matches_opt(None));
        assert!(CONTRARIAN_CHECK.matches("Checked the opposite view first"));
    }

    #[test]
    fn polarity_defaults_to_negative() {
        assert_eq!(emotion_polarity("Calm and focused"), 1.0);
        assert_eq!(emotion_polarity("bored"), -1.0);
    }

    #[test]
    fn capitalizes_labels() {
        assert_eq!(capitalize("confident"), "Confident");
        assert_eq!(capitalize(""), "");
    }
}
