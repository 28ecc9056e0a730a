//! Content filter for outgoing chat text.
//!
//! Advisory only: matching is by whole token against a static wordlist, so
//! false negatives and false positives are accepted. This is not a security
//! boundary.

use std::collections::HashSet;

/// Words rejected by the default filter.
const DEFAULT_WORDLIST: &[&str] = &[
    "arse", "ass", "asshole", "bastard", "bitch", "bollocks", "bullshit", "crap", "cunt", "damn",
    "dick", "fuck", "fucker", "fucking", "piss", "prick", "shit", "slut", "twat", "wanker",
    "whore",
];

/// Wordlist-based profanity check.
pub struct WordFilter {
    words: HashSet<String>,
}

impl WordFilter {
    /// Build a filter over the default wordlist.
    pub fn new() -> Self {
        Self::with_words(DEFAULT_WORDLIST.iter().copied())
    }

    /// Build a filter over a custom wordlist.
    pub fn with_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Whether `text` contains a filtered word.
    ///
    /// Tokens are compared case-insensitively on non-alphanumeric
    /// boundaries, so "class" does not trip on "ass".
    pub fn is_profane(&self, text: &str) -> bool {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| !token.is_empty() && self.words.contains(token))
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes() {
        let filter = WordFilter::new();

        assert!(!filter.is_profane("hello everyone, nice to meet you"));
    }

    #[test]
    fn test_filtered_word_is_detected() {
        let filter = WordFilter::new();

        assert!(filter.is_profane("well damn"));
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let filter = WordFilter::new();

        assert!(filter.is_profane("DAMN it"));
    }

    #[test]
    fn test_filtered_word_surrounded_by_punctuation_is_detected() {
        let filter = WordFilter::new();

        assert!(filter.is_profane("oh, damn!"));
    }

    #[test]
    fn test_embedded_substring_does_not_trip_the_filter() {
        // "class" contains "ass" but is a single clean token
        let filter = WordFilter::new();

        assert!(!filter.is_profane("a classic brass instrument"));
    }

    #[test]
    fn test_custom_wordlist_is_honored() {
        let filter = WordFilter::with_words(["banana"]);

        assert!(filter.is_profane("no BANANA talk here"));
        assert!(!filter.is_profane("well damn"));
    }

    #[test]
    fn test_empty_text_is_clean() {
        let filter = WordFilter::new();

        assert!(!filter.is_profane(""));
    }
}
