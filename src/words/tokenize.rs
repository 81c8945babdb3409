// Abstract tokenization: whitespace split, case fold, drop stop words and
// single-character tokens.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// A fixed set of words never counted.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// English stop words from the stop-words crate.
    pub fn english() -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        Self::from_words(words)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Normalize raw abstract text into counted tokens.
///
/// Punctuation stays attached to words; single characters (usually stray
/// punctuation) are dropped.
pub fn process_words(text: &str, stop_words: &StopWords) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .map(str::to_lowercase)
        .filter(|word| !stop_words.contains(word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_words() {
        let stop = StopWords::from_words(["the", "of", "and"]);
        let words = process_words("The amplitude of the P300 and ( memory )", &stop);
        assert_eq!(words, vec!["amplitude", "p300", "memory"]);
    }

    #[test]
    fn test_stop_words_matched_after_case_fold() {
        let stop = StopWords::from_words(["The"]);
        assert!(process_words("THE the The", &stop).is_empty());
    }

    #[test]
    fn test_english_list_has_common_words() {
        let stop = StopWords::english();
        assert!(stop.contains("the"));
        assert!(stop.contains("and"));
        assert!(!stop.contains("memory"));
    }
}
