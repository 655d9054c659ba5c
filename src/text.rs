//! Text normalization shared by deduplication, scoring and the quality gate.
//!
//! Normalized text is a sequence of lowercase tokens: maximal runs of Unicode
//! letters or digits, with punctuation acting as a separator and the
//! [`STOP_WORDS`](crate::tables::STOP_WORDS) removed.

use crate::tables::STOP_WORDS;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("valid token regex"));

static STOP_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Tokenize, lowercase and drop stop words.
///
/// Empty or whitespace-only input yields an empty vector.
///
/// ```ignore
/// assert_eq!(normalize("The U.S. and China!"), vec!["u", "s", "china"]);
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|tok| !STOP_SET.contains(tok))
        .map(str::to_string)
        .collect()
}

/// Normalized tokens as a set, for overlap comparisons.
pub fn token_set(text: &str) -> HashSet<String> {
    normalize(text).into_iter().collect()
}

/// Count occurrences of `phrase` as a contiguous run inside `tokens`.
///
/// An empty phrase never matches.
pub fn count_phrase(tokens: &[String], phrase: &[String]) -> usize {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return 0;
    }
    tokens.windows(phrase.len()).filter(|w| **w == *phrase).count()
}

/// A token and the plural spellings it should also match. Tokens shorter
/// than three characters ("us", "un") match only themselves.
fn plural_forms(token: &str) -> Vec<String> {
    let mut forms = vec![token.to_string()];
    if token.chars().count() >= 3 {
        forms.push(format!("{token}s"));
        if ["s", "x", "z", "ch", "sh"].iter().any(|end| token.ends_with(end)) {
            forms.push(format!("{token}es"));
        }
    }
    forms
}

/// Pre-normalized view of a text, built once per article and reused for
/// every keyword lookup.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    tokens: Vec<String>,
    counts: HashMap<String, usize>,
}

impl TokenIndex {
    pub fn new(text: &str) -> Self {
        let tokens = normalize(text);
        let mut counts = HashMap::new();
        for tok in &tokens {
            *counts.entry(tok.clone()).or_insert(0) += 1;
        }
        Self { tokens, counts }
    }

    /// Occurrences of `keyword`, which may span several tokens. The last
    /// token also matches its plural ("tariff" counts "tariffs").
    pub fn count(&self, keyword: &str) -> usize {
        let phrase = normalize(keyword);
        let Some((last, head)) = phrase.split_last() else {
            return 0;
        };
        if head.is_empty() {
            return plural_forms(last)
                .iter()
                .map(|form| self.counts.get(form).copied().unwrap_or(0))
                .sum();
        }
        plural_forms(last)
            .into_iter()
            .map(|form| {
                let mut spelled = head.to_vec();
                spelled.push(form);
                count_phrase(&self.tokens, &spelled)
            })
            .sum()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.count(keyword) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_punctuation_and_stop_words() {
        assert_eq!(
            normalize("The Fed, and the ECB: rates on hold!"),
            toks(&["fed", "ecb", "rates", "hold"])
        );
    }

    #[test]
    fn test_normalize_empty_and_whitespace() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \t\n ").is_empty());
        assert!(normalize("--- !!! ...").is_empty());
    }

    #[test]
    fn test_normalize_keeps_digits_and_unicode_letters() {
        assert_eq!(normalize("GDP grew 3.2% in Việt Nam"), toks(&["gdp", "grew", "3", "2", "việt", "nam"]));
    }

    #[test]
    fn test_token_set_deduplicates() {
        let set = token_set("Trade trade TRADE war");
        assert_eq!(set.len(), 2);
        assert!(set.contains("trade"));
        assert!(set.contains("war"));
    }

    #[test]
    fn test_count_phrase() {
        let tokens = toks(&["southeast", "asia", "and", "southeast", "asia"]);
        assert_eq!(count_phrase(&tokens, &toks(&["southeast", "asia"])), 2);
        assert_eq!(count_phrase(&tokens, &toks(&["asia", "southeast"])), 0);
        assert_eq!(count_phrase(&tokens, &[]), 0);
        assert_eq!(count_phrase(&toks(&["asia"]), &toks(&["southeast", "asia"])), 0);
    }

    #[test]
    fn test_token_index_whole_word_matching() {
        let idx = TokenIndex::new("Because of the industry, they told us about the US economy.");
        assert_eq!(idx.count("US"), 2);
        assert_eq!(idx.count("economy"), 1);
        assert!(!idx.contains("trust"));
    }

    #[test]
    fn test_token_index_plurals() {
        let idx = TokenIndex::new("New tariffs and taxes; one tariff. It uses us.");
        assert_eq!(idx.count("tariff"), 2);
        assert_eq!(idx.count("tax"), 1);
        assert_eq!(idx.count("us"), 1);
        assert_eq!(idx.count("interest rate"), 0);
    }

    #[test]
    fn test_token_index_multi_word_keyword() {
        let idx = TokenIndex::new("Markets watch the interest rate path; an interest-rate cut looms.");
        assert_eq!(idx.count("interest rate"), 2);
        assert_eq!(idx.count("the"), 0);

        let plural = TokenIndex::new("Central bank raises interest rates again");
        assert_eq!(plural.count("interest rate"), 1);
    }
}
