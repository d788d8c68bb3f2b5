//! Text analysis shared by agent documents and user queries.
//!
//! The pipeline is fixed so that the vocabulary built from documents and the
//! terms extracted from queries always agree:
//! 1. [`normalize`]: NFKD, drop diacritics, lowercase, non-alphanumerics become
//!    single spaces
//! 2. split on whitespace, drop short tokens
//! 3. drop stop words (optional)
//! 4. light suffix stemming (optional)

use recommend_types::AnalyzerSettings;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Stems shorter than this are left unstemmed.
const MIN_STEM_LEN: usize = 3;

/// Suffix rewrites, tried in order. Only the first applicable rule fires.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ing", ""),
    ("ers", ""),
    ("er", ""),
    ("ed", ""),
];

/// Normalize text into lowercase alphanumeric words separated by single spaces.
///
/// Total and idempotent: every string (including "") has a normalized form,
/// and normalizing that form again returns it unchanged.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}

/// Converts raw text into the terms used for weighting.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    settings: AnalyzerSettings,
}

impl Analyzer {
    /// Create an analyzer with the given options.
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self { settings }
    }

    /// Options this analyzer was built with.
    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Normalize and tokenize text into terms.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        normalize(text)
            .split_whitespace()
            .filter(|t| t.chars().count() >= self.settings.min_token_len)
            .filter(|t| !(self.settings.remove_stop_words && is_stop_word(t)))
            .map(|t| {
                if self.settings.stem {
                    stem(t)
                } else {
                    t.to_string()
                }
            })
            .collect()
    }
}

/// Strip one common English suffix from a token.
///
/// Only all-ASCII lowercase tokens are touched; anything else is returned as is.
fn stem(token: &str) -> String {
    if !token.bytes().all(|b| b.is_ascii_lowercase()) {
        return token.to_string();
    }

    for (suffix, replacement) in SUFFIX_RULES {
        if let Some(base) = token.strip_suffix(suffix) {
            if base.len() < MIN_STEM_LEN {
                continue;
            }
            if replacement.is_empty() {
                return undouble(base).to_string();
            }
            return format!("{}{}", base, replacement);
        }
    }

    if let Some(base) = token.strip_suffix('s') {
        if base.len() >= MIN_STEM_LEN && !base.ends_with(['s', 'u', 'i']) {
            return base.to_string();
        }
    }

    token.to_string()
}

/// "debugg" -> "debug", "plann" -> "plan". Keeps "ll", "ss", "zz" and short stems.
fn undouble(base: &str) -> &str {
    let bytes = base.as_bytes();
    let n = bytes.len();
    if n > MIN_STEM_LEN
        && bytes[n - 1] == bytes[n - 2]
        && !matches!(bytes[n - 1], b'a' | b'e' | b'i' | b'o' | b'u' | b'l' | b's' | b'z')
    {
        &base[..n - 1]
    } else {
        base
    }
}

/// Check if a word is a stop word.
fn is_stop_word(word: &str) -> bool {
    const STOP_WORDS: &[&str] = &[
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "or", "that", "the", "to", "was", "were", "will", "with", "this",
        "they", "but", "have", "had", "what", "when", "where", "who", "which", "why", "how", "all",
        "each", "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor",
        "not", "only", "own", "same", "so", "than", "too", "very", "can", "just", "should", "now",
        "also", "been", "being", "do", "does", "did", "doing", "would", "could", "might", "must",
        "shall", "about", "above", "after", "again", "against", "am", "any", "before", "below",
        "between", "into", "through", "during", "out", "over", "under", "up", "down", "then",
        "once", "here", "there", "if", "else", "while", "because", "until", "we", "you", "your",
        "our", "their", "him", "her", "them", "me", "my", "myself", "itself", "those", "these",
        "his", "i", "she", "us", "yours", "please",
    ];

    STOP_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::default()
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("  multiple   spaces\tand\nlines "), "multiple spaces and lines");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Café Crème Brûlée"), "cafe creme brulee");
        assert_eq!(normalize("naïve résumé"), "naive resume");
    }

    #[test]
    fn test_normalize_splits_on_punctuation() {
        assert_eq!(normalize("code-review/debugging"), "code review debugging");
        assert_eq!(normalize("snake_case"), "snake case");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "Coding Helper: assists with code review & debugging!",
            "Ünïcödé ÄÖÜ straße ﬁne Ⅻ",
            "MiXeD   CaSe\t\ttabs",
            "",
            "   ",
            "東京 タワー 123",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_analyze_basic() {
        assert_eq!(analyzer().analyze("Rust Systems"), vec!["rust", "system"]);
    }

    #[test]
    fn test_analyze_removes_stop_words() {
        let tokens = analyzer().analyze("the quick brown fox");
        assert!(!tokens.contains(&"the".to_string()));
        assert!(tokens.contains(&"quick".to_string()));
        assert!(tokens.contains(&"brown".to_string()));
        assert!(tokens.contains(&"fox".to_string()));
    }

    #[test]
    fn test_analyze_removes_single_chars() {
        assert_eq!(analyzer().analyze("x b c rust"), vec!["rust"]);
    }

    #[test]
    fn test_analyze_keeps_numbers() {
        assert_eq!(analyzer().analyze("python 3 and python 312"), vec!["python", "python", "312"]);
    }

    #[test]
    fn test_analyze_without_stop_words_or_stemming() {
        let analyzer = Analyzer::new(AnalyzerSettings {
            remove_stop_words: false,
            stem: false,
            min_token_len: 1,
        });
        assert_eq!(
            analyzer.analyze("help me debug a function"),
            vec!["help", "me", "debug", "a", "function"]
        );
    }

    #[test]
    fn test_analyze_query_and_document_meet() {
        let doc = analyzer().analyze("Coding Helper assists with code review and debugging");
        let query = analyzer().analyze("help me debug a function");
        assert!(doc.contains(&"help".to_string()));
        assert!(doc.contains(&"debug".to_string()));
        assert_eq!(query, vec!["help", "debug", "function"]);
    }

    #[test]
    fn test_stem_rules() {
        assert_eq!(stem("debugging"), "debug");
        assert_eq!(stem("helper"), "help");
        assert_eq!(stem("helpers"), "help");
        assert_eq!(stem("helps"), "help");
        assert_eq!(stem("planner"), "plan");
        assert_eq!(stem("planned"), "plan");
        assert_eq!(stem("itineraries"), "itinerary");
        assert_eq!(stem("trips"), "trip");
        assert_eq!(stem("installing"), "install");
    }

    #[test]
    fn test_stem_leaves_short_and_protected_words() {
        assert_eq!(stem("user"), "user");
        assert_eq!(stem("need"), "need");
        assert_eq!(stem("class"), "class");
        assert_eq!(stem("status"), "status");
        assert_eq!(stem("analysis"), "analysis");
        assert_eq!(stem("added"), "add");
        assert_eq!(stem("ties"), "tie");
    }

    #[test]
    fn test_stem_ignores_non_ascii() {
        assert_eq!(stem("größer"), "größer");
        assert_eq!(stem("2nd"), "2nd");
    }

    #[test]
    fn test_is_stop_word() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("and"));
        assert!(is_stop_word("me"));
        assert!(!is_stop_word("rust"));
        assert!(!is_stop_word("help"));
    }
}
