//! Term vocabulary: analyzed term -> dense column index.

use std::collections::HashMap;

/// Dense term index built from a corpus.
///
/// Indices are assigned in first-seen order, so the same corpus always yields
/// the same vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from analyzed documents.
    pub fn from_documents(documents: &[Vec<String>]) -> Self {
        let mut vocabulary = Self::new();
        for term in documents.iter().flatten() {
            vocabulary.insert(term);
        }
        vocabulary
    }

    /// Add a term if missing and return its index.
    pub fn insert(&mut self, term: &str) -> usize {
        if let Some(&idx) = self.index.get(term) {
            return idx;
        }
        let idx = self.terms.len();
        self.terms.push(term.to_string());
        self.index.insert(term.to_string(), idx);
        idx
    }

    /// Look up a term's index.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term text at an index.
    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get(idx).map(String::as_str)
    }

    /// Map terms to indices, dropping terms outside the vocabulary.
    pub fn project<'a>(&self, terms: impl IntoIterator<Item = &'a String>) -> Vec<usize> {
        terms.into_iter().filter_map(|t| self.get(t)).collect()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when no terms are known.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
