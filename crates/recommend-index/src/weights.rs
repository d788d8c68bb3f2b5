//! TF-IDF term weighting over sparse vectors.
//!
//! Rows are L2-normalized at construction, so cosine similarity between a row
//! and a normalized query is a plain dot product.

use std::collections::BTreeMap;

/// Smoothed inverse document frequency: ln((1 + N) / (1 + df)) + 1.
///
/// Stays finite and positive when a term appears in every document.
pub fn smoothed_idf(doc_count: usize, doc_frequency: usize) -> f32 {
    let n = doc_count as f32;
    let df = doc_frequency as f32;
    ((1.0 + n) / (1.0 + df)).ln() + 1.0
}

/// Sparse vector of (term index, weight), sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Weight term counts by idf and normalize to unit length.
    ///
    /// `terms` may repeat; repetitions are the term frequency.
    pub fn weighted(terms: &[usize], idf: &[f32]) -> Self {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for &term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }

        let entries = counts
            .into_iter()
            .filter_map(|(term, tf)| idf.get(term).map(|w| (term, tf as f32 * w)))
            .collect();

        let mut vector = Self { entries };
        vector.normalize();
        vector
    }

    /// Scale to unit length in place. Zero vectors stay zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= norm;
            }
        }
    }

    /// Euclidean length.
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Non-zero entries.
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    /// True when the vector has no non-zero entries.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Term-weight matrix: one normalized row per document plus the corpus idf.
#[derive(Debug, Clone, Default)]
pub struct TermWeightMatrix {
    idf: Vec<f32>,
    rows: Vec<SparseVector>,
}

impl TermWeightMatrix {
    /// Fit idf over the corpus and weight each document.
    ///
    /// `documents` hold vocabulary indices in `0..vocabulary_size`.
    pub fn fit(documents: &[Vec<usize>], vocabulary_size: usize) -> Self {
        let mut doc_frequencies = vec![0usize; vocabulary_size];
        for doc in documents {
            let mut seen = vec![false; vocabulary_size];
            for &term in doc {
                if term < vocabulary_size && !seen[term] {
                    seen[term] = true;
                    doc_frequencies[term] += 1;
                }
            }
        }

        let doc_count = documents.len();
        let idf: Vec<f32> = doc_frequencies
            .iter()
            .map(|&df| smoothed_idf(doc_count, df))
            .collect();

        let rows = documents
            .iter()
            .map(|doc| SparseVector::weighted(doc, &idf))
            .collect();

        Self { idf, rows }
    }

    /// Weight and normalize a query with the trained idf.
    pub fn project(&self, terms: &[usize]) -> SparseVector {
        SparseVector::weighted(terms, &self.idf)
    }

    /// Cosine similarity of a normalized query against every row, in row order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f32> {
        self.rows
            .iter()
            .map(|row| row.dot(query).clamp(0.0, 1.0))
            .collect()
    }

    /// Row for a document.
    pub fn row(&self, idx: usize) -> Option<&SparseVector> {
        self.rows.get(idx)
    }

    /// Idf for a term.
    pub fn idf(&self, term: usize) -> Option<f32> {
        self.idf.get(term).copied()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
