use std::collections::{BTreeSet, HashMap};

/// Cosine similarity of two equal-length vectors, clamped to [0, 1].
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "vector dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Unigram + bigram term counts for one token list.
fn ngram_counts(tokens: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

/// TF-IDF cosine similarity between two preprocessed documents, vectorized
/// jointly over their combined unigram+bigram vocabulary. Smoothed IDF over
/// the two-document corpus, as a TF-IDF vectorizer with default smoothing
/// would produce.
pub fn document_similarity(a_tokens: &[String], b_tokens: &[String]) -> f64 {
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }

    let a_counts = ngram_counts(a_tokens);
    let b_counts = ngram_counts(b_tokens);

    // BTreeSet keeps term order deterministic
    let vocabulary: BTreeSet<&str> = a_counts
        .keys()
        .chain(b_counts.keys())
        .map(String::as_str)
        .collect();

    let a_total: f64 = a_counts.values().sum::<usize>() as f64;
    let b_total: f64 = b_counts.values().sum::<usize>() as f64;

    let n_docs = 2.0;
    let mut a_vec = Vec::with_capacity(vocabulary.len());
    let mut b_vec = Vec::with_capacity(vocabulary.len());
    for term in &vocabulary {
        let a_count = a_counts.get(*term).copied().unwrap_or(0);
        let b_count = b_counts.get(*term).copied().unwrap_or(0);
        let df = (a_count > 0) as u32 + (b_count > 0) as u32;
        let idf = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;

        a_vec.push(a_count as f64 / a_total * idf);
        b_vec.push(b_count as f64 / b_total * idf);
    }

    cosine_similarity(&a_vec, &b_vec)
}
