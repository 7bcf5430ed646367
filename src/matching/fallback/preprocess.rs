use std::collections::HashSet;
use std::sync::LazyLock;

use crate::vocabulary::canonical_for;

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "or", "but", "if", "then", "else", "of", "to", "in", "on", "at",
        "for", "from", "by", "about", "as", "into", "through", "during", "before",
        "after", "above", "below", "up", "down", "out", "over", "under", "again", "further",
        "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "doing", "will", "would", "should", "could", "can", "may", "might",
        "must", "shall", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we",
        "they", "them", "his", "her", "its", "our", "your", "their", "what", "which", "who",
        "whom", "where", "when", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
        "too", "very", "just", "also",
    ]
    .into_iter()
    .collect()
});

/// Connective words kept despite being stopwords elsewhere: they carry
/// signal in bigrams like "experience with python".
const PROTECTED_CONNECTIVES: &[&str] = &["with", "and"];

/// Light suffix-stripping lemmatizer. Good enough to collapse inflections
/// ("developed"/"developing" -> "develop", "technologies" -> "technology")
/// without a dictionary. Vocabulary tokens never reach this; they are
/// canonicalized first.
fn lemmatize(token: &str) -> String {
    if let Some(stem) = token.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = token.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if let Some(stem) = token.strip_suffix("ing") {
        if stem.len() >= 4 {
            return stem.to_string();
        }
    }
    if let Some(stem) = token.strip_suffix("ed") {
        if stem.len() >= 4 {
            return stem.to_string();
        }
    }
    if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") && !token.ends_with("us")
    {
        return token[..token.len() - 1].to_string();
    }

    token.to_string()
}

/// Lowercase, strip non-alphanumerics except hyphen and dot, canonicalize
/// vocabulary terms, drop stopwords (except the protected allow-list),
/// lemmatize the rest. Empty input yields an empty list.
pub fn preprocess(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(|token| token.trim_matches(|c| c == '.' || c == '-'))
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            if let Some(canonical) = canonical_for(token) {
                Some(canonical.to_string())
            } else if PROTECTED_CONNECTIVES.contains(&token) {
                Some(token.to_string())
            } else if STOPWORDS.contains(token) {
                None
            } else {
                Some(lemmatize(token))
            }
        })
        .collect()
}
