use std::cmp::Ordering;

use faqbot_core::types::RankedHit;

use crate::index::CorpusIndex;

/// Cosine similarity clamped to `[-1, 1]`.
///
/// Zero-magnitude vectors (and mismatched lengths) carry no signal and score `0.0`.
/// Sums run in `f64` so large finite components cannot overflow to `inf/inf`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let cos = dot / (norm_a * norm_b);
    if !cos.is_finite() {
        return 0.0;
    }
    cos.clamp(-1.0, 1.0) as f32
}

/// Scores every entry against `query` and orders them best first.
///
/// Equal scores keep corpus order, so identical queries always rank identically.
pub fn rank(query: &[f32], index: &CorpusIndex) -> Vec<RankedHit> {
    let mut hits: Vec<RankedHit> = index
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| RankedHit { index: i, score: cosine_similarity(query, &entry.embedding) })
        .collect();
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    hits
}
