use faqbot_core::config::{validate_min_similarity, RetrievalSettings};
use faqbot_core::error::{Error, Result};
use faqbot_core::types::{QueryResult, RankedHit};

use crate::index::CorpusIndex;

/// Threshold and fallback size applied to a ranked list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    pub min_similarity: f32,
    pub suggestion_count: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::from(&RetrievalSettings::default())
    }
}

impl From<&RetrievalSettings> for MatchPolicy {
    fn from(settings: &RetrievalSettings) -> Self {
        Self { min_similarity: settings.min_similarity, suggestion_count: settings.suggestion_count }
    }
}

impl MatchPolicy {
    /// Same policy with a per-query threshold.
    pub fn with_min_similarity(self, min_similarity: f32) -> Result<Self> {
        validate_min_similarity(min_similarity)?;
        Ok(Self { min_similarity, ..self })
    }
}

/// Turns a ranked list into an answer or a suggestion list.
///
/// The threshold is inclusive. Suggestions are question texts in ranked
/// order, at most `suggestion_count` of them.
pub fn decide(ranked: &[RankedHit], index: &CorpusIndex, policy: &MatchPolicy) -> Result<QueryResult> {
    let top = ranked.first().ok_or_else(Error::corpus_not_loaded)?;
    let lookup = |hit: &RankedHit| {
        index.get(hit.index).ok_or_else(|| {
            Error::Configuration(format!("ranked entry {} is outside the corpus of {}", hit.index, index.len()))
        })
    };

    if top.score >= policy.min_similarity {
        let entry = lookup(top)?;
        return Ok(QueryResult::Matched {
            answer: entry.answer.clone(),
            matched_question: entry.question.clone(),
            score: top.score,
        });
    }

    let suggestions = ranked
        .iter()
        .take(policy.suggestion_count)
        .map(|hit| lookup(hit).map(|entry| entry.question.clone()))
        .collect::<Result<Vec<_>>>()?;
    Ok(QueryResult::Unmatched { score: top.score, suggestions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqbot_core::traits::Embedder;
    use faqbot_core::types::FaqPair;

    struct Unit;

    impl Embedder for Unit {
        fn model_id(&self) -> &str { "unit" }
        fn dim(&self) -> usize { 1 }
        fn max_len(&self) -> usize { 1 }
        fn embed_text(&self, _text: &str) -> anyhow::Result<Vec<f32>> { Ok(vec![1.0]) }
    }

    fn corpus(n: usize) -> CorpusIndex {
        let pairs: Vec<FaqPair> = (0..n).map(|i| FaqPair::new(format!("Q{i}?"), format!("A{i}"))).collect();
        CorpusIndex::build(&pairs, &Unit).unwrap()
    }

    fn hits(scores: &[(usize, f32)]) -> Vec<RankedHit> {
        scores.iter().map(|&(index, score)| RankedHit { index, score }).collect()
    }

    #[test]
    fn top_score_at_threshold_matches() {
        let index = corpus(3);
        let policy = MatchPolicy { min_similarity: 0.5, suggestion_count: 3 };
        let result = decide(&hits(&[(2, 0.5), (0, 0.4), (1, 0.1)]), &index, &policy).unwrap();
        assert_eq!(
            result,
            QueryResult::Matched { answer: "A2".into(), matched_question: "Q2?".into(), score: 0.5 }
        );
    }

    #[test]
    fn below_threshold_suggests_top_questions_in_rank_order() {
        let index = corpus(5);
        let policy = MatchPolicy::default();
        let result = decide(&hits(&[(3, 0.49), (1, 0.3), (4, 0.2), (0, 0.1), (2, 0.0)]), &index, &policy).unwrap();
        assert_eq!(
            result,
            QueryResult::Unmatched { score: 0.49, suggestions: vec!["Q3?".into(), "Q1?".into(), "Q4?".into()] }
        );
    }

    #[test]
    fn small_corpus_returns_fewer_suggestions() {
        let index = corpus(2);
        let result = decide(&hits(&[(1, 0.2), (0, 0.1)]), &index, &MatchPolicy::default()).unwrap();
        match result {
            QueryResult::Unmatched { suggestions, .. } => assert_eq!(suggestions, vec!["Q1?", "Q0?"]),
            other => panic!("expected Unmatched, got {other:?}"),
        }
    }

    #[test]
    fn empty_ranking_is_a_configuration_error() {
        let index = corpus(0);
        let err = decide(&[], &index, &MatchPolicy::default()).unwrap_err();
        assert!(err.is_configuration(), "got {err:?}");
        assert!(err.to_string().contains("corpus not loaded"));
    }

    #[test]
    fn out_of_range_hit_is_a_configuration_error() {
        let index = corpus(1);
        let err = decide(&hits(&[(7, 0.9)]), &index, &MatchPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
    }

    #[test]
    fn per_query_threshold_is_validated() {
        let policy = MatchPolicy::default().with_min_similarity(0.8).unwrap();
        assert!((policy.min_similarity - 0.8).abs() < f32::EPSILON);
        assert_eq!(policy.suggestion_count, 3);
        assert!(MatchPolicy::default().with_min_similarity(2.0).is_err());
    }
}
