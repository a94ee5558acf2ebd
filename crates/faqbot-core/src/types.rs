//! Domain types shared by the index, the ranker and the front ends.

use serde::{Deserialize, Serialize};

/// One question/answer pair as supplied by a corpus source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPair {
    pub question: String,
    pub answer: String,
}

impl FaqPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

/// An indexed corpus entry.
///
/// - `question`/`answer`: original text, used for display
/// - `normalized_question`: the exact text that was embedded
/// - `embedding`: vector produced by the index's embedder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub normalized_question: String,
    pub embedding: Vec<f32>,
}

impl From<&FaqEntry> for FaqPair {
    fn from(entry: &FaqEntry) -> Self {
        Self::new(entry.question.clone(), entry.answer.clone())
    }
}

/// A corpus position and its similarity to the query. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    pub index: usize,
    pub score: f32,
}

/// Outcome of a query. A miss is a valid result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QueryResult {
    Matched {
        answer: String,
        matched_question: String,
        score: f32,
    },
    Unmatched {
        score: f32,
        suggestions: Vec<String>,
    },
}

impl QueryResult {
    /// Top similarity found, for either variant.
    pub fn score(&self) -> f32 {
        match self {
            Self::Matched { score, .. } | Self::Unmatched { score, .. } => *score,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}
