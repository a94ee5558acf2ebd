use indicatif::{ProgressBar, ProgressStyle};

use faqbot_core::error::{Error, Result};
use faqbot_core::normalize::normalize;
use faqbot_core::traits::Embedder;
use faqbot_core::types::{FaqEntry, FaqPair};

/// Read-only FAQ entries with precomputed question embeddings.
///
/// Entry order is the load order; it doubles as display order and as the
/// tie-break order when scores are equal.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    entries: Vec<FaqEntry>,
    dim: usize,
    model_id: String,
}

impl CorpusIndex {
    pub fn build(pairs: &[FaqPair], embedder: &dyn Embedder) -> Result<Self> {
        Self::build_with_progress(pairs, embedder, &ProgressBar::hidden())
    }

    pub fn build_with_progress(pairs: &[FaqPair], embedder: &dyn Embedder, pb: &ProgressBar) -> Result<Self> {
        let dim = embedder.dim();
        if pairs.is_empty() {
            tracing::warn!("building an empty corpus index; every query will fail");
            return Ok(Self { entries: Vec::new(), dim, model_id: embedder.model_id().to_string() });
        }

        pb.set_length(pairs.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} questions {msg}") {
            pb.set_style(style.progress_chars("#>-"));
        }

        let mut entries = Vec::with_capacity(pairs.len());
        for (i, pair) in pairs.iter().enumerate() {
            let normalized_question = normalize(&pair.question);
            let embedding = embedder
                .embed_text(&normalized_question)
                .map_err(|e| Error::Embedding(format!("corpus entry {i}: {e:#}")))?;
            if embedding.len() != dim {
                return Err(Error::Configuration(format!(
                    "inconsistent embedding dimensionality: corpus entry {i} has {}, expected {dim}",
                    embedding.len()
                )));
            }
            check_finite(&embedding).map_err(|msg| Error::Embedding(format!("corpus entry {i}: {msg}")))?;
            entries.push(FaqEntry {
                question: pair.question.clone(),
                answer: pair.answer.clone(),
                normalized_question,
                embedding,
            });
            pb.inc(1);
        }
        pb.finish_and_clear();

        tracing::info!(entries = entries.len(), dim, model_id = embedder.model_id(), "corpus index built");
        Ok(Self { entries, dim, model_id: embedder.model_id().to_string() })
    }

    pub fn entries(&self) -> &[FaqEntry] { &self.entries }
    pub fn get(&self, index: usize) -> Option<&FaqEntry> { self.entries.get(index) }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn dim(&self) -> usize { self.dim }
    pub fn model_id(&self) -> &str { &self.model_id }
}

/// Non-empty and finite; shared by index construction and query validation.
pub(crate) fn check_finite(vector: &[f32]) -> std::result::Result<(), String> {
    if vector.is_empty() {
        return Err("embedding is empty".to_string());
    }
    if let Some(pos) = vector.iter().position(|x| !x.is_finite()) {
        return Err(format!("embedding has a non-finite value at position {pos}"));
    }
    Ok(())
}
