use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use faqbot_core::config::Settings;
use faqbot_core::error::{Error, Result};
use faqbot_core::normalize::normalize;
use faqbot_core::traits::Embedder;
use faqbot_core::types::QueryResult;

use crate::decide::{decide, MatchPolicy};
use crate::index::{check_finite, CorpusIndex};
use crate::rank::rank;

/// Single entry point for answering questions against a built index.
///
/// The index is shared read-only, so clones of the service can answer
/// concurrently. Only the embedding call can block; it runs on the blocking
/// pool, optionally behind one lock (`serialized`) and a timeout.
#[derive(Clone)]
pub struct QueryService {
    index: Arc<CorpusIndex>,
    embedder: Arc<dyn Embedder>,
    policy: MatchPolicy,
    timeout: Option<Duration>,
    gate: Option<Arc<Mutex<()>>>,
}

impl QueryService {
    /// Pairs an index with the embedder that built it.
    pub fn new(index: Arc<CorpusIndex>, embedder: Arc<dyn Embedder>, policy: MatchPolicy) -> Result<Self> {
        if index.model_id() != embedder.model_id() {
            return Err(Error::Configuration(format!(
                "corpus index was built by '{}' but queries would use '{}'",
                index.model_id(),
                embedder.model_id()
            )));
        }
        if index.dim() != embedder.dim() {
            return Err(Error::Configuration(format!(
                "corpus index has dimension {} but the embedder produces {}",
                index.dim(),
                embedder.dim()
            )));
        }
        Ok(Self { index, embedder, policy, timeout: None, gate: None })
    }

    pub fn from_settings(index: Arc<CorpusIndex>, embedder: Arc<dyn Embedder>, settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let service = Self::new(index, embedder, MatchPolicy::from(&settings.retrieval))?
            .with_timeout(settings.embedding.timeout());
        Ok(if settings.embedding.serialize_calls { service.serialized() } else { service })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Allows at most one embedding call at a time.
    pub fn serialized(mut self) -> Self {
        self.gate = Some(Arc::new(Mutex::new(())));
        self
    }

    pub fn index(&self) -> &CorpusIndex { &self.index }
    pub fn policy(&self) -> MatchPolicy { self.policy }

    pub async fn answer(&self, raw_query: &str) -> Result<QueryResult> {
        self.run(raw_query, self.policy).await
    }

    /// Like [`answer`](Self::answer) with a threshold for this query only.
    pub async fn answer_with(&self, raw_query: &str, min_similarity: f32) -> Result<QueryResult> {
        let policy = self.policy.with_min_similarity(min_similarity)?;
        self.run(raw_query, policy).await
    }

    async fn run(&self, raw_query: &str, policy: MatchPolicy) -> Result<QueryResult> {
        if self.index.is_empty() {
            return Err(Error::corpus_not_loaded());
        }
        let normalized = normalize(raw_query);
        let vector = self.embed(normalized.clone()).await?;
        if vector.len() != self.index.dim() {
            return Err(Error::Embedding(format!(
                "query embedding has dimension {} but the corpus index has {}",
                vector.len(),
                self.index.dim()
            )));
        }
        check_finite(&vector).map_err(Error::Embedding)?;

        let ranked = rank(&vector, &self.index);
        let result = decide(&ranked, &self.index, &policy)?;
        tracing::debug!(
            query = %normalized,
            score = result.score(),
            matched = result.is_matched(),
            min_similarity = policy.min_similarity,
            "query answered"
        );
        Ok(result)
    }

    async fn embed(&self, text: String) -> Result<Vec<f32>> {
        let embedder = Arc::clone(&self.embedder);
        let gate = self.gate.clone();
        let call = async move {
            let permit = match gate {
                Some(gate) => Some(gate.lock_owned().await),
                None => None,
            };
            // The permit moves into the blocking task so the lock is held
            // until the model call returns, even if the caller gave up.
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                embedder.embed_text(&text)
            })
            .await
        };

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                tracing::warn!(timeout_ms = limit.as_millis() as u64, "embedding call timed out");
                Error::EmbeddingTimeout(limit)
            })?,
            None => call.await,
        };
        joined
            .map_err(|e| Error::Embedding(format!("embedding task failed: {e}")))?
            .map_err(|e| Error::Embedding(format!("{e:#}")))
    }
}
