use std::sync::Arc;

use indicatif::ProgressBar;

use faqbot_core::config::Settings;
use faqbot_core::error::{Error, Result};
use faqbot_core::traits::Embedder;
use faqbot_core::types::FaqPair;

use crate::index::CorpusIndex;
use crate::service::QueryService;

/// Process-wide state: settings, the one embedder instance, the index it
/// built and the query service over both.
pub struct AppContext {
    settings: Settings,
    embedder: Arc<dyn Embedder>,
    index: Arc<CorpusIndex>,
    service: QueryService,
}

impl AppContext {
    pub fn initialize(settings: Settings, corpus: &[FaqPair], embedder: Arc<dyn Embedder>) -> Result<Self> {
        Self::initialize_with_progress(settings, corpus, embedder, &ProgressBar::hidden())
    }

    /// Validates settings, indexes the corpus and wires the service, failing at the first bad stage.
    pub fn initialize_with_progress(
        settings: Settings,
        corpus: &[FaqPair],
        embedder: Arc<dyn Embedder>,
        pb: &ProgressBar,
    ) -> Result<Self> {
        settings.validate()?;
        if corpus.is_empty() {
            return Err(Error::Configuration("FAQ corpus is empty".to_string()));
        }
        let index = Arc::new(CorpusIndex::build_with_progress(corpus, embedder.as_ref(), pb)?);
        let service = QueryService::from_settings(Arc::clone(&index), Arc::clone(&embedder), &settings)?;
        Ok(Self { settings, embedder, index, service })
    }

    pub fn settings(&self) -> &Settings { &self.settings }
    pub fn embedder(&self) -> &dyn Embedder { self.embedder.as_ref() }
    pub fn index(&self) -> &CorpusIndex { &self.index }
    pub fn service(&self) -> &QueryService { &self.service }
}
