use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use faqbot_core::config::{Config, Settings};
use faqbot_core::corpus;
use faqbot_core::types::FaqPair;
use faqbot_embed::get_default_embedder;
use faqbot_retrieval::AppContext;

/// Logs go to stderr so stdout carries only answers.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,faqbot=info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn load_settings() -> Result<Settings> {
    let config = Config::load().context("loading configuration")?;
    config.settings().context("validating configuration")
}

/// The configured corpus, without touching the embedding model.
pub fn load_faqs(settings: &Settings) -> Result<Vec<FaqPair>> {
    corpus::load(&settings.corpus).context("loading FAQ corpus")
}

/// Settings, then the embedder, then the corpus and its index.
pub fn build_context() -> Result<AppContext> {
    let settings = load_settings()?;
    let embedder = get_default_embedder(&settings.embedding).context("loading embedding model")?;
    let faqs = load_faqs(&settings)?;

    let pb = ProgressBar::new(faqs.len() as u64);
    let ctx = AppContext::initialize_with_progress(settings, &faqs, embedder, &pb)
        .context("building corpus index")?;
    tracing::info!(
        entries = ctx.index().len(),
        model_id = ctx.embedder().model_id(),
        min_similarity = ctx.settings().retrieval.min_similarity,
        "faqbot ready"
    );
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqbot_core::config::{CorpusSettings, EmbeddingSettings};

    #[test]
    fn faqs_load_without_a_model() {
        let settings = Settings {
            embedding: EmbeddingSettings {
                model_dir: Some("/nonexistent/faqbot-model".into()),
                ..EmbeddingSettings::default()
            },
            corpus: CorpusSettings::default(),
            ..Settings::default()
        };
        let faqs = load_faqs(&settings).unwrap();
        assert_eq!(faqs.len(), corpus::builtin_faqs().len());
        assert!(!faqs[0].question.is_empty());
    }

    #[test]
    fn missing_corpus_file_is_reported() {
        let settings = Settings {
            corpus: CorpusSettings { path: Some("/nonexistent/faqs.json".into()) },
            ..Settings::default()
        };
        let err = load_faqs(&settings).unwrap_err();
        assert!(format!("{err:#}").contains("loading FAQ corpus"), "{err:#}");
    }
}
