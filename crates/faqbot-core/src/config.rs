//! Layered configuration and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` +
//! `config.<env>.toml` + `APP_*` env vars (`__` separates nested keys, so
//! `APP_RETRIEVAL__MIN_SIMILARITY=0.6` overrides `retrieval.min_similarity`).
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            other => tracing::warn!(env = other, "unknown RUST_ENV, using config.toml only"),
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        tracing::debug!(env = env_name, "configuration sources merged");
        Ok(Self { figment })
    }

    /// Wraps an already assembled figment; defaults are merged underneath.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment: Figment::from(Serialized::defaults(Settings::default())).merge(figment) }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Typed, validated settings.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub retrieval: RetrievalSettings,
    pub embedding: EmbeddingSettings,
    pub corpus: CorpusSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.retrieval.validate()?;
        self.embedding.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Inclusive cosine threshold separating a match from suggestions.
    pub min_similarity: f32,
    pub suggestion_count: usize,
    /// Accepted for compatibility; retrieval always answers with the single best entry.
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { min_similarity: 0.5, suggestion_count: 3, top_k: 1 }
    }
}

impl RetrievalSettings {
    pub fn validate(&self) -> Result<()> {
        validate_min_similarity(self.min_similarity)?;
        if self.suggestion_count == 0 {
            return Err(Error::InvalidConfig("retrieval.suggestion_count must be at least 1".into()));
        }
        if self.top_k != 1 {
            tracing::warn!(top_k = self.top_k, "retrieval.top_k is reserved and has no effect");
        }
        Ok(())
    }
}

/// Rejects thresholds that no cosine similarity could be compared against.
pub fn validate_min_similarity(value: f32) -> Result<()> {
    if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
        return Err(Error::InvalidConfig(format!(
            "min_similarity must be a finite value in [-1, 1], got {value}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Directory holding `tokenizer.json`, `config.json` and the weights.
    pub model_dir: Option<String>,
    pub max_len: usize,
    /// Upper bound for one embedding call; `0` disables it.
    pub timeout_ms: u64,
    /// Route every embedding call through a single lock.
    pub serialize_calls: bool,
    pub use_fake: bool,
    pub fake_dim: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_len: 256,
            timeout_ms: 10_000,
            serialize_calls: false,
            use_fake: false,
            fake_dim: 384,
        }
    }
}

impl EmbeddingSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_len == 0 {
            return Err(Error::InvalidConfig("embedding.max_len must be at least 1".into()));
        }
        // APP_USE_FAKE_EMBEDDINGS can select the fake embedder even when use_fake is off
        if self.fake_dim == 0 {
            return Err(Error::InvalidConfig("embedding.fake_dim must be at least 1".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_ms > 0).then(|| std::time::Duration::from_millis(self.timeout_ms))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// JSON file with `[{"question": .., "answer": ..}]`; unset or empty means built-in.
    pub path: Option<String>,
}

impl CorpusSettings {
    pub fn file(&self) -> Option<PathBuf> {
        self.path.as_deref().filter(|p| !p.trim().is_empty()).map(expand_path)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
