use anyhow::{anyhow, ensure, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;

use faqbot_core::config::{expand_path, EmbeddingSettings};
use faqbot_core::traits::Embedder;

pub mod device;
pub mod pool;
pub mod tokenize;

pub use pool::masked_mean_l2;

const DEFAULT_MODEL_DIR: &str = "models/all-MiniLM-L6-v2";

/// Sentence-transformer (all-MiniLM-L6-v2 and other BERT checkpoints) with
/// mean pooling and L2 normalization.
pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
    max_len: usize,
    id: String,
}

impl MiniLmEmbedder {
    pub fn new(settings: &EmbeddingSettings) -> Result<Self> {
        let device = device::select_device();
        let model_dir = resolve_model_dir(settings.model_dir.as_deref())?;
        Self::load(&model_dir, settings.max_len, device)
    }

    pub fn load(model_dir: &Path, max_len: usize, device: Device) -> Result<Self> {
        let started = Instant::now();
        tracing::info!(dir = %model_dir.display(), "loading sentence embedding model");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let raw_config = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config_json: serde_json::Value = serde_json::from_str(&raw_config)?;
        let dim = config_json
            .get("hidden_size")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| anyhow!("{} has no hidden_size", config_path.display()))? as usize;
        let config: BertConfig = serde_json::from_value(config_json)?;

        let weights = load_weights(model_dir, &device)?;
        let vb = VarBuilder::from_tensors(weights, DType::F32, &device);
        let model = BertModel::load(vb, &config)?;

        let id = format!("minilm:{}:d{}", model_dir.display(), dim);
        tracing::info!(model_id = %id, elapsed_ms = started.elapsed().as_millis() as u64, "embedding model loaded");
        Ok(Self { model, tokenizer, device, dim, max_len, id })
    }
}

/// Prefers `model.safetensors`, falls back to the pickled `pytorch_model.bin`.
fn load_weights(model_dir: &Path, device: &Device) -> Result<HashMap<String, Tensor>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        return candle_core::safetensors::load(&safetensors, device)
            .with_context(|| format!("Failed to load {}", safetensors.display()));
    }
    let pickle = model_dir.join("pytorch_model.bin");
    let weights = candle_core::pickle::read_all(&pickle)
        .with_context(|| format!("Failed to load {}", pickle.display()))?;
    weights
        .into_iter()
        .map(|(name, t)| -> Result<(String, Tensor)> { Ok((name, t.to_device(device)?)) })
        .collect()
}

impl Embedder for MiniLmEmbedder {
    fn model_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { self.max_len }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) = tokenize::tokenize_on_device(&self.tokenizer, text, self.max_len, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        let mut rows: Vec<Vec<f32>> = pooled.to_device(&Device::Cpu)?.to_vec2()?;
        let embedding = rows.pop().ok_or_else(|| anyhow!("model returned no embedding"))?;
        if start.elapsed().as_millis() > 100 {
            tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "slow embedding");
        }
        Ok(embedding)
    }
}

/// Feature-hashing embedder: every whitespace token adds 1.0 to an
/// xxhash64-selected bucket, then the vector is L2-normalized.
///
/// Deterministic and model-free; texts sharing words get positive cosine.
pub struct FakeEmbedder {
    dim: usize,
    id: String,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim, id: format!("fake:xxhash64:d{dim}") }
    }
}

impl Embedder for FakeEmbedder {
    fn model_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { usize::MAX }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;

        ensure!(self.dim > 0, "FakeEmbedder needs a dimension of at least 1");
        let mut v = vec![0f32; self.dim];
        for token in text.split_whitespace() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let idx = (hasher.finish() % self.dim as u64) as usize;
            v[idx] += 1.0;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v { *x /= norm; }
        }
        Ok(v)
    }
}

/// The embedder selected by configuration; `APP_USE_FAKE_EMBEDDINGS=1` forces the fake one.
pub fn get_default_embedder(settings: &EmbeddingSettings) -> Result<Arc<dyn Embedder>> {
    let env_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if settings.use_fake || env_fake {
        ensure!(settings.fake_dim > 0, "embedding.fake_dim must be at least 1");
        tracing::info!(dim = settings.fake_dim, "using FakeEmbedder");
        return Ok(Arc::new(FakeEmbedder::new(settings.fake_dim)));
    }
    Ok(Arc::new(MiniLmEmbedder::new(settings)?))
}

/// Configured directory first, then `MODEL_DIR`, then the conventional locations.
pub fn resolve_model_dir(configured: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = configured.filter(|d| !d.trim().is_empty()) {
        let p = expand_path(dir);
        if p.exists() { return Ok(p); }
        return Err(anyhow!("Configured model directory {} does not exist", p.display()));
    }
    if let Ok(dir) = std::env::var("MODEL_DIR") {
        let p = expand_path(&dir);
        if p.exists() { tracing::info!(dir = %p.display(), "using MODEL_DIR"); return Ok(p); }
    }
    for candidate in [PathBuf::from(DEFAULT_MODEL_DIR), Path::new("..").join(DEFAULT_MODEL_DIR)] {
        if candidate.exists() { return Ok(candidate); }
    }
    Err(anyhow!("Could not locate the {} model directory; set embedding.model_dir", DEFAULT_MODEL_DIR))
}
