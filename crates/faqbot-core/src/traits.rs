/// Text-to-vector collaborator shared by index construction and queries.
///
/// Implementations must return vectors of exactly `dim()` finite values and
/// be callable through `&self` from several threads.
pub trait Embedder: Send + Sync {
    /// Identifies the loaded model instance (e.g. `minilm:/models/x:d384`).
    fn model_id(&self) -> &str;
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_text(t)).collect()
    }
}
