#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use faqbot_core::traits::Embedder;

pub const VOCAB_DIM: usize = 512;

/// Bag-of-words embedder: one axis per distinct word, assigned on first sight.
///
/// Unlike feature hashing it never collides, so expected cosines can be
/// computed by hand: "library hours" vs "what are the library hours" is
/// 2 / (sqrt(2) * sqrt(5)).
pub struct VocabEmbedder {
    vocab: Mutex<HashMap<String, usize>>,
    id: String,
}

impl VocabEmbedder {
    pub fn new() -> Self {
        Self { vocab: Mutex::new(HashMap::new()), id: format!("vocab:d{VOCAB_DIM}") }
    }
}

impl Embedder for VocabEmbedder {
    fn model_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { VOCAB_DIM }
    fn max_len(&self) -> usize { VOCAB_DIM }

    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut vocab = self.vocab.lock().map_err(|_| anyhow::anyhow!("vocab poisoned"))?;
        let mut v = vec![0f32; VOCAB_DIM];
        for token in text.split_whitespace() {
            let next = vocab.len();
            let idx = *vocab.entry(token.to_string()).or_insert(next);
            anyhow::ensure!(idx < VOCAB_DIM, "vocabulary exhausted");
            v[idx] += 1.0;
        }
        Ok(v)
    }
}

/// Delegates to [`VocabEmbedder`]; every call after the first `fast_calls` sleeps first.
pub struct SlowEmbedder {
    inner: VocabEmbedder,
    fast_calls: usize,
    delay: Duration,
    calls: AtomicUsize,
}

impl SlowEmbedder {
    pub fn new(fast_calls: usize, delay: Duration) -> Self {
        Self { inner: VocabEmbedder::new(), fast_calls, delay, calls: AtomicUsize::new(0) }
    }
}

impl Embedder for SlowEmbedder {
    fn model_id(&self) -> &str { self.inner.model_id() }
    fn dim(&self) -> usize { self.inner.dim() }
    fn max_len(&self) -> usize { self.inner.max_len() }

    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.fast_calls {
            std::thread::sleep(self.delay);
        }
        self.inner.embed_text(text)
    }
}

/// Records the highest number of overlapping `embed_text` calls.
pub struct CountingEmbedder {
    inner: VocabEmbedder,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    hold: Duration,
}

impl CountingEmbedder {
    pub fn new(hold: Duration) -> Self {
        Self {
            inner: VocabEmbedder::new(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            hold,
        }
    }

    pub fn max_in_flight(&self) -> usize { self.max_in_flight.load(Ordering::SeqCst) }
}

impl Embedder for CountingEmbedder {
    fn model_id(&self) -> &str { self.inner.model_id() }
    fn dim(&self) -> usize { self.inner.dim() }
    fn max_len(&self) -> usize { self.inner.max_len() }

    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.hold);
        let out = self.inner.embed_text(text);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }
}

/// Answers the first `good_calls` calls, then returns `bad` for every query.
pub struct FlakyEmbedder {
    inner: VocabEmbedder,
    good_calls: usize,
    calls: AtomicUsize,
    bad: Bad,
}

#[derive(Clone, Copy)]
pub enum Bad {
    Error,
    WrongDim,
    NotFinite,
}

impl FlakyEmbedder {
    pub fn new(good_calls: usize, bad: Bad) -> Self {
        Self { inner: VocabEmbedder::new(), good_calls, calls: AtomicUsize::new(0), bad }
    }
}

impl Embedder for FlakyEmbedder {
    fn model_id(&self) -> &str { self.inner.model_id() }
    fn dim(&self) -> usize { self.inner.dim() }
    fn max_len(&self) -> usize { self.inner.max_len() }

    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.good_calls {
            return self.inner.embed_text(text);
        }
        match self.bad {
            Bad::Error => anyhow::bail!("model backend unavailable"),
            Bad::WrongDim => Ok(vec![1.0; VOCAB_DIM + 1]),
            Bad::NotFinite => Ok(vec![f32::INFINITY; VOCAB_DIM]),
        }
    }
}
