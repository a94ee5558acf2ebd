//! Semantic FAQ retrieval: corpus index, cosine ranking, threshold decision
//! and the query service that chains them behind one `answer` call.

pub mod context;
pub mod decide;
pub mod index;
pub mod rank;
pub mod service;

pub use context::AppContext;
pub use decide::{decide, MatchPolicy};
pub use index::CorpusIndex;
pub use rank::{cosine_similarity, rank};
pub use service::QueryService;
