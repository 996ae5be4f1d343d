//! Domain layer - Core scoring, session and reporting logic

pub mod agent;
pub mod embedding;
pub mod error;
pub mod keywords;
pub mod question;
pub mod report;
pub mod scoring;
pub mod session;

pub use agent::{ChatAgent, Credentials};
pub use embedding::{cosine_similarity, Embedding, EmbeddingProvider};
pub use error::DomainError;
pub use keywords::{KeywordExtractor, KeywordSet};
pub use question::QuestionCase;
pub use report::{BatchMetrics, ConfusionMatrix, ReportSink};
pub use scoring::{MetricWeights, ScoringConfig, SignalScores, ValidationEngine, ValidationResult};
pub use session::{
    FailurePolicy, QuestionResult, SessionDriver, SessionOutcome, SessionSettings, SessionState,
};
