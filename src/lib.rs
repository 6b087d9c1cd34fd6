pub mod error;
pub mod ingest;
pub mod model;
pub mod paths;
pub mod server;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use error::InputError;
pub use ingest::AnalyzedComment;
pub use model::{Prediction, Sentiment, SentimentModel};
pub use service::FeedbackService;
pub use store::{FeedbackRecord, FeedbackStore};
