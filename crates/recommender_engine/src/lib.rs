//! Recommender engine: the outbound HTTP call and effect execution.
mod client;
mod contract;
mod engine;
mod types;

pub use client::{ClientSettings, Recommender, ReqwestRecommender, DEFAULT_ENDPOINT};
pub use contract::{decode_response, ResponseContract};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{EngineEvent, FailureKind, RecommendError, RequestId};
