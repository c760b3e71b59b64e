// Services built on the pure engines and the collaborator traits.
use crate::error::EngineError;
use std::future::Future;
use std::time::Duration;

pub mod analysis_service;
pub mod token_screen;

pub use analysis_service::{AnalysisOrchestrator, Ranking};
pub use token_screen::{TokenScreener, Verdict};

/// Bounds a collaborator call; an elapsed deadline becomes `EngineError::Timeout`.
pub async fn with_timeout<T, F>(operation: &str, limit: Duration, fut: F) -> Result<T, EngineError>
where
    F: Future<Output = Result<T, EngineError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(EngineError::timeout(operation, limit)),
    }
}
