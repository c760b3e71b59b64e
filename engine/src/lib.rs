// Engine library root: indicator, scoring and detection engines, the
// collaborator boundaries they are fed through, and the services on top.

pub mod config;
pub mod data;
pub mod detection;
pub mod error;
pub mod indicators;
pub mod outcome;
pub mod scoring;
pub mod services;

pub use error::EngineError;
pub use outcome::Outcome;
