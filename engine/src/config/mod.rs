pub mod settings;

pub use settings::{DetectorSettings, EngineSettings, ScreenSettings};
