// Data model shared between the analysis engine and its external consumers
// (storage, dashboard). Everything here is plain serializable data.

pub mod models;
pub mod utils;
