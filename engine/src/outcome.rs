// Typed result of a computation that may legitimately have nothing to say.
//
// `InsufficientData` is "neutral by design": callers substitute the documented
// fallback. `ExternalFailure` means a collaborator broke and the caller should
// log and drop the unit of work.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Value(T),
    InsufficientData { required: usize, available: usize },
    ExternalFailure(String),
}

impl<T> Outcome<T> {
    pub fn insufficient(required: usize, available: usize) -> Self {
        Outcome::InsufficientData { required, available }
    }

    pub fn failure(err: impl fmt::Display) -> Self {
        Outcome::ExternalFailure(err.to_string())
    }

    /// The computed value, or `fallback` for both non-value variants.
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Outcome::Value(v) => v,
            _ => fallback,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Value(v) => Outcome::Value(f(v)),
            Outcome::InsufficientData { required, available } => {
                Outcome::InsufficientData { required, available }
            }
            Outcome::ExternalFailure(msg) => Outcome::ExternalFailure(msg),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Value(v),
            Err(e) => Outcome::failure(e),
        }
    }
}
