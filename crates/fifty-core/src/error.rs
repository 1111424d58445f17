//! Error types for `fifty-core`.

use thiserror::Error;

use crate::state::StateCode;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid state code: {0:?}")]
  InvalidStateCode(String),

  #[error("duplicate state code in dataset: {0}")]
  DuplicateStateCode(StateCode),

  /// The entry is missing, or present with an empty list.
  #[error("no fun facts recorded for {0}")]
  NoFunFacts(StateCode),

  /// A 1-based index outside `[1, len]`.
  #[error("fun fact index {index} out of range for {code} (1..={len})")]
  IndexOutOfRange {
    code:  StateCode,
    index: i64,
    len:   usize,
  },

  #[error("dataset error: {0}")]
  Dataset(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
