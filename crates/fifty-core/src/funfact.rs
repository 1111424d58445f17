//! Fun facts, the only mutable data in the system.
//!
//! A state has at most one [`FunFactEntry`]. Its list is addressed 1-based
//! from the outside; [`FactEdit::apply`] is the single place that translates
//! those indices and enforces the range rules, so every backend behaves the
//! same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, state::StateCode};

// ─── Entry ───────────────────────────────────────────────────────────────────

/// The persisted fun-fact list for one state.
///
/// An entry whose list is empty is equivalent to no entry for reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFactEntry {
  pub state_code: StateCode,
  pub funfacts:   Vec<String>,
  /// Server-assigned; refreshed on every mutation.
  pub updated_at: DateTime<Utc>,
}

impl FunFactEntry {
  /// The list, or `None` when there is nothing to show.
  pub fn non_empty_facts(&self) -> Option<&[String]> {
    (!self.funfacts.is_empty()).then_some(self.funfacts.as_slice())
  }
}

// ─── Edits ───────────────────────────────────────────────────────────────────

/// One logical mutation of a state's list. Backends apply it atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactEdit {
  /// Add to the end, creating the entry if needed.
  Append(Vec<String>),
  /// Overwrite the fact at a 1-based `index`.
  Replace { index: i64, value: String },
  /// Remove the fact at a 1-based `index`.
  Remove { index: i64 },
}

impl FactEdit {
  /// Apply the edit to `facts`, the current list (empty when the entry is
  /// missing). On error `facts` is left untouched.
  pub fn apply(self, code: &StateCode, facts: &mut Vec<String>) -> Result<()> {
    match self {
      Self::Append(new) => facts.extend(new),
      Self::Replace { index, value } => {
        let slot = slot(code, facts, index)?;
        facts[slot] = value;
      }
      Self::Remove { index } => {
        let slot = slot(code, facts, index)?;
        facts.remove(slot);
      }
    }
    Ok(())
  }
}

/// Translate a 1-based index into a slice position.
fn slot(code: &StateCode, facts: &[String], index: i64) -> Result<usize> {
  if facts.is_empty() {
    return Err(Error::NoFunFacts(code.clone()));
  }
  usize::try_from(index)
    .ok()
    .filter(|i| (1..=facts.len()).contains(i))
    .map(|i| i - 1)
    .ok_or_else(|| Error::IndexOutOfRange {
      code: code.clone(),
      index,
      len: facts.len(),
    })
}
