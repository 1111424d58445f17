//! The `FunFactStore` trait.
//!
//! Implemented by storage backends (e.g. `fifty-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on a concrete backend.

use std::{collections::HashMap, future::Future};

use crate::{
  funfact::{FactEdit, FunFactEntry},
  state::StateCode,
};

/// Backend errors, which may wrap a domain rejection from
/// [`FactEdit::apply`].
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error behind this one, if the backend itself is healthy.
  fn as_core(&self) -> Option<&crate::Error>;
}

/// Abstraction over the persistent fun-fact collection.
///
/// Each mutation is one read-modify-write on a single state's entry and
/// must be atomic with respect to other mutations of the same code.
pub trait FunFactStore: Send + Sync {
  type Error: StoreError;

  /// The entry for `code`, or `None` if none was ever created.
  fn get<'a>(
    &'a self,
    code: &'a StateCode,
  ) -> impl Future<Output = Result<Option<FunFactEntry>, Self::Error>> + Send + 'a;

  /// Every stored list, keyed by code.
  fn all(
    &self,
  ) -> impl Future<Output = Result<HashMap<StateCode, Vec<String>>, Self::Error>>
  + Send
  + '_;

  /// Atomically apply `edit` to the entry for `code` and return the result.
  ///
  /// [`FactEdit::Append`] creates a missing entry; other edits fail with
  /// [`crate::Error::NoFunFacts`] when the entry is missing or empty.
  fn edit(
    &self,
    code: StateCode,
    edit: FactEdit,
  ) -> impl Future<Output = Result<FunFactEntry, Self::Error>> + Send + '_;

  /// Replace the whole collection with `entries`. Returns how many were
  /// written.
  fn seed(
    &self,
    entries: Vec<(StateCode, Vec<String>)>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Append `facts` to the end of the list for `code`.
  fn append(
    &self,
    code: StateCode,
    facts: Vec<String>,
  ) -> impl Future<Output = Result<FunFactEntry, Self::Error>> + Send + '_ {
    self.edit(code, FactEdit::Append(facts))
  }

  /// Overwrite the fact at 1-based `index`.
  fn replace_at(
    &self,
    code: StateCode,
    index: i64,
    value: String,
  ) -> impl Future<Output = Result<FunFactEntry, Self::Error>> + Send + '_ {
    self.edit(code, FactEdit::Replace { index, value })
  }

  /// Remove the fact at 1-based `index`. Removing the last fact leaves an
  /// entry with an empty list.
  fn remove_at(
    &self,
    code: StateCode,
    index: i64,
  ) -> impl Future<Output = Result<FunFactEntry, Self::Error>> + Send + '_ {
    self.edit(code, FactEdit::Remove { index })
  }
}
