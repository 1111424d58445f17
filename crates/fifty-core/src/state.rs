//! The static reference table of U.S. states.
//!
//! Loaded once at startup and never mutated afterwards. Handlers borrow
//! records from it; anything that needs to attach data to a record works on
//! a copy (see [`crate::merge`]).

use std::{borrow::Borrow, collections::HashMap, fmt, str::FromStr};

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The dataset compiled into the binary.
pub const BUILTIN_DATASET: &str = include_str!("../data/states.json");

/// Codes of the two states outside the contiguous 48.
pub const NON_CONTIGUOUS: [&str; 2] = ["AK", "HI"];

// ─── StateCode ───────────────────────────────────────────────────────────────

/// A two-letter postal abbreviation, always stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateCode(String);

impl StateCode {
  /// Normalise `raw` to upper-case and check that it is two ASCII letters.
  pub fn parse(raw: &str) -> Result<Self> {
    if raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_alphabetic()) {
      Ok(Self(raw.to_ascii_uppercase()))
    } else {
      Err(Error::InvalidStateCode(raw.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl FromStr for StateCode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for StateCode {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<StateCode> for String {
  fn from(code: StateCode) -> Self { code.0 }
}

impl Borrow<str> for StateCode {
  fn borrow(&self) -> &str { &self.0 }
}

impl fmt::Display for StateCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── StateRecord ─────────────────────────────────────────────────────────────

/// One row of the reference dataset. Field names match the JSON asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
  #[serde(rename = "state")]
  pub name:             String,
  pub slug:             String,
  pub code:             StateCode,
  pub nickname:         String,
  #[serde(rename = "capital_city")]
  pub capital:          String,
  pub population:       u64,
  /// ISO `YYYY-MM-DD`, kept as the dataset spells it.
  pub admission_date:   String,
  pub admission_number: u32,
}

impl StateRecord {
  pub fn is_contiguous(&self) -> bool {
    !NON_CONTIGUOUS.contains(&self.code.as_str())
  }

  /// Population with en-US thousands separators, e.g. `2,937,880`.
  pub fn formatted_population(&self) -> String {
    self.population.to_formatted_string(&Locale::en)
  }
}

// ─── Contiguity filter ───────────────────────────────────────────────────────

/// Partition selected by the `contig` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contiguity {
  #[default]
  All,
  /// The lower 48.
  Contiguous,
  /// Alaska and Hawaii.
  NonContiguous,
}

impl Contiguity {
  /// `"true"` and `"false"` select a partition; anything else means all.
  pub fn from_query(value: Option<&str>) -> Self {
    match value {
      Some("true") => Self::Contiguous,
      Some("false") => Self::NonContiguous,
      _ => Self::All,
    }
  }

  pub fn admits(self, record: &StateRecord) -> bool {
    match self {
      Self::All => true,
      Self::Contiguous => record.is_contiguous(),
      Self::NonContiguous => !record.is_contiguous(),
    }
  }
}

// ─── StateTable ──────────────────────────────────────────────────────────────

/// Immutable, indexed view over the reference dataset.
#[derive(Debug, Clone)]
pub struct StateTable {
  records: Vec<StateRecord>,
  index:   HashMap<StateCode, usize>,
}

impl StateTable {
  /// Parse the dataset compiled into the binary.
  pub fn builtin() -> Result<Self> { Self::from_json(BUILTIN_DATASET) }

  /// Parse a JSON array of records, e.g. an operator-supplied dataset file.
  pub fn from_json(json: &str) -> Result<Self> {
    let records: Vec<StateRecord> = serde_json::from_str(json)?;
    Self::from_records(records)
  }

  /// Build the table, rejecting duplicate codes. Record order is preserved.
  pub fn from_records(records: Vec<StateRecord>) -> Result<Self> {
    let mut index = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
      if index.insert(record.code.clone(), i).is_some() {
        return Err(Error::DuplicateStateCode(record.code.clone()));
      }
    }
    Ok(Self { records, index })
  }

  /// Case-insensitive lookup. Anything that is not a two-letter code, or is
  /// not in the dataset, yields `None`.
  pub fn lookup(&self, code: &str) -> Option<&StateRecord> {
    let code = StateCode::parse(code).ok()?;
    self.index.get(&code).map(|&i| &self.records[i])
  }

  pub fn records(&self) -> &[StateRecord] { &self.records }

  /// Records in dataset order, restricted to `contiguity`.
  pub fn filter(
    &self,
    contiguity: Contiguity,
  ) -> impl Iterator<Item = &StateRecord> + '_ {
    self.records.iter().filter(move |r| contiguity.admits(r))
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn table() -> StateTable { StateTable::builtin().expect("builtin dataset") }

  #[test]
  fn builtin_dataset_has_fifty_states() {
    assert_eq!(table().len(), 50);
  }

  #[test]
  fn lookup_is_case_insensitive() {
    let t = table();
    for record in t.records() {
      let lower = record.code.as_str().to_ascii_lowercase();
      let mixed = format!(
        "{}{}",
        &record.code.as_str()[..1],
        &lower[1..],
      );
      assert_eq!(t.lookup(record.code.as_str()), Some(record));
      assert_eq!(t.lookup(&lower), Some(record));
      assert_eq!(t.lookup(&mixed), Some(record));
    }
  }

  #[test]
  fn lookup_unknown_code_is_none() {
    let t = table();
    assert!(t.lookup("ZZ").is_none());
    assert!(t.lookup("KSX").is_none());
    assert!(t.lookup("").is_none());
    assert!(t.lookup("1A").is_none());
  }

  #[test]
  fn contig_true_excludes_exactly_alaska_and_hawaii() {
    let t = table();
    let contiguous: Vec<_> = t
      .filter(Contiguity::Contiguous)
      .map(|r| r.code.as_str())
      .collect();
    assert_eq!(contiguous.len(), 48);
    assert!(!contiguous.contains(&"AK"));
    assert!(!contiguous.contains(&"HI"));

    let others: Vec<_> = t
      .filter(Contiguity::NonContiguous)
      .map(|r| r.code.as_str())
      .collect();
    assert_eq!(others, ["AK", "HI"]);
  }

  #[test]
  fn contiguity_from_query() {
    assert_eq!(Contiguity::from_query(Some("true")), Contiguity::Contiguous);
    assert_eq!(Contiguity::from_query(Some("false")), Contiguity::NonContiguous);
    assert_eq!(Contiguity::from_query(Some("yes")), Contiguity::All);
    assert_eq!(Contiguity::from_query(None), Contiguity::All);
  }

  #[test]
  fn population_uses_grouping_separators() {
    let t = table();
    assert_eq!(t.lookup("KS").unwrap().formatted_population(), "2,937,880");
    assert_eq!(t.lookup("WY").unwrap().formatted_population(), "576,851");
  }

  #[test]
  fn duplicate_codes_are_rejected() {
    let t = table();
    let mut records = t.records().to_vec();
    records.push(records[0].clone());
    assert!(matches!(
      StateTable::from_records(records),
      Err(Error::DuplicateStateCode(_))
    ));
  }

  #[test]
  fn malformed_code_in_dataset_is_rejected() {
    let json = r#"[{"state":"Nowhere","slug":"nowhere","code":"XYZ",
      "nickname":"","capital_city":"","population":0,
      "admission_date":"1900-01-01","admission_number":51}]"#;
    assert!(matches!(StateTable::from_json(json), Err(Error::Dataset(_))));
  }

  #[test]
  fn state_code_parse_uppercases() {
    assert_eq!(StateCode::parse("ks").unwrap().as_str(), "KS");
    assert!(StateCode::parse("k").is_err());
  }
}
