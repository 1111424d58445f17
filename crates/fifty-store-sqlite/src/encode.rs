//! Encoding and decoding helpers between domain types and the plain-text
//! columns stored in SQLite.
//!
//! Timestamps are RFC 3339 strings; fact lists are compact JSON arrays.

use chrono::{DateTime, Utc};
use fifty_core::{funfact::FunFactEntry, state::StateCode};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Fact lists ──────────────────────────────────────────────────────────────

pub fn encode_facts(facts: &[String]) -> Result<String> {
  Ok(serde_json::to_string(facts)?)
}

pub fn decode_facts(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `fun_facts` row.
pub struct RawEntry {
  pub state_code: String,
  pub facts:      String,
  pub updated_at: String,
}

impl RawEntry {
  pub fn into_entry(self) -> Result<FunFactEntry> {
    Ok(FunFactEntry {
      state_code: StateCode::parse(&self.state_code)?,
      funfacts:   decode_facts(&self.facts)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
