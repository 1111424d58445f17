//! [`SqliteStore`]: the SQLite implementation of [`FunFactStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use fifty_core::{
  funfact::{FactEdit, FunFactEntry},
  state::StateCode,
  store::FunFactStore,
};

use crate::{
  Result,
  encode::{RawEntry, decode_facts, encode_dt, encode_facts},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fun-fact store backed by a single SQLite file.
///
/// All statements run on the one thread owned by the `tokio_rusqlite`
/// connection, and each edit is a single transaction, so concurrent edits of
/// the same code are serialised rather than interleaved.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Read-modify-write of one entry inside a transaction. Nothing is written
/// when the edit is rejected.
fn edit_in_tx(
  conn: &mut rusqlite::Connection,
  code: &StateCode,
  edit: FactEdit,
  at:   &str,
) -> Result<Vec<String>> {
  let tx = conn.transaction()?;

  let stored: Option<String> = tx
    .query_row(
      "SELECT facts FROM fun_facts WHERE state_code = ?1",
      rusqlite::params![code.as_str()],
      |row| row.get(0),
    )
    .optional()?;

  let mut facts = stored
    .as_deref()
    .map(decode_facts)
    .transpose()?
    .unwrap_or_default();
  edit.apply(code, &mut facts)?;

  tx.execute(
    "INSERT INTO fun_facts (state_code, facts, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT (state_code) DO UPDATE
       SET facts = excluded.facts, updated_at = excluded.updated_at",
    rusqlite::params![code.as_str(), encode_facts(&facts)?, at],
  )?;
  tx.commit()?;

  Ok(facts)
}

fn seed_in_tx(
  conn:    &mut rusqlite::Connection,
  entries: &[(StateCode, Vec<String>)],
  at:      &str,
) -> Result<usize> {
  let tx = conn.transaction()?;
  tx.execute("DELETE FROM fun_facts", [])?;
  {
    let mut stmt = tx.prepare(
      "INSERT INTO fun_facts (state_code, facts, updated_at) VALUES (?1, ?2, ?3)",
    )?;
    for (code, facts) in entries {
      stmt.execute(rusqlite::params![code.as_str(), encode_facts(facts)?, at])?;
    }
  }
  tx.commit()?;
  Ok(entries.len())
}

// ─── FunFactStore impl ───────────────────────────────────────────────────────

impl FunFactStore for SqliteStore {
  type Error = crate::Error;

  async fn get(&self, code: &StateCode) -> Result<Option<FunFactEntry>> {
    let code_str = code.as_str().to_owned();

    let raw: Option<RawEntry> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT state_code, facts, updated_at FROM fun_facts WHERE state_code = ?1",
            rusqlite::params![code_str],
            |row| {
              Ok(RawEntry {
                state_code: row.get(0)?,
                facts:      row.get(1)?,
                updated_at: row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEntry::into_entry).transpose()
  }

  async fn all(&self) -> Result<HashMap<StateCode, Vec<String>>> {
    let rows: Vec<(String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT state_code, facts FROM fun_facts")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(code, facts)| -> Result<(StateCode, Vec<String>)> {
        Ok((StateCode::parse(&code)?, decode_facts(&facts)?))
      })
      .collect()
  }

  async fn edit(&self, code: StateCode, edit: FactEdit) -> Result<FunFactEntry> {
    let updated_at = Utc::now();
    let at_str     = encode_dt(updated_at);
    let tx_code    = code.clone();

    let funfacts = self
      .conn
      .call(move |conn| Ok(edit_in_tx(conn, &tx_code, edit, &at_str)))
      .await??;

    tracing::debug!(code = %code, len = funfacts.len(), "fun facts updated");

    Ok(FunFactEntry { state_code: code, funfacts, updated_at })
  }

  async fn seed(&self, entries: Vec<(StateCode, Vec<String>)>) -> Result<usize> {
    let at_str = encode_dt(Utc::now());

    let written = self
      .conn
      .call(move |conn| Ok(seed_in_tx(conn, &entries, &at_str)))
      .await??;

    tracing::debug!(written, "fun facts seeded");
    Ok(written)
  }
}
