//! Handlers for the read-only `/states` endpoints.
//!
//! Path codes are matched case-insensitively; an unknown code is always a
//! 404 with [`INVALID_STATE`](crate::error::INVALID_STATE).

use axum::{
  Json,
  extract::{Path, Query, State},
};
use fifty_core::{
  merge::{MergedState, merge, merge_all},
  state::{Contiguity, StateRecord},
  store::FunFactStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

/// Resolve a path code against the reference table.
pub(crate) fn resolve<'a, S: FunFactStore>(
  state: &'a AppState<S>,
  code: &str,
) -> Result<&'a StateRecord, ApiError> {
  state.states.lookup(code).ok_or_else(ApiError::invalid_state)
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// `true` for the lower 48, `false` for Alaska and Hawaii.
  pub contig: Option<String>,
}

/// `GET /states[?contig=true|false]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<MergedState>>, ApiError>
where
  S: FunFactStore,
{
  let contiguity = Contiguity::from_query(params.contig.as_deref());
  let facts = state
    .store
    .all()
    .await
    .map_err(|e| ApiError::internal("fetching states", e))?;

  Ok(Json(merge_all(state.states.filter(contiguity), &facts)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /states/{code}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<MergedState>, ApiError>
where
  S: FunFactStore,
{
  let record = resolve(&state, &code)?;
  let entry = state
    .store
    .get(&record.code)
    .await
    .map_err(|e| ApiError::internal("fetching state", e))?;

  Ok(Json(merge(record, entry.as_ref().map(|e| e.funfacts.as_slice()))))
}

// ─── Single fields ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CapitalBody {
  pub state:   String,
  pub capital: String,
}

#[derive(Debug, Serialize)]
pub struct NicknameBody {
  pub state:    String,
  pub nickname: String,
}

#[derive(Debug, Serialize)]
pub struct PopulationBody {
  pub state:      String,
  /// Grouped with commas, e.g. `"2,937,880"`.
  pub population: String,
}

#[derive(Debug, Serialize)]
pub struct AdmissionBody {
  pub state:    String,
  pub admitted: String,
}

/// `GET /states/{code}/capital`
pub async fn capital<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<CapitalBody>, ApiError>
where
  S: FunFactStore,
{
  let record = resolve(&state, &code)?;
  Ok(Json(CapitalBody {
    state:   record.name.clone(),
    capital: record.capital.clone(),
  }))
}

/// `GET /states/{code}/nickname`
pub async fn nickname<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<NicknameBody>, ApiError>
where
  S: FunFactStore,
{
  let record = resolve(&state, &code)?;
  Ok(Json(NicknameBody {
    state:    record.name.clone(),
    nickname: record.nickname.clone(),
  }))
}

/// `GET /states/{code}/population`
pub async fn population<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<PopulationBody>, ApiError>
where
  S: FunFactStore,
{
  let record = resolve(&state, &code)?;
  Ok(Json(PopulationBody {
    state:      record.name.clone(),
    population: record.formatted_population(),
  }))
}

/// `GET /states/{code}/admission`
pub async fn admission<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<AdmissionBody>, ApiError>
where
  S: FunFactStore,
{
  let record = resolve(&state, &code)?;
  Ok(Json(AdmissionBody {
    state:    record.name.clone(),
    admitted: record.admission_date.clone(),
  }))
}
