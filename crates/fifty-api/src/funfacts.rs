//! Handlers for `/states/{code}/funfact`.
//!
//! The three mutating handlers validate in the same order: the path code
//! first (404), then the body (400), then the stored list (404). Nothing is
//! written unless all three pass.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use fifty_core::{funfact::FunFactEntry, state::StateCode, store::FunFactStore};
use rand::seq::IndexedRandom as _;
use serde::Serialize;
use serde_json::Value;

use crate::{AppState, error::ApiError, states::resolve};

const FACTS_REQUIRED: &str = "State fun facts value must be an array of strings";
const INDEX_REQUIRED: &str = "State fun fact index value required";
const FACT_REQUIRED: &str = "State fun fact value required";

/// Unreadable or missing JSON counts as an empty body, so that it fails the
/// route's own validation with the route's own message.
fn body_or_null(body: Result<Json<Value>, JsonRejection>) -> Value {
  match body {
    Ok(Json(value)) => value,
    Err(rejection) => {
      tracing::debug!(%rejection, "unreadable fun fact body");
      Value::Null
    }
  }
}

/// `funfacts` as a non-empty array of strings.
fn fact_list(body: &Value) -> Option<Vec<String>> {
  body
    .get("funfacts")?
    .as_array()?
    .iter()
    .map(|v| v.as_str().map(str::to_owned))
    .collect::<Option<Vec<_>>>()
    .filter(|facts| !facts.is_empty())
}

/// `index` as an integer; range is checked against the stored list later.
///
/// Any JSON number is an index. Whole floats (`1.0`) count as integers,
/// integers past `i64::MAX` saturate, and fractional values map to 0. The
/// last two always land outside `[1, len]`.
fn fact_index(body: &Value) -> Result<i64, ApiError> {
  let Some(Value::Number(n)) = body.get("index") else {
    return Err(ApiError::BadRequest(INDEX_REQUIRED.to_owned()));
  };
  let index = n
    .as_i64()
    .or_else(|| n.as_u64().map(|_| i64::MAX))
    .or_else(|| n.as_f64().map(|f| if f.fract() == 0.0 { f as i64 } else { 0 }))
    .unwrap_or(0);
  Ok(index)
}

// ─── Random ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FunFactBody {
  pub funfact: String,
}

/// `GET /states/{code}/funfact`: one fact drawn uniformly at random.
///
/// The 404 message names the state, or the upper-cased code when the code
/// is not in the reference table.
pub async fn random<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<FunFactBody>, ApiError>
where
  S: FunFactStore,
{
  let upper = code.to_ascii_uppercase();
  let label = state
    .states
    .lookup(&upper)
    .map_or(upper.as_str(), |r| r.name.as_str());

  let entry = match StateCode::parse(&upper) {
    Ok(code) => state
      .store
      .get(&code)
      .await
      .map_err(|e| ApiError::internal("fetching fun fact", e))?,
    Err(_) => None,
  };

  let funfact = entry
    .as_ref()
    .and_then(FunFactEntry::non_empty_facts)
    .and_then(|facts| facts.choose(&mut rand::rng()))
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("No Fun Facts found for {label}")))?;

  Ok(Json(FunFactBody { funfact }))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// `POST /states/{code}/funfact`, body `{"funfacts": ["..", ..]}`.
///
/// Appends to the stored list, creating it on first use.
pub async fn add<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FunFactEntry>, ApiError>
where
  S: FunFactStore,
{
  let record = resolve(&state, &code)?;
  let facts = fact_list(&body_or_null(body))
    .ok_or_else(|| ApiError::BadRequest(FACTS_REQUIRED.to_owned()))?;

  let entry = state
    .store
    .append(record.code.clone(), facts)
    .await
    .map_err(|e| ApiError::from_store("creating fun facts", &record.name, e))?;
  Ok(Json(entry))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /states/{code}/funfact`, body `{"index": n, "funfact": ".."}`,
/// `index` being 1-based.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FunFactEntry>, ApiError>
where
  S: FunFactStore,
{
  let record = resolve(&state, &code)?;
  let body = body_or_null(body);
  let index = fact_index(&body)?;
  let funfact = body
    .get("funfact")
    .and_then(Value::as_str)
    .filter(|f| !f.is_empty())
    .ok_or_else(|| ApiError::BadRequest(FACT_REQUIRED.to_owned()))?
    .to_owned();

  let entry = state
    .store
    .replace_at(record.code.clone(), index, funfact)
    .await
    .map_err(|e| ApiError::from_store("updating fun fact", &record.name, e))?;
  Ok(Json(entry))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /states/{code}/funfact`, body `{"index": n}`, 1-based.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FunFactEntry>, ApiError>
where
  S: FunFactStore,
{
  let record = resolve(&state, &code)?;
  let index = fact_index(&body_or_null(body))?;

  let entry = state
    .store
    .remove_at(record.code.clone(), index)
    .await
    .map_err(|e| ApiError::from_store("deleting fun fact", &record.name, e))?;
  Ok(Json(entry))
}
