//! JSON REST API for the Fifty states service.
//!
//! Exposes an axum [`Router`] over a [`StateTable`] and any
//! [`FunFactStore`]. TLS and process concerns are the caller's
//! responsibility.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/states` | Optional `?contig=true\|false` |
//! | `GET`    | `/states/{code}` | Record merged with its fun facts |
//! | `GET`    | `/states/{code}/capital` | `{state, capital}` |
//! | `GET`    | `/states/{code}/nickname` | `{state, nickname}` |
//! | `GET`    | `/states/{code}/population` | `{state, population}`, grouped digits |
//! | `GET`    | `/states/{code}/admission` | `{state, admitted}` |
//! | `GET`    | `/states/{code}/funfact` | One random fact |
//! | `POST`   | `/states/{code}/funfact` | Body `{"funfacts": [..]}` |
//! | `PATCH`  | `/states/{code}/funfact` | Body `{"index": n, "funfact": ".."}` |
//! | `DELETE` | `/states/{code}/funfact` | Body `{"index": n}` |

pub mod error;
pub mod fallback;
pub mod funfacts;
pub mod states;

use std::sync::Arc;

use axum::{Router, routing::get};
use fifty_core::{state::StateTable, store::FunFactStore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
///
/// The table is loaded once at startup and only ever read.
#[derive(Clone)]
pub struct AppState<S: FunFactStore> {
  pub states: Arc<StateTable>,
  pub store:  Arc<S>,
}

impl<S: FunFactStore> AppState<S> {
  pub fn new(states: StateTable, store: S) -> Self {
    Self { states: Arc::new(states), store: Arc::new(store) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router. Unmatched paths and methods get a
/// content-negotiated 404.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: FunFactStore + Clone + 'static,
{
  Router::new()
    .route("/states", get(states::list::<S>))
    .route("/states/{code}", get(states::get_one::<S>))
    .route("/states/{code}/capital", get(states::capital::<S>))
    .route("/states/{code}/nickname", get(states::nickname::<S>))
    .route("/states/{code}/population", get(states::population::<S>))
    .route("/states/{code}/admission", get(states::admission::<S>))
    .route(
      "/states/{code}/funfact",
      get(funfacts::random::<S>)
        .post(funfacts::add::<S>)
        .patch(funfacts::update::<S>)
        .delete(funfacts::remove::<S>),
    )
    .fallback(fallback::not_found)
    .method_not_allowed_fallback(fallback::not_found)
    .with_state(state)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}
