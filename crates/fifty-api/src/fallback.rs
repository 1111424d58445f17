//! 404 for anything the router does not match, shaped by `Accept`.

use axum::{
  Json,
  http::{HeaderMap, StatusCode, header},
  response::{Html, IntoResponse, Response},
};
use serde_json::json;

/// The representation picked for a 404 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundFormat {
  Html,
  Json,
  Text,
}

impl NotFoundFormat {
  /// HTML if acceptable, else JSON if acceptable, else plain text. A missing
  /// `Accept` header accepts anything.
  ///
  /// Each format is tested on its own, so any `q` above 0 accepts it and
  /// q-values do not reorder the three.
  pub fn negotiate(accept: Option<&str>) -> Self {
    let Some(accept) = accept else { return Self::Html };
    let ranges: Vec<&str> = accept
      .split(',')
      .filter_map(|range| {
        let mut parts = range.split(';');
        let media = parts.next()?.trim();
        let refused = parts.any(|p| {
          p.trim()
            .strip_prefix("q=")
            .and_then(|q| q.trim().parse::<f32>().ok())
            .is_some_and(|q| q <= 0.0)
        });
        (!media.is_empty() && !refused).then_some(media)
      })
      .collect();

    let accepts = |kind: &str, sub: &str| {
      ranges.iter().any(|r| {
        r.eq_ignore_ascii_case("*/*")
          || r.eq_ignore_ascii_case(&format!("{kind}/*"))
          || r.eq_ignore_ascii_case(&format!("{kind}/{sub}"))
      })
    };

    if accepts("text", "html") {
      Self::Html
    } else if accepts("application", "json") {
      Self::Json
    } else {
      Self::Text
    }
  }
}

/// Router fallback for unknown paths and unsupported methods.
pub async fn not_found(headers: HeaderMap) -> Response {
  let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
  match NotFoundFormat::negotiate(accept) {
    NotFoundFormat::Html => {
      (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>")).into_response()
    }
    NotFoundFormat::Json => {
      (StatusCode::NOT_FOUND, Json(json!({ "error": "404 Not Found" })))
        .into_response()
    }
    NotFoundFormat::Text => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
  }
}
