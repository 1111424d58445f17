//! Combining reference records with their fun facts.
//!
//! Every [`MergedState`] owns its data: the record and the list are copied,
//! so neither the shared [`StateTable`](crate::state::StateTable) nor a
//! store's internal state can be reached through a returned view.

use std::collections::HashMap;

use serde::Serialize;

use crate::state::{StateCode, StateRecord};

/// A record plus its fun facts, computed per request and never stored.
///
/// `funfacts` is omitted from the JSON entirely when there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedState {
  #[serde(flatten)]
  pub record:   StateRecord,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub funfacts: Option<Vec<String>>,
}

/// Merge one record with its list; absent and empty lists are equivalent.
pub fn merge(record: &StateRecord, facts: Option<&[String]>) -> MergedState {
  MergedState {
    record:   record.clone(),
    funfacts: facts.filter(|f| !f.is_empty()).map(<[String]>::to_vec),
  }
}

/// Merge each record with the list stored under its code, if any.
pub fn merge_all<'a>(
  records: impl IntoIterator<Item = &'a StateRecord>,
  facts_by_code: &HashMap<StateCode, Vec<String>>,
) -> Vec<MergedState> {
  records
    .into_iter()
    .map(|r| merge(r, facts_by_code.get(&r.code).map(Vec::as_slice)))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::state::{Contiguity, StateTable};

  fn table() -> StateTable { StateTable::builtin().unwrap() }

  #[test]
  fn absent_or_empty_facts_omit_the_field() {
    let t = table();
    let ks = t.lookup("KS").unwrap();

    for facts in [None, Some(&[][..])] {
      let view = merge(ks, facts);
      assert!(view.funfacts.is_none());
      let json = serde_json::to_value(&view).unwrap();
      assert!(json.get("funfacts").is_none(), "{json}");
      assert_eq!(json["state"], "Kansas");
      assert_eq!(json["code"], "KS");
    }
  }

  #[test]
  fn non_empty_facts_are_copied_in_order() {
    let t = table();
    let ks = t.lookup("KS").unwrap();
    let mut facts = vec!["b".to_string(), "a".to_string()];

    let view = merge(ks, Some(&facts));
    facts.push("later".into());

    assert_eq!(view.funfacts.as_deref(), Some(&["b".to_string(), "a".to_string()][..]));
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["funfacts"], serde_json::json!(["b", "a"]));
  }

  #[test]
  fn merging_leaves_the_table_untouched() {
    let t = table();
    let before = t.lookup("CO").unwrap().clone();
    let mut view = merge(t.lookup("CO").unwrap(), Some(&["x".to_string()]));
    view.record.nickname.push_str(" (edited)");
    assert_eq!(t.lookup("CO").unwrap(), &before);
  }

  #[test]
  fn merge_all_looks_up_by_code() {
    let t = table();
    let mut by_code = HashMap::new();
    by_code.insert(StateCode::parse("AK").unwrap(), vec!["cold".to_string()]);
    by_code.insert(StateCode::parse("HI").unwrap(), vec![]);

    let views = merge_all(t.filter(Contiguity::NonContiguous), &by_code);
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].record.code.as_str(), "AK");
    assert_eq!(views[0].funfacts.as_deref(), Some(&["cold".to_string()][..]));
    assert_eq!(views[1].record.code.as_str(), "HI");
    assert!(views[1].funfacts.is_none());
  }
}
