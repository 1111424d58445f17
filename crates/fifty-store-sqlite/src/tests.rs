//! Integration tests for `SqliteStore` against an in-memory database.

use fifty_core::{state::StateCode, store::FunFactStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn code(s: &str) -> StateCode { StateCode::parse(s).unwrap() }

fn list(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(&code("KS")).await.unwrap().is_none());
}

#[tokio::test]
async fn all_on_empty_store_is_empty() {
  let s = store().await;
  assert!(s.all().await.unwrap().is_empty());
}

// ─── Append ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_append_creates_entry() {
  let s = store().await;

  let entry = s.append(code("KS"), list(&["a", "b"])).await.unwrap();
  assert_eq!(entry.state_code, code("KS"));
  assert_eq!(entry.funfacts, list(&["a", "b"]));

  let fetched = s.get(&code("KS")).await.unwrap().unwrap();
  assert_eq!(fetched.funfacts, list(&["a", "b"]));
}

#[tokio::test]
async fn append_is_cumulative_and_ordered() {
  let s = store().await;
  s.append(code("KS"), list(&["a", "b"])).await.unwrap();
  let entry = s.append(code("KS"), list(&["c"])).await.unwrap();
  assert_eq!(entry.funfacts, list(&["a", "b", "c"]));
}

#[tokio::test]
async fn entries_are_per_code() {
  let s = store().await;
  s.append(code("KS"), list(&["wheat"])).await.unwrap();
  s.append(code("MO"), list(&["mule"])).await.unwrap();

  let all = s.all().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[&code("KS")], list(&["wheat"]));
  assert_eq!(all[&code("MO")], list(&["mule"]));
}

#[tokio::test]
async fn concurrent_appends_to_same_code_are_not_lost() {
  let s = store().await;
  s.append(code("KS"), list(&["seed"])).await.unwrap();

  let (a, b) = tokio::join!(
    s.append(code("KS"), list(&["from-a"])),
    s.append(code("KS"), list(&["from-b-1", "from-b-2"])),
  );
  a.unwrap();
  b.unwrap();

  let facts = s.get(&code("KS")).await.unwrap().unwrap().funfacts;
  assert_eq!(facts.len(), 4);
  assert_eq!(facts[0], "seed");
  assert!(facts.contains(&"from-a".to_string()));
  let b1 = facts.iter().position(|f| f == "from-b-1").unwrap();
  assert_eq!(facts[b1 + 1], "from-b-2");
}

#[tokio::test]
async fn many_concurrent_appends_across_tasks() {
  let s = store().await;

  let handles: Vec<_> = (0..16)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move { s.append(code("CO"), vec![format!("fact {i}")]).await })
    })
    .collect();
  for h in handles {
    h.await.unwrap().unwrap();
  }

  let facts = s.get(&code("CO")).await.unwrap().unwrap().funfacts;
  assert_eq!(facts.len(), 16);
}

// ─── Replace ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_at_is_one_based() {
  let s = store().await;
  s.append(code("KS"), list(&["a", "b"])).await.unwrap();

  let entry = s.replace_at(code("KS"), 1, "x".into()).await.unwrap();
  assert_eq!(entry.funfacts, list(&["x", "b"]));
}

#[tokio::test]
async fn replace_at_out_of_range_leaves_list_intact() {
  let s = store().await;
  s.append(code("KS"), list(&["a", "b"])).await.unwrap();

  let err = s.replace_at(code("KS"), 3, "x".into()).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(fifty_core::Error::IndexOutOfRange { index: 3, len: 2, .. })
  ));

  let facts = s.get(&code("KS")).await.unwrap().unwrap().funfacts;
  assert_eq!(facts, list(&["a", "b"]));
}

#[tokio::test]
async fn replace_at_without_entry_is_no_fun_facts() {
  let s = store().await;
  let err = s.replace_at(code("KS"), 1, "x".into()).await.unwrap_err();
  assert!(matches!(err, crate::Error::Core(fifty_core::Error::NoFunFacts(_))));

  // A rejected edit must not create the entry.
  assert!(s.get(&code("KS")).await.unwrap().is_none());
}

// ─── Remove ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn remove_at_middle() {
  let s = store().await;
  s.append(code("KS"), list(&["a", "b", "c"])).await.unwrap();

  let entry = s.remove_at(code("KS"), 2).await.unwrap();
  assert_eq!(entry.funfacts, list(&["a", "c"]));
}

#[tokio::test]
async fn removing_last_fact_keeps_empty_entry() {
  let s = store().await;
  s.append(code("KS"), list(&["only"])).await.unwrap();

  let entry = s.remove_at(code("KS"), 1).await.unwrap();
  assert!(entry.funfacts.is_empty());

  let fetched = s.get(&code("KS")).await.unwrap().unwrap();
  assert!(fetched.funfacts.is_empty());
  assert!(fetched.non_empty_facts().is_none());

  let err = s.remove_at(code("KS"), 1).await.unwrap_err();
  assert!(matches!(err, crate::Error::Core(fifty_core::Error::NoFunFacts(_))));
}

#[tokio::test]
async fn updated_at_advances_on_edit() {
  let s = store().await;
  let first = s.append(code("KS"), list(&["a"])).await.unwrap();
  let second = s.append(code("KS"), list(&["b"])).await.unwrap();
  assert!(second.updated_at >= first.updated_at);

  let fetched = s.get(&code("KS")).await.unwrap().unwrap();
  assert_eq!(fetched.updated_at, second.updated_at);
}

// ─── Seed ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_replaces_everything() {
  let s = store().await;
  s.append(code("TX"), list(&["stale"])).await.unwrap();

  let written = s
    .seed(vec![
      (code("KS"), list(&["sunflower"])),
      (code("NE"), list(&["goldenrod", "blue agate"])),
    ])
    .await
    .unwrap();
  assert_eq!(written, 2);

  let all = s.all().await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(!all.contains_key(&code("TX")));
  assert_eq!(all[&code("NE")], list(&["goldenrod", "blue agate"]));
}

#[tokio::test]
async fn file_backed_store_persists_across_reopen() {
  let dir = std::env::temp_dir().join(format!(
    "fifty-store-test-{}-{}",
    std::process::id(),
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default(),
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("facts.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.append(code("OK"), list(&["mistletoe"])).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let entry = s.get(&code("OK")).await.unwrap().unwrap();
  assert_eq!(entry.funfacts, list(&["mistletoe"]));

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
