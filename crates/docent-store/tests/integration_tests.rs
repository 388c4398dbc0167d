//! Integration tests for docent-store
//!
//! These tests verify the full session lifecycle: upsert, fingerprint
//! deduplication, owner-scoped reads and deletes.

use docent_domain::traits::SessionStore;
use docent_domain::NewSession;
use docent_store::{content_fingerprint, SqliteStore};

fn new_session(owner: &str, title: &str, text: &str) -> NewSession {
    NewSession {
        owner_id: owner.to_string(),
        title: title.to_string(),
        source_text: text.to_string(),
        topics: None,
        questions: None,
        fingerprint: content_fingerprint(owner, text),
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_store_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docent.db");

    let mut store = SqliteStore::new(&path).unwrap();
    let mut session = new_session("user-1", "notes.pdf", "text");
    session.topics = Some(vec!["Ownership".to_string()]);
    store.upsert_session(session).unwrap();

    // Reopen and confirm the row survived
    drop(store);
    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.list_sessions("user-1").unwrap().len(), 1);
}

#[test]
fn test_upsert_and_get_round_trip() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let mut session = new_session("user-1", "notes.pdf", "The source text.");
    session.topics = Some(vec!["X".to_string()]);

    let id = store.upsert_session(session).unwrap();
    let loaded = store.get_session(id, "user-1").unwrap().unwrap();

    assert_eq!(loaded.id, id);
    assert_eq!(loaded.owner_id, "user-1");
    assert_eq!(loaded.title, "notes.pdf");
    assert_eq!(loaded.source_text, "The source text.");

    // Labels round-trip; details are never persisted
    assert_eq!(loaded.topics.len(), 1);
    assert_eq!(loaded.topics[0].label, "X");
    assert!(loaded.topics[0].detail.is_none());
    assert!(loaded.questions.is_empty());
}

#[test]
fn test_upsert_same_fingerprint_replaces() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let mut first = new_session("user-1", "notes.pdf", "same text");
    first.topics = Some(vec!["Old topic".to_string()]);
    let id1 = store.upsert_session(first).unwrap();

    let mut second = new_session("user-1", "notes-renamed.pdf", "same text");
    second.topics = Some(vec!["New topic".to_string()]);
    let id2 = store.upsert_session(second).unwrap();

    // Same fingerprint maps to the same row
    assert_eq!(id1, id2);
    assert_eq!(store.list_sessions("user-1").unwrap().len(), 1);

    let loaded = store.get_session(id1, "user-1").unwrap().unwrap();
    assert_eq!(loaded.title, "notes-renamed.pdf");
    assert_eq!(loaded.topics[0].label, "New topic");
}

#[test]
fn test_upsert_preserves_other_mode() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let mut with_topics = new_session("user-1", "notes.pdf", "same text");
    with_topics.topics = Some(vec!["A topic".to_string()]);
    let id = store.upsert_session(with_topics).unwrap();

    // A later question extraction for the same document must not erase topics
    let mut with_questions = new_session("user-1", "notes.pdf", "same text");
    with_questions.questions = Some(vec!["A question?".to_string()]);
    store.upsert_session(with_questions).unwrap();

    let loaded = store.get_session(id, "user-1").unwrap().unwrap();
    assert_eq!(loaded.topics.len(), 1);
    assert_eq!(loaded.questions.len(), 1);
}

#[test]
fn test_different_owners_do_not_collide() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let id1 = store
        .upsert_session(new_session("user-1", "notes.pdf", "same text"))
        .unwrap();
    let id2 = store
        .upsert_session(new_session("user-2", "notes.pdf", "same text"))
        .unwrap();

    assert_ne!(id1, id2);
    assert_eq!(store.list_sessions("user-1").unwrap().len(), 1);
    assert_eq!(store.list_sessions("user-2").unwrap().len(), 1);
}

#[test]
fn test_get_is_owner_scoped() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let id = store
        .upsert_session(new_session("user-1", "notes.pdf", "text"))
        .unwrap();

    assert!(store.get_session(id, "user-1").unwrap().is_some());
    assert!(store.get_session(id, "user-2").unwrap().is_none());
}

#[test]
fn test_list_sessions_newest_first() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store
        .upsert_session(new_session("user-1", "first.pdf", "text one"))
        .unwrap();
    store
        .upsert_session(new_session("user-1", "second.pdf", "text two"))
        .unwrap();
    store
        .upsert_session(new_session("user-1", "third.pdf", "text three"))
        .unwrap();

    let titles: Vec<String> = store
        .list_sessions("user-1")
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();

    assert_eq!(titles, vec!["third.pdf", "second.pdf", "first.pdf"]);
}

#[test]
fn test_list_summary_mode_flags() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let mut session = new_session("user-1", "notes.pdf", "text");
    session.questions = Some(vec!["Q?".to_string()]);
    store.upsert_session(session).unwrap();

    let summaries = store.list_sessions("user-1").unwrap();
    assert_eq!(summaries.len(), 1);
    assert!(!summaries[0].has_topics);
    assert!(summaries[0].has_questions);
}

#[test]
fn test_delete_session_is_owner_scoped() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let id = store
        .upsert_session(new_session("user-1", "notes.pdf", "text"))
        .unwrap();

    // The wrong owner cannot delete
    assert!(!store.delete_session(id, "user-2").unwrap());
    assert!(store.get_session(id, "user-1").unwrap().is_some());

    // The owner can
    assert!(store.delete_session(id, "user-1").unwrap());
    assert!(store.get_session(id, "user-1").unwrap().is_none());

    // Deleting again reports nothing removed
    assert!(!store.delete_session(id, "user-1").unwrap());
}

#[test]
fn test_delete_owner_removes_all_rows() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store
        .upsert_session(new_session("user-1", "a.pdf", "text a"))
        .unwrap();
    store
        .upsert_session(new_session("user-1", "b.pdf", "text b"))
        .unwrap();
    store
        .upsert_session(new_session("user-2", "c.pdf", "text c"))
        .unwrap();

    let removed = store.delete_owner("user-1").unwrap();
    assert_eq!(removed, 2);

    assert!(store.list_sessions("user-1").unwrap().is_empty());
    assert_eq!(store.list_sessions("user-2").unwrap().len(), 1);
}
