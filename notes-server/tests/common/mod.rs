//! Behaviour every `NoteStore` backend must share.
//!
//! Each check expects an empty store whose id sequence starts at 1.

#![allow(dead_code)]

use std::time::Duration;

use notes_server::{ErrorKind, NoteInput, NoteStore, RequestContext, StoreError};

fn ctx() -> RequestContext {
    RequestContext::with_timeout(Duration::from_secs(5))
}

pub async fn lifecycle_scenario(store: &dyn NoteStore) {
    let created = store.create(&ctx(), NoteInput::new("t", "c")).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "t");
    assert_eq!(created.content, "c");
    assert_eq!(created.updated_at, Some(created.created_at));

    let fetched = store.get(&ctx(), 1).await.unwrap();
    assert_eq!(fetched, created);

    let updated = store
        .update(&ctx(), 1, NoteInput::new("t2", "c2"))
        .await
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.title, "t2");
    assert_eq!(updated.content, "c2");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let fetched = store.get(&ctx(), 1).await.unwrap();
    assert_eq!(fetched, updated);

    store.delete(&ctx(), 1).await.unwrap();
    let err = store.get(&ctx(), 1).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 1 }));
}

pub async fn missing_ids_are_not_found(store: &dyn NoteStore) {
    let err = store.get(&ctx(), 999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = store
        .update(&ctx(), 999, NoteInput::new("t", "c"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = store.delete(&ctx(), 999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

pub async fn deleted_ids_are_not_found(store: &dyn NoteStore) {
    let note = store.create(&ctx(), NoteInput::new("t", "c")).await.unwrap();
    store.delete(&ctx(), note.id).await.unwrap();

    let err = store.delete(&ctx(), note.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    let err = store
        .update(&ctx(), note.id, NoteInput::new("again", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

pub async fn get_all_returns_live_notes_newest_first(store: &dyn NoteStore) {
    assert!(store.get_all(&ctx()).await.unwrap().is_empty());

    let a = store.create(&ctx(), NoteInput::new("A", "a")).await.unwrap();
    let b = store.create(&ctx(), NoteInput::new("B", "b")).await.unwrap();
    let c = store.create(&ctx(), NoteInput::new("C", "c")).await.unwrap();
    store.delete(&ctx(), b.id).await.unwrap();

    let all = store.get_all(&ctx()).await.unwrap();
    let ids: Vec<_> = all.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![c.id, a.id]);
}

pub async fn empty_fields_are_accepted(store: &dyn NoteStore) {
    let note = store.create(&ctx(), NoteInput::default()).await.unwrap();
    assert!(note.title.is_empty());
    assert!(note.content.is_empty());
}

pub async fn expired_context_times_out(store: &dyn NoteStore) {
    let expired = RequestContext::with_timeout(Duration::ZERO);

    let err = store
        .create(&expired, NoteInput::new("t", "c"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);

    // Nothing was written
    assert!(store.get_all(&ctx()).await.unwrap().is_empty());
}

pub async fn shutdown_is_idempotent_and_final(store: &dyn NoteStore) {
    store.shutdown().await.unwrap();
    store.shutdown().await.unwrap();

    let err = store.get_all(&ctx()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Backend);
}
