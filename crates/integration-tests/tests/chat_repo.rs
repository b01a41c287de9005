//! Chat thread behavior: idempotent creation and append-only messaging.

use integration_tests::chat_repo;

#[tokio::test]
async fn thread_creation_is_idempotent_per_pair() {
    let repo = chat_repo();

    let first = repo.create_thread("user-1", "creator-1").await.unwrap();
    let second = repo.create_thread("user-1", "creator-1").await.unwrap();
    assert_eq!(first.id, second.id);

    // Exactly one matching thread exists in the collection.
    let threads = repo.list_for_user("user-1").await;
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].id, first.id);
}

#[tokio::test]
async fn different_pairs_get_different_threads() {
    let repo = chat_repo();

    let a = repo.create_thread("user-1", "creator-1").await.unwrap();
    let b = repo.create_thread("user-1", "creator-2").await.unwrap();
    let c = repo.create_thread("user-2", "creator-1").await.unwrap();
    assert_ne!(a.id, b.id);
    assert_ne!(a.id, c.id);

    assert_eq!(repo.list_for_user("user-1").await.len(), 2);
    assert_eq!(repo.list_for_user("creator-1").await.len(), 2);
}

#[tokio::test]
async fn messages_survive_a_reread_and_bump_updated_at() {
    let repo = chat_repo();
    let thread = repo.create_thread("user-1", "creator-1").await.unwrap();

    let message = repo
        .add_message(thread.id, "user-1", "Che orari fa il santuario?")
        .await
        .unwrap();

    let stored = repo.get(thread.id).await.unwrap();
    assert_eq!(stored.messages.len(), 1);
    assert_eq!(stored.messages[0].id, message.id);
    assert_eq!(stored.messages[0].sender_id, "user-1");
    assert!(stored.updated_at >= thread.created_at);
}
