use super::*;
use crate::kernel::document::LanguageMode;
use crate::kernel::services::adapters::MemoryDocumentTable;
use crate::kernel::services::ports::StoreError;

fn store() -> DocumentStore {
    DocumentStore::new(Arc::new(MemoryDocumentTable::new()))
}

fn recorder(store: &DocumentStore) -> (Subscription, Arc<Mutex<Vec<Vec<Document>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = store.subscribe(move |docs| sink.lock().unwrap().push(docs.to_vec()));
    (sub, seen)
}

#[tokio::test]
async fn every_mutation_publishes_a_full_snapshot() {
    let store = store();
    let (_sub, seen) = recorder(&store);

    let a = Document::new("a.txt", LanguageMode::Plaintext, 0);
    let b = Document::new("b.txt", LanguageMode::Plaintext, 1);
    store.create(a.clone()).await.unwrap();
    store.create(b.clone()).await.unwrap();
    store
        .update(a.id, DocumentPatch::text("hello"))
        .await
        .unwrap();
    store.delete(b.id).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[1].len(), 2);
    assert_eq!(seen[2][0].text, "hello");
    assert_eq!(seen[3].len(), 1);
    assert_eq!(seen[3][0].id, a.id);
}

#[tokio::test]
async fn multiple_subscribers_each_receive_snapshots() {
    let store = store();
    let (_s1, seen1) = recorder(&store);
    let (_s2, seen2) = recorder(&store);
    assert_eq!(store.subscriber_count(), 2);

    store
        .create(Document::new("a.txt", LanguageMode::Json, 0))
        .await
        .unwrap();

    assert_eq!(seen1.lock().unwrap().len(), 1);
    assert_eq!(seen2.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn dropping_subscription_stops_delivery() {
    let store = store();
    let (sub, seen) = recorder(&store);
    sub.unsubscribe();
    assert_eq!(store.subscriber_count(), 0);

    store
        .create(Document::new("a.txt", LanguageMode::Plaintext, 0))
        .await
        .unwrap();
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_mutations_do_not_publish() {
    let store = store();
    let (_sub, seen) = recorder(&store);

    let missing = DocumentId::new();
    let err = store
        .update(missing, DocumentPatch::text("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing));

    let a = Document::new("a.txt", LanguageMode::Plaintext, 0);
    store.create(a.clone()).await.unwrap();
    assert!(matches!(
        store.create(a.clone()).await.unwrap_err(),
        StoreError::AlreadyExists(_)
    ));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_of_absent_document_is_ok() {
    let store = store();
    store.delete(DocumentId::new()).await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_finds_by_id() {
    let store = store();
    let a = Document::new("a.txt", LanguageMode::Plaintext, 0).with_text("body");
    store.create(a.clone()).await.unwrap();
    assert_eq!(store.get(a.id).await.unwrap(), Some(a));
    assert_eq!(store.get(DocumentId::new()).await.unwrap(), None);
}
