use faq_server::faq::{FaqId, FaqPayload, ImageUpload, RelatedServices};
use faq_server::storage::Database;
use faq_server::store::{FaqStore, MemoryStore, RedbStore, StoreError, UnavailableStore};

fn stores() -> Vec<(tempfile::TempDir, Box<dyn FaqStore>)> {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();
    vec![
        (dir, Box::new(RedbStore::new(db, "images")) as Box<dyn FaqStore>),
        (
            tempfile::tempdir().unwrap(),
            Box::new(MemoryStore::new("images")) as Box<dyn FaqStore>,
        ),
    ]
}

fn payload() -> FaqPayload {
    FaqPayload {
        question: Some("Why mow?".to_string()),
        answer: Some("Regular mowing keeps grass healthy.".to_string()),
        category: Some("Lawn".to_string()),
        ..Default::default()
    }
}

fn upload(name: &str) -> Option<ImageUpload> {
    ImageUpload::from_original_name(name)
}

#[tokio::test]
async fn test_create_then_list_contains_exactly_one() {
    for (_dir, store) in stores() {
        let first = store.create(payload(), None).await.unwrap();
        let second = store.create(payload(), None).await.unwrap();
        assert_ne!(first.id, second.id);

        let all = store.list().await.unwrap();
        assert_eq!(all.iter().filter(|f| f.id == first.id).count(), 1);
        assert_eq!(all.len(), 2);
        assert!(first.related_services.is_empty());
        assert_eq!(first.img_name, None);
    }
}

#[tokio::test]
async fn test_short_question_rejected_without_write() {
    for (_dir, store) in stores() {
        let mut bad = payload();
        bad.question = Some("Why".to_string());

        match store.create(bad.clone(), None).await {
            Err(StoreError::Validation(message)) => assert!(message.contains("question")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.list().await.unwrap().is_empty());

        let existing = store.create(payload(), None).await.unwrap();
        let id = existing.id.to_string();
        match store.update(&id, bad, None).await {
            Err(StoreError::Validation(message)) => assert!(message.contains("question")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.get(&id).await.unwrap(), existing);
    }
}

#[tokio::test]
async fn test_validation_checked_before_existence() {
    let mut bad = payload();
    bad.answer = None;
    let missing_ids = [uuid::Uuid::new_v4().to_string(), "42".to_string()];

    for ((_dir, store), id) in stores().into_iter().zip(missing_ids) {
        assert!(matches!(
            store.update(&id, bad.clone(), None).await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.update(&id, payload(), None).await,
            Err(StoreError::NotFound)
        ));
    }
}

#[tokio::test]
async fn test_related_services_order_round_trips() {
    for (_dir, store) in stores() {
        let mut p = payload();
        p.related_services = Some(RelatedServices::Many(vec!["A".into(), "B".into()]));
        let created = store.create(p, None).await.unwrap();

        let read = store.get(&created.id.to_string()).await.unwrap();
        assert_eq!(read.related_services, vec!["A", "B"]);
    }
}

#[tokio::test]
async fn test_update_keeps_id_and_advances_date() {
    for (_dir, store) in stores() {
        let created = store.create(payload(), upload("before.png")).await.unwrap();
        let id = created.id.to_string();

        let mut changes = payload();
        changes.question = Some("When should I mow?".to_string());
        changes.img_name = Some("images/forged.png".to_string());
        let updated = store.update(&id, changes, None).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.question, "When should I mow?");
        assert!(updated.updated_date >= created.updated_date);
        // No new upload: the stored image stays, client text is ignored
        assert_eq!(updated.img_name.as_deref(), Some("images/before.png"));

        let replaced = store.update(&id, payload(), upload("after.png")).await.unwrap();
        assert_eq!(replaced.img_name.as_deref(), Some("images/after.png"));
        assert!(replaced.updated_date >= updated.updated_date);
    }
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    for (_dir, store) in stores() {
        let created = store.create(payload(), None).await.unwrap();
        let id = created.id.to_string();

        assert_eq!(store.delete(&id).await.unwrap(), created);
        assert!(matches!(store.get(&id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete(&id).await, Err(StoreError::NotFound)));
    }
}

#[tokio::test]
async fn test_memory_ids_are_never_reused() {
    let store = MemoryStore::new("images");
    let first = store.create(payload(), None).await.unwrap();
    let second = store.create(payload(), None).await.unwrap();
    assert_eq!(first.id, FaqId::Seq(1));
    assert_eq!(second.id, FaqId::Seq(2));

    store.delete("2").await.unwrap();
    let third = store.create(payload(), None).await.unwrap();
    assert_eq!(third.id, FaqId::Seq(3));

    let ids: Vec<FaqId> = store.list().await.unwrap().into_iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![FaqId::Seq(1), FaqId::Seq(3)]);
}

#[tokio::test]
async fn test_memory_store_honors_supplied_date_on_create() {
    let store = MemoryStore::new("images");
    let mut p = payload();
    p.updated_date = Some("2020-05-01".to_string());

    let created = store.create(p, None).await.unwrap();
    assert_eq!(created.updated_date.to_rfc3339(), "2020-05-01T00:00:00+00:00");

    let updated = store.update("1", payload(), None).await.unwrap();
    assert!(updated.updated_date > created.updated_date);
}

#[tokio::test]
async fn test_persistent_store_stamps_now_and_rejects_malformed_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = RedbStore::new(Database::open(dir.path()).unwrap(), "images");

    let mut p = payload();
    p.updated_date = Some("2020-05-01".to_string());
    let created = store.create(p, None).await.unwrap();
    assert!(created.updated_date.to_rfc3339() > "2020-05-01T00:00:00+00:00".to_string());
    assert!(matches!(created.id, FaqId::Key(_)));

    assert!(matches!(
        store.get("12345").await,
        Err(StoreError::MalformedId(_))
    ));
    assert!(matches!(
        store.delete("nope").await,
        Err(StoreError::MalformedId(_))
    ));
}

#[tokio::test]
async fn test_concurrent_memory_creates_get_distinct_ids() {
    let store = std::sync::Arc::new(MemoryStore::new("images"));
    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = std::sync::Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.create(payload(), None).await.unwrap().id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_by_key(|id| id.to_string().parse::<u64>().unwrap());
    ids.dedup();
    assert_eq!(ids.len(), 16);
}

#[tokio::test]
async fn test_unavailable_store_fails_every_call() {
    let store = UnavailableStore::new("connection refused");
    assert!(matches!(store.list().await, Err(StoreError::Backend(_))));
    assert!(matches!(
        store.create(payload(), None).await,
        Err(StoreError::Backend(_))
    ));
}
