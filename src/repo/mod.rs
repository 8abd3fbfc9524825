use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::SiteError;
use crate::models::{Draft, Entity, Idea, WithImage, REVIEWED};
use crate::observer::Subscription;
use crate::store::{blob_path, Attachment, BlobStore, CollectionQuery, DocumentStore, Fields};
use crate::sync::{LiveEvent, SyncClient};
use crate::util::now_ms;

/// Result of a confirmed-or-declined delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Deletion {
    Cancelled,
    Deleted,
}

/// Typed operations on one collection.
pub(crate) struct Repository<T: Entity> {
    store: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    sync: SyncClient,
    clock: fn() -> i64,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            blobs: self.blobs.clone(),
            sync: self.sync.clone(),
            clock: self.clock,
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>, sync: SyncClient) -> Self {
        Self {
            store,
            blobs,
            sync,
            clock: now_ms,
            _entity: PhantomData,
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn query() -> CollectionQuery {
        CollectionQuery::newest_first(T::COLLECTION)
    }

    /// Live, newest-first view of the collection. Documents that do not map
    /// to `T` are left out of the snapshot.
    pub fn subscribe(&self, on_event: impl Fn(LiveEvent<T>) + Send + Sync + 'static) -> Subscription {
        self.sync.subscribe(Self::query(), move |event| {
            let mapped = match event {
                LiveEvent::Snapshot(docs) => LiveEvent::Snapshot(
                    docs.iter()
                        .filter_map(|doc| match T::from_document(doc) {
                            Ok(item) => Some(item),
                            Err(e) => {
                                log::warn!("skipping `{}` document: {e}", T::COLLECTION);
                                None
                            }
                        })
                        .collect(),
                ),
                LiveEvent::Failed(e) => LiveEvent::Failed(e),
            };
            on_event(mapped);
        })
    }

    /// Re-runs the live queries on this collection.
    pub async fn refresh(&self) {
        self.sync.refresh(T::COLLECTION).await;
    }

    pub async fn create(&self, draft: T::Draft) -> Result<String, SiteError> {
        draft.validate()?;
        self.write(draft.into_fields()).await
    }

    async fn write(&self, fields: Fields) -> Result<String, SiteError> {
        let id = self.store.create(T::COLLECTION, fields).await?;
        log::info!("created `{}/{id}`", T::COLLECTION);
        self.refresh().await;
        Ok(id)
    }

    /// Calls `confirm` first; nothing reaches the backend if it declines.
    /// A deleted item leaves the list with the next snapshot, not before.
    pub async fn delete(
        &self,
        id: &str,
        confirm: impl FnOnce() -> bool,
    ) -> Result<Deletion, SiteError> {
        if !confirm() {
            return Ok(Deletion::Cancelled);
        }
        self.store.delete(T::COLLECTION, id).await?;
        log::info!("deleted `{}/{id}`", T::COLLECTION);
        self.refresh().await;
        Ok(Deletion::Deleted)
    }
}

impl<T> Repository<T>
where
    T: Entity,
    T::Draft: WithImage,
{
    /// Uploads `image`, then writes the draft with its download URL.
    ///
    /// The draft is checked before the upload (minus the image URL it is about
    /// to receive); a failed upload never reaches the document write.
    pub async fn create_with_image(
        &self,
        mut draft: T::Draft,
        image: Attachment,
    ) -> Result<String, SiteError> {
        let mut errors = match draft.validate() {
            Ok(()) => Default::default(),
            Err(errors) => errors.without(<T::Draft as WithImage>::IMAGE_FIELD),
        };
        if image.is_empty() {
            errors.push(<T::Draft as WithImage>::IMAGE_FIELD, "Please upload a cover image.");
        }
        errors.into_result()?;

        let path = blob_path(T::COLLECTION, (self.clock)(), &image.file_name);
        let url = self.blobs.upload(&path, &image).await?;
        log::debug!("uploaded `{path}`");

        draft.set_image_url(url);
        draft.validate()?;
        self.write(draft.into_fields()).await
    }
}

impl Repository<Idea> {
    /// Flips `reviewed`; returns the value written.
    pub async fn toggle_reviewed(&self, idea: &Idea) -> Result<bool, SiteError> {
        let next = !idea.reviewed;
        let mut fields = Fields::new();
        fields.insert(REVIEWED.to_string(), next.into());
        self.store.update(Idea::COLLECTION, &idea.id, fields).await?;
        self.refresh().await;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, IdeaCategory, NewBook, NewIdea};
    use crate::notify::{NoticeKind, Notifier};
    use crate::store::memory::{MemoryBlobs, MemoryStore, StoreCall};
    use crate::store::FieldValue;
    use crate::sync::LiveState;
    use futures::executor::block_on;
    use leptos::prelude::Owner;
    use std::sync::Mutex;

    struct Harness {
        store: MemoryStore,
        blobs: MemoryBlobs,
        sync: SyncClient,
    }

    impl Harness {
        fn new() -> Self {
            let store = MemoryStore::new();
            let sync = SyncClient::new(Arc::new(store.clone()));
            Self {
                store,
                blobs: MemoryBlobs::new(),
                sync,
            }
        }

        fn repo<T: Entity>(&self) -> Repository<T> {
            Repository::new(
                Arc::new(self.store.clone()),
                Arc::new(self.blobs.clone()),
                self.sync.clone(),
            )
            .with_clock(|| 1_700_000_000_000)
        }
    }

    fn live<T: Entity + std::fmt::Debug>(
        repo: &Repository<T>,
    ) -> (Arc<Mutex<LiveState<T>>>, Subscription) {
        let state = Arc::new(Mutex::new(LiveState::Loading));
        let s = state.clone();
        let sub = repo.subscribe(move |ev| s.lock().unwrap().apply(ev));
        (state, sub)
    }

    fn book_draft() -> NewBook {
        NewBook {
            title: "Atomic Habits".into(),
            author: "James Clear".into(),
            description: "Tiny changes".into(),
            image_url: String::new(),
            link: "https://www.goodreads.com/book/show/40121378".into(),
        }
    }

    fn cover() -> Attachment {
        Attachment {
            file_name: "habits.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    fn idea() -> NewIdea {
        NewIdea {
            name: "Al".into(),
            email: "a@b.com".into(),
            category: IdeaCategory::Books,
            idea: "1234567890".into(),
        }
    }

    #[test]
    fn test_create_idea_writes_once_unreviewed() {
        let h = Harness::new();
        let repo = h.repo::<Idea>();

        let id = block_on(repo.create(idea())).expect("create should succeed");

        let writes = h.store.writes();
        assert_eq!(writes.len(), 1);
        let StoreCall::Create(collection, fields) = &writes[0] else {
            panic!("expected a create, got {writes:?}");
        };
        assert_eq!(collection, "ideas");
        assert_eq!(fields.get("reviewed"), Some(&FieldValue::Bool(false)));
        assert!(h.store.get("ideas", &id).is_some());
    }

    #[test]
    fn test_invalid_draft_never_reaches_backend() {
        let h = Harness::new();
        let repo = h.repo::<Idea>();
        let mut draft = idea();
        draft.name = "A".into();

        let err = block_on(repo.create(draft)).unwrap_err();
        let SiteError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("name"), Some("Name must be at least 2 characters."));
        assert!(h.store.calls().is_empty());
    }

    #[test]
    fn test_create_refreshes_open_subscriptions() {
        let h = Harness::new();
        let repo = h.repo::<Idea>();
        let (state, _sub) = live(&repo);
        block_on(repo.refresh());
        assert!(state.lock().unwrap().items().is_empty());

        block_on(repo.create(idea())).unwrap();
        assert_eq!(state.lock().unwrap().items().len(), 1);
    }

    #[test]
    fn test_create_surfaces_backend_rejection() {
        let h = Harness::new();
        h.store
            .fail_writes_with(Some(SiteError::Write("Missing or insufficient permissions.".into())));
        let repo = h.repo::<Idea>();

        let err = block_on(repo.create(idea())).unwrap_err();
        assert_eq!(err.to_string(), "Missing or insufficient permissions.");
    }

    #[test]
    fn test_undecodable_documents_are_skipped() {
        let h = Harness::new();
        let mut partial = Fields::new();
        partial.insert("title".into(), "No author".into());
        h.store.insert("books", "broken", partial);
        let repo = h.repo::<Book>();
        let (state, _sub) = live(&repo);

        block_on(repo.create_with_image(book_draft(), cover())).unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].title, "Atomic Habits");
    }

    #[test]
    fn test_create_with_image_uploads_then_writes_url() {
        let h = Harness::new();
        let repo = h.repo::<Book>();

        let id = block_on(repo.create_with_image(book_draft(), cover())).unwrap();

        assert_eq!(h.blobs.upload_paths(), vec!["books/1700000000000_habits.png"]);
        let stored = h.store.get("books", &id).unwrap();
        assert_eq!(
            stored.fields.get("imageUrl"),
            Some(&FieldValue::from("https://blobs.test/books/1700000000000_habits.png"))
        );
    }

    #[test]
    fn test_failed_upload_skips_document_write() {
        let h = Harness::new();
        h.blobs
            .fail_with(Some(SiteError::Storage("quota exceeded".into())));
        let repo = h.repo::<Book>();

        let err = block_on(repo.create_with_image(book_draft(), cover())).unwrap_err();
        assert!(matches!(err, SiteError::Storage(_)));
        assert!(h.store.writes().is_empty());
    }

    #[test]
    fn test_missing_cover_is_a_validation_error() {
        let h = Harness::new();
        let repo = h.repo::<Book>();

        let err = block_on(repo.create_with_image(book_draft(), Attachment::default())).unwrap_err();
        let SiteError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("imageUrl"), Some("Please upload a cover image."));
        assert!(h.blobs.upload_paths().is_empty());
    }

    #[test]
    fn test_declined_delete_makes_no_call() {
        let h = Harness::new();
        h.store.insert("books", "b1", book_draft().into_fields());
        let repo = h.repo::<Book>();

        let outcome = block_on(repo.delete("b1", || false)).unwrap();
        assert_eq!(outcome, Deletion::Cancelled);
        assert!(h.store.calls().is_empty());
        assert!(h.store.get("books", "b1").is_some());
    }

    #[test]
    fn test_failed_delete_keeps_item_listed() {
        let h = Harness::new();
        let mut fields = book_draft().into_fields();
        fields.insert("imageUrl".into(), "https://img.test/a.png".into());
        h.store.insert("books", "b1", fields);
        let repo = h.repo::<Book>();
        let (state, _sub) = live(&repo);
        block_on(repo.refresh());

        h.store.fail_writes_with(Some(SiteError::Write("offline".into())));
        let err = block_on(repo.delete("b1", || true)).unwrap_err();

        assert_eq!(err, SiteError::Write("offline".into()));
        assert_eq!(state.lock().unwrap().items().len(), 1);
    }

    #[test]
    fn test_failed_delete_surfaces_error_toast() {
        let owner = Owner::new();
        owner.with(|| {
            let h = Harness::new();
            let mut fields = book_draft().into_fields();
            fields.insert("imageUrl".into(), "https://img.test/a.png".into());
            h.store.insert("books", "b1", fields);
            let repo = h.repo::<Book>();
            let (state, _sub) = live(&repo);
            block_on(repo.refresh());
            let notifier = Notifier::new();

            h.store
                .fail_writes_with(Some(SiteError::Write("Missing or insufficient permissions.".into())));
            if let Err(e) = block_on(repo.delete("b1", || true)) {
                notifier.failure("Failed to delete book.", &e);
            }

            let notices = notifier.notices();
            assert_eq!(notices.len(), 1);
            assert_eq!(notices[0].kind, NoticeKind::Error);
            assert_eq!(
                notices[0].description.as_deref(),
                Some("Failed to delete book. Missing or insufficient permissions.")
            );
            assert_eq!(state.lock().unwrap().items().len(), 1);
        });
    }

    #[test]
    fn test_confirmed_delete_removes_on_next_snapshot() {
        let h = Harness::new();
        let mut fields = book_draft().into_fields();
        fields.insert("imageUrl".into(), "https://img.test/a.png".into());
        h.store.insert("books", "b1", fields);
        let repo = h.repo::<Book>();
        let (state, _sub) = live(&repo);
        block_on(repo.refresh());

        let outcome = block_on(repo.delete("b1", || true)).unwrap();
        assert_eq!(outcome, Deletion::Deleted);
        assert!(state.lock().unwrap().items().is_empty());
    }

    #[test]
    fn test_toggle_reviewed_twice_restores_state() {
        let h = Harness::new();
        let repo = h.repo::<Idea>();
        let id = block_on(repo.create(idea())).unwrap();
        let load = || Idea::from_document(&h.store.get("ideas", &id).unwrap()).unwrap();

        let first = block_on(repo.toggle_reviewed(&load())).unwrap();
        assert!(first);
        assert!(load().reviewed);

        let second = block_on(repo.toggle_reviewed(&load())).unwrap();
        assert!(!second);
        assert!(!load().reviewed);
    }

    #[test]
    fn test_toggle_only_sends_reviewed_field() {
        let h = Harness::new();
        let repo = h.repo::<Idea>();
        let id = block_on(repo.create(idea())).unwrap();
        let current = Idea::from_document(&h.store.get("ideas", &id).unwrap()).unwrap();

        block_on(repo.toggle_reviewed(&current)).unwrap();

        let last = h.store.writes().pop().unwrap();
        let StoreCall::Update(_, updated_id, fields) = last else {
            panic!("expected an update");
        };
        assert_eq!(updated_id, id);
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["reviewed"]);
    }
}
