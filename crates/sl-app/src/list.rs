//! Contact list view-model
//!
//! Holds the current page of contacts, the page index, and the client-side
//! name filter. Pagination is bound-checked before any request leaves the
//! process.

use std::sync::Arc;

use sl_contacts::{Contact, ContactPage, ContactStore, ContactsError};
use tracing::{debug, error};

use crate::error::{AppError, Result};

/// Lifecycle of the list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// Nothing requested yet
    Idle,
    /// A page request is in flight
    Loading,
    /// The current page is on screen
    Loaded,
    /// The last request failed; previous page data is kept
    Failed(String),
}

/// A rendered page link.
///
/// The page number is copied in at construction time, so activating a link
/// always requests the page it was built for, regardless of how the view
/// state has changed since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub page: u32,
    pub active: bool,
}

/// View-model for the contact list screen
pub struct ListView {
    store: Arc<dyn ContactStore>,
    page_size: u32,
    state: ListState,
    page: ContactPage,
    current_page: u32,
    search: String,
}

impl ListView {
    /// Create a new list view backed by the given store
    pub fn new(store: Arc<dyn ContactStore>, page_size: u32) -> Self {
        Self {
            store,
            page_size,
            state: ListState::Idle,
            page: ContactPage::default(),
            current_page: 0,
            search: String::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Page index currently on screen
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages reported by the last successful fetch
    pub fn total_pages(&self) -> u32 {
        self.page.total_pages
    }

    /// Total contacts across all pages, for the header count
    pub fn total_elements(&self) -> u64 {
        self.page.total_elements
    }

    /// Whether the loaded page holds no contacts
    pub fn is_empty(&self) -> bool {
        self.page.is_empty()
    }

    /// Initial fetch when the screen comes up
    pub async fn mount(&mut self) -> Result<()> {
        self.load_page(0).await
    }

    /// Fetch the given page.
    ///
    /// Out-of-range requests against the known page count are rejected
    /// before any request is sent.
    pub async fn load_page(&mut self, page: u32) -> Result<()> {
        if self.page.total_pages > 0 && page >= self.page.total_pages {
            debug!(
                "Rejecting page {} (total pages {})",
                page, self.page.total_pages
            );
            return Err(AppError::Api(ContactsError::PageOutOfRange {
                page,
                total_pages: self.page.total_pages,
            }));
        }

        self.state = ListState::Loading;

        match self.store.list_page(page, self.page_size).await {
            Ok(fetched) => {
                self.page = fetched;
                self.current_page = page;
                self.state = ListState::Loaded;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load contact page {}: {}", page, e);
                self.state = ListState::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Re-fetch the page currently on screen
    pub async fn refresh(&mut self) -> Result<()> {
        self.load_page(self.current_page).await
    }

    /// Set the client-side name filter
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Current name filter
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Contacts visible under the current filter.
    ///
    /// Case-insensitive substring match on the name, applied to the loaded
    /// page only.
    pub fn visible(&self) -> Vec<&Contact> {
        let needle = self.search.to_lowercase();
        self.page
            .content
            .iter()
            .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Whether the previous-page control is enabled
    pub fn can_prev(&self) -> bool {
        self.current_page > 0
    }

    /// Whether the next-page control is enabled
    pub fn can_next(&self) -> bool {
        self.current_page + 1 < self.page.total_pages
    }

    /// Go to the previous page; no-op at the first page
    pub async fn prev(&mut self) -> Result<()> {
        if !self.can_prev() {
            return Ok(());
        }
        self.load_page(self.current_page - 1).await
    }

    /// Go to the next page; no-op at the last page
    pub async fn next(&mut self) -> Result<()> {
        if !self.can_next() {
            return Ok(());
        }
        self.load_page(self.current_page + 1).await
    }

    /// One link per page, each bound to its page number by value
    pub fn page_links(&self) -> Vec<PageLink> {
        (0..self.page.total_pages)
            .map(|page| PageLink {
                page,
                active: page == self.current_page,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_contacts::InMemoryContactStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store wrapper that counts page requests
    struct CountingStore {
        inner: InMemoryContactStore,
        list_calls: AtomicUsize,
    }

    impl CountingStore {
        fn new(inner: InMemoryContactStore) -> Self {
            Self {
                inner,
                list_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl ContactStore for CountingStore {
        async fn list_page(&self, page: u32, size: u32) -> sl_contacts::Result<ContactPage> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_page(page, size).await
        }

        async fn get_by_id(&self, id: &str) -> sl_contacts::Result<Contact> {
            self.inner.get_by_id(id).await
        }

        async fn save(&self, contact: &Contact) -> sl_contacts::Result<Contact> {
            self.inner.save(contact).await
        }

        async fn upload_photo(
            &self,
            id: &str,
            bytes: Vec<u8>,
            file_name: &str,
        ) -> sl_contacts::Result<String> {
            self.inner.upload_photo(id, bytes, file_name).await
        }

        async fn delete(&self, id: &str) -> sl_contacts::Result<()> {
            self.inner.delete(id).await
        }
    }

    /// Store that always fails
    struct FailingStore;

    #[async_trait::async_trait]
    impl ContactStore for FailingStore {
        async fn list_page(&self, _page: u32, _size: u32) -> sl_contacts::Result<ContactPage> {
            Err(ContactsError::Server {
                status: 500,
                message: "boom".to_string(),
            })
        }

        async fn get_by_id(&self, id: &str) -> sl_contacts::Result<Contact> {
            Err(ContactsError::NotFound(id.to_string()))
        }

        async fn save(&self, _contact: &Contact) -> sl_contacts::Result<Contact> {
            Err(ContactsError::Server {
                status: 500,
                message: "boom".to_string(),
            })
        }

        async fn upload_photo(
            &self,
            _id: &str,
            _bytes: Vec<u8>,
            _file_name: &str,
        ) -> sl_contacts::Result<String> {
            Err(ContactsError::Server {
                status: 500,
                message: "boom".to_string(),
            })
        }

        async fn delete(&self, _id: &str) -> sl_contacts::Result<()> {
            Ok(())
        }
    }

    async fn seeded_store(names: &[&str]) -> Arc<InMemoryContactStore> {
        let contacts = names.iter().copied().map(Contact::new).collect();
        Arc::new(InMemoryContactStore::seeded(contacts).await)
    }

    #[tokio::test]
    async fn test_mount_loads_first_page() {
        let store = seeded_store(&["Ann", "Bob"]).await;
        let mut view = ListView::new(store, 10);

        assert_eq!(*view.state(), ListState::Idle);
        view.mount().await.unwrap();

        assert_eq!(*view.state(), ListState::Loaded);
        assert_eq!(view.current_page(), 0);
        assert_eq!(view.visible().len(), 2);
        assert_eq!(view.total_elements(), 2);
    }

    #[tokio::test]
    async fn test_search_filters_by_name() {
        let store = seeded_store(&["Ann", "Bob", "Annie"]).await;
        let mut view = ListView::new(store, 10);
        view.mount().await.unwrap();

        view.set_search("ann");
        let names: Vec<&str> = view.visible().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Annie"]);

        view.set_search("");
        assert_eq!(view.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_pagination_boundaries() {
        // 25 contacts at size 10: three pages
        let names: Vec<String> = (0..25).map(|i| format!("Contact {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let store = seeded_store(&refs).await;
        let mut view = ListView::new(store, 10);
        view.mount().await.unwrap();

        assert!(!view.can_prev());
        assert!(view.can_next());

        view.next().await.unwrap();
        assert_eq!(view.current_page(), 1);
        assert!(view.can_prev());
        assert!(view.can_next());

        view.next().await.unwrap();
        assert_eq!(view.current_page(), 2);
        assert!(view.can_prev());
        assert!(!view.can_next());

        // No-ops at the edges
        view.next().await.unwrap();
        assert_eq!(view.current_page(), 2);
        view.load_page(0).await.unwrap();
        view.prev().await.unwrap();
        assert_eq!(view.current_page(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_page_rejected_before_request() {
        let names: Vec<String> = (0..15).map(|i| format!("Contact {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let seeded =
            InMemoryContactStore::seeded(refs.iter().copied().map(Contact::new).collect()).await;
        let store = Arc::new(CountingStore::new(seeded));
        let mut view = ListView::new(store.clone(), 10);

        view.mount().await.unwrap();
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);

        let err = view.load_page(7).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(ContactsError::PageOutOfRange { page: 7, total_pages: 2 })
        ));
        // The rejected request never reached the store
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*view.state(), ListState::Loaded);
    }

    #[tokio::test]
    async fn test_page_links_bind_by_value() {
        let names: Vec<String> = (0..30).map(|i| format!("Contact {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let store = seeded_store(&refs).await;
        let mut view = ListView::new(store, 10);
        view.mount().await.unwrap();

        let links = view.page_links();
        assert_eq!(links.len(), 3);
        assert!(links[0].active);

        // Navigate elsewhere; previously built links keep their page values
        view.load_page(2).await.unwrap();
        assert_eq!(links[1].page, 1);

        view.load_page(links[1].page).await.unwrap();
        assert_eq!(view.current_page(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_enters_failed_state() {
        let mut view = ListView::new(Arc::new(FailingStore), 10);

        let err = view.mount().await.unwrap_err();
        assert!(matches!(err, AppError::Api(ContactsError::Server { status: 500, .. })));
        assert!(matches!(view.state(), ListState::Failed(_)));
    }

    #[tokio::test]
    async fn test_idempotent_page_read() {
        let names: Vec<String> = (0..12).map(|i| format!("Contact {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let store = seeded_store(&refs).await;
        let mut view = ListView::new(store, 10);

        view.load_page(0).await.unwrap();
        let first: Vec<String> = view.visible().iter().map(|c| c.name.clone()).collect();
        view.load_page(0).await.unwrap();
        let second: Vec<String> = view.visible().iter().map(|c| c.name.clone()).collect();
        assert_eq!(first, second);
    }
}
