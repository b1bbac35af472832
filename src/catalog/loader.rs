//! Startup catalog loader.
//!
//! Fetches the active product set once, in the background, and exposes the
//! outcome as an explicit three-way state so callers can distinguish "still
//! loading" and "couldn't load products" from a genuinely empty catalog.
//! The fetch is not retried automatically.

use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::models::Product;
use super::source::ProductSource;

/// Observable state of the one-shot catalog fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Ready(Vec<Product>),
    Failed(String),
}

pub struct CatalogLoader {
    state: RwLock<CatalogState>,
    settled_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CatalogLoader {
    /// Starts the background fetch and returns the loader immediately.
    ///
    /// The spawned task is kept so [`CatalogLoader::abort`] can cancel it on
    /// teardown instead of letting a stale fetch apply its result later.
    pub fn spawn(source: Arc<dyn ProductSource>) -> Arc<Self> {
        let (settled_tx, _) = watch::channel(false);
        let loader = Arc::new(Self {
            state: RwLock::new(CatalogState::Loading),
            settled_tx,
            task: Mutex::new(None),
        });

        let worker = Arc::clone(&loader);
        let handle = tokio::spawn(async move {
            let outcome = source.fetch_active().await;

            let next = match outcome {
                Ok(products) => {
                    info!(count = products.len(), "catalog loaded");
                    CatalogState::Ready(products)
                }
                Err(e) => {
                    error!(error = %e, "catalog load failed");
                    CatalogState::Failed(e.to_string())
                }
            };

            *worker.state.write().expect("catalog state lock poisoned") = next;
            let _ = worker.settled_tx.send(true);
        });

        *loader.task.lock().expect("catalog task lock poisoned") = Some(handle);
        loader
    }

    /// Current state of the fetch, cloned out of the lock.
    pub fn snapshot(&self) -> CatalogState {
        self.state.read().expect("catalog state lock poisoned").clone()
    }

    /// Looks a product up by id in the loaded catalog. `None` while loading,
    /// after a failed load, or for an unknown id.
    pub fn find(&self, product_id: &str) -> Option<Product> {
        match &*self.state.read().expect("catalog state lock poisoned") {
            CatalogState::Ready(products) => {
                products.iter().find(|p| p.id == product_id).cloned()
            }
            _ => None,
        }
    }

    /// Waits until the fetch has settled into `Ready` or `Failed`.
    pub async fn settled(&self) {
        let mut rx = self.settled_tx.subscribe();
        let _ = rx.wait_for(|done| *done).await;
    }

    /// Cancels an in-flight fetch. Idempotent; a settled loader keeps its
    /// result.
    pub fn abort(&self) {
        if let Some(handle) = self.task.lock().expect("catalog task lock poisoned").take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;
    use crate::catalog::source::SourceError;
    use async_trait::async_trait;
    use chrono::Utc;

    struct FixedSource(Result<Vec<Product>, SourceError>);

    #[async_trait]
    impl ProductSource for FixedSource {
        async fn fetch_active(&self) -> Result<Vec<Product>, SourceError> {
            self.0.clone()
        }
    }

    struct NeverSource;

    #[async_trait]
    impl ProductSource for NeverSource {
        async fn fetch_active(&self) -> Result<Vec<Product>, SourceError> {
            std::future::pending().await
        }
    }

    fn sticker(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: "Conference Sticker".to_string(),
            description: "Holographic".to_string(),
            price: 3.5,
            original_price: None,
            image: "/images/sticker.png".to_string(),
            category: Category::Stickers,
            in_stock: true,
            rating: 4.9,
            review_count: 12,
            featured: false,
            active: true,
            display_order: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn successful_fetch_settles_into_ready() {
        let loader = CatalogLoader::spawn(Arc::new(FixedSource(Ok(vec![sticker("p1")]))));
        loader.settled().await;

        match loader.snapshot() {
            CatalogState::Ready(products) => assert_eq!(products.len(), 1),
            other => panic!("expected Ready, got {other:?}"),
        }
        assert!(loader.find("p1").is_some());
        assert!(loader.find("p2").is_none());
    }

    #[tokio::test]
    async fn failed_fetch_settles_into_failed_with_reason() {
        let loader = CatalogLoader::spawn(Arc::new(FixedSource(Err(SourceError::Rejected(
            "maintenance window".to_string(),
        )))));
        loader.settled().await;

        match loader.snapshot() {
            CatalogState::Failed(reason) => assert!(reason.contains("maintenance window")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(loader.find("p1").is_none());
    }

    #[tokio::test]
    async fn pending_fetch_reports_loading_and_can_be_aborted() {
        let loader = CatalogLoader::spawn(Arc::new(NeverSource));

        assert_eq!(loader.snapshot(), CatalogState::Loading);
        loader.abort();
        tokio::task::yield_now().await;
        // The aborted fetch must not settle the state.
        assert_eq!(loader.snapshot(), CatalogState::Loading);
    }
}
