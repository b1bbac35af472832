//! Application State
//!
//! This module manages the shared application state: the catalog loader,
//! the payment gateway handle, and the per-session shop state.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use crate::cart::feedback::FeedbackTracker;
use crate::cart::store::CartStore;
use crate::catalog::loader::CatalogLoader;
use crate::catalog::source::ProductSource;
use crate::checkout::gateway::PaymentGateway;
use crate::checkout::orchestrator::CheckoutFlow;
use crate::config::Config;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Everything one browser session owns: its cart, its transient feedback
/// markers, and its checkout flow. Sessions never observe each other.
pub struct ShopSession {
    pub cart: Mutex<CartStore>,
    pub feedback: FeedbackTracker,
    pub checkout: CheckoutFlow,
}

impl ShopSession {
    fn new(feedback_ttl: std::time::Duration) -> Self {
        Self {
            cart: Mutex::new(CartStore::new()),
            feedback: FeedbackTracker::new(feedback_ttl),
            checkout: CheckoutFlow::new(),
        }
    }
}

/// Core application state.
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<CatalogLoader>,
    pub gateway: Arc<dyn PaymentGateway>,

    /// Per-session shop state, keyed by session id.
    /// DashMap allows concurrent access without external Mutexes.
    pub sessions: DashMap<String, Arc<ShopSession>>,
}

impl AppState {
    /// Creates the state and kicks off the one-shot catalog load.
    pub fn new(
        config: Config,
        source: Arc<dyn ProductSource>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            config,
            catalog: CatalogLoader::spawn(source),
            gateway,
            sessions: DashMap::new(),
        }
    }

    /// Fetches the session for `id`, creating it empty on first use.
    pub fn session(&self, id: &str) -> Arc<ShopSession> {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(ShopSession::new(self.config.feedback_ttl)))
            .clone()
    }

    /// Cancels background work: the catalog fetch and every session's
    /// pending feedback timers.
    pub fn shutdown(&self) {
        self.catalog.abort();
        for session in self.sessions.iter() {
            session.value().feedback.shutdown();
        }
    }
}
