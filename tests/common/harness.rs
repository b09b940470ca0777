//! Test harness backed by the in-memory datastore.
//!
//! Each test gets a fresh, empty store. Service handles and request contexts
//! are built over it the same way a transport would.

use std::sync::Arc;

use test_context::AsyncTestContext;

use gather_core::domains::meetings::MeetingService;
use gather_core::domains::reviews::ReviewService;
use gather_core::store::memory::MemoryStore;
use gather_core::RequestContext;

pub struct TestHarness {
    pub db: Arc<MemoryStore>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        // Respect RUST_LOG; try_init() so repeat setups don't panic.
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        TestHarness {
            db: Arc::new(MemoryStore::new()),
        }
    }

    async fn teardown(self) {
        // In-memory tables drop with the harness
    }
}

impl TestHarness {
    /// A fresh request context, as a transport builds per incoming request.
    pub fn request(&self) -> RequestContext {
        RequestContext::new(self.db.clone())
    }

    pub fn meetings(&self) -> MeetingService {
        MeetingService::new(self.db.clone())
    }

    pub fn reviews(&self) -> ReviewService {
        ReviewService::new(self.db.clone())
    }
}
