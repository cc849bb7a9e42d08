/*!
 * Mock render backend for testing.
 *
 * Behaviors:
 * - `MockBackend::working()` - always succeeds with placeholder bytes
 * - `MockBackend::failing()` - every render fails
 * - `MockBackend::unavailable()` - initialization itself fails
 * - `MockBehavior::Slow` - render sleeps before succeeding
 *
 * Every submitted request is recorded so tests can assert whether (and with
 * what) the backend was contacted.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use crate::errors::RenderError;
use crate::render::{RenderBackend, RenderRequest};

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Render always fails
    Failing,
    /// Initialization fails, render is never reached
    Unavailable,
    /// Simulates a slow encode (for timeout-adjacent testing)
    Slow { delay_ms: u64 },
}

/// Mock render backend for testing pipeline behavior
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of initialize calls observed
    init_count: Arc<AtomicUsize>,
    /// Every render request submitted to this backend
    requests: Arc<Mutex<Vec<RenderRequest>>>,
}

impl MockBackend {
    /// Create a mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            init_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock backend that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock backend
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock backend whose initialization fails
    pub fn unavailable() -> Self {
        Self::new(MockBehavior::Unavailable)
    }

    /// Number of render requests this backend has received
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of initialize calls this backend has received
    pub fn init_count(&self) -> usize {
        self.init_count.load(Ordering::SeqCst)
    }

    /// Clone out the recorded requests
    pub fn recorded_requests(&self) -> Vec<RenderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RenderBackend for MockBackend {
    async fn initialize(&self) -> Result<(), RenderError> {
        self.init_count.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Unavailable => Err(RenderError::BackendUnavailable(
                "mock backend configured as unavailable".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
        self.requests.lock().unwrap().push(request.clone());

        match self.behavior {
            MockBehavior::Working => Ok(b"mock-mp4-bytes".to_vec()),
            MockBehavior::Failing => Err(RenderError::BackendFailure(
                "mock backend configured to fail".to_string(),
            )),
            MockBehavior::Unavailable => Err(RenderError::BackendUnavailable(
                "mock backend configured as unavailable".to_string(),
            )),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(b"mock-mp4-bytes".to_vec())
            }
        }
    }
}
