//! Testing utilities for the identity admin console.
//!
//! - [`MockBackend`]: a `wiremock` server that plays the identity API
//! - [`RecordingStorage`]: session storage that counts every access
//! - [`RecordingView`] / [`FixedProbe`]: navigation doubles

mod backend;
mod mock;

pub use backend::{API_PREFIX, CURRENT_USER_PATH, MockBackend};
pub use mock::{FixedProbe, RecordingStorage, RecordingView};

/// Re-exported so tests can build custom mocks without a direct dependency.
pub use wiremock;
