//! tianapi client pipeline.
//!
//! query::build_target -> transport::Transport::get -> response::interpret
//!
//! `fetch` glues the three together for one invocation: one GET, one
//! interpreted outcome. No caching, no retries.

pub mod query;
pub mod response;
pub mod transport;

use thiserror::Error;

pub use query::{DEFAULT_BASE_URL, EndpointRequest};
pub use response::{Outcome, Record, interpret};
pub use transport::{HttpTransport, Transport};

use crate::utils::mask_key;

/// Failures below the API level. API-reported failures are `Outcome::Failure`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response body: {0}")]
    Parse(String),
}

/// Issue the request for `target` and interpret the body.
pub async fn fetch(transport: &dyn Transport, target: &str) -> Result<Outcome, FetchError> {
    crate::log_debug!("GET {}", mask_key(target));
    let body = transport.get(target).await?;
    crate::log_trace!("response body: {body}");
    interpret(&body)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned transport for unit tests.

    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{FetchError, Transport};

    pub struct StubTransport {
        reply: Result<String, FetchError>,
        seen: Mutex<Vec<String>>,
    }

    impl StubTransport {
        pub fn body(body: impl Into<String>) -> Self {
            Self {
                reply: Ok(body.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(reason: &str) -> Self {
            Self {
                reply: Err(FetchError::Transport(reason.to_string())),
                seen: Mutex::new(Vec::new()),
            }
        }

        /// Targets requested so far, in order.
        pub fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn get(&self, target: &str) -> Result<String, FetchError> {
            self.seen.lock().unwrap().push(target.to_string());
            self.reply.clone()
        }
    }
}
