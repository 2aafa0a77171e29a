//! Single retry on authentication failure.
//!
//! A call starts in [`AttemptState::FirstAttempt`]. The first 401 moves it to
//! [`AttemptState::Retried`]: the auth-failure notifier fires, the client
//! waits the configured delay, and the request is rebuilt with a fresh token
//! and dispatched once more. A 401 in the `Retried` state is terminal.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::classifier::Disposition;
use crate::clients::http_request::HttpRequest;
use crate::clients::request_builder::RequestBuilder;

/// Invoked when a request is rejected with 401, so the owner can refresh its
/// token. Fire-and-forget: nothing waits on the refresh.
pub type AuthFailureNotifier = Arc<dyn Fn() + Send + Sync>;

/// Where a call is in the retry state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptState {
    /// No retry has happened yet.
    FirstAttempt,
    /// The single retry has been used.
    Retried,
}

impl AttemptState {
    /// Number of retries performed so far.
    #[must_use]
    pub const fn retry_count(&self) -> u32 {
        match self {
            Self::FirstAttempt => 0,
            Self::Retried => 1,
        }
    }
}

/// Owns the retry-on-401 policy.
#[derive(Clone)]
pub struct RetryCoordinator {
    notifier: Option<AuthFailureNotifier>,
    delay: Duration,
}

impl fmt::Debug for RetryCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryCoordinator")
            .field("notifier", &self.notifier.is_some())
            .field("delay", &self.delay)
            .finish()
    }
}

impl RetryCoordinator {
    /// Creates a coordinator.
    ///
    /// Without a notifier no retry is ever attempted and a 401 is handled
    /// like any other rejection.
    #[must_use]
    pub fn new(notifier: Option<AuthFailureNotifier>, delay: Duration) -> Self {
        Self { notifier, delay }
    }

    /// Returns `true` if `disposition` in `state` should trigger the retry.
    #[must_use]
    pub const fn should_retry(&self, disposition: Disposition, state: AttemptState) -> bool {
        matches!(disposition, Disposition::AuthFailure(_))
            && matches!(state, AttemptState::FirstAttempt)
            && self.notifier.is_some()
    }

    /// Performs the `FirstAttempt -> Retried` transition.
    ///
    /// Notifies the owner, waits the configured delay, and returns `request`
    /// rebuilt with `authenticated = true`. Returns `None` if the coordinator
    /// has no notifier.
    pub async fn prepare_retry(
        &self,
        request: &HttpRequest,
        request_builder: &RequestBuilder,
    ) -> Option<HttpRequest> {
        let notifier = self.notifier.as_ref()?;

        tracing::info!(
            "{} {} was unauthorized, notifying and retrying in {:?}",
            request.method,
            request.url,
            self.delay
        );
        notifier();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Some(request_builder.clone_request(request, true))
    }
}
