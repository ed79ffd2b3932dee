//! Request-coalescing cache for configuration reads.
//!
//! Concurrent configuration fetches are collapsed into a single request: the
//! first caller becomes the leader and performs the fetch, every caller that
//! arrives while it is in flight awaits the same shared outcome, and the
//! resolved value stays fresh for a bounded window after the request
//! settles. This bounds staleness while turning request storms into one
//! network call.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::time::Instant;

use crate::error::{EngineError, EngineResult};
use crate::models::PricingConfig;

/// How long a resolved fetch stays fresh before the next read refetches.
pub const CONFIG_CACHE_TTL: Duration = Duration::from_secs(5);

/// The outcome shared with callers that joined an in-flight fetch.
///
/// Carries the error as a message because waiters wrap it into their own
/// [`EngineError::ConfigUnavailable`].
type SharedOutcome = Result<PricingConfig, String>;

/// The cache cell is an explicit state machine.
///
/// Transitions:
/// - `Empty -> Pending` when a caller becomes the fetch leader
/// - `Pending -> Fresh` when the leader's fetch succeeds
/// - `Pending -> Empty` when the leader's fetch fails
/// - `Fresh -> Empty` on expiry or explicit invalidation, never silently
enum CacheState {
    /// No value and no fetch in flight.
    Empty,
    /// A fetch is in flight; the receiver yields its outcome.
    Pending(watch::Receiver<Option<SharedOutcome>>),
    /// A resolved value, valid until `expires_at`.
    Fresh {
        value: PricingConfig,
        expires_at: Instant,
    },
}

/// What a caller holds after inspecting the cell under the lock.
enum Role {
    Hit(PricingConfig),
    Wait(watch::Receiver<Option<SharedOutcome>>),
    Lead(watch::Sender<Option<SharedOutcome>>),
}

/// Coalesces concurrent configuration fetches and caches the result.
pub struct ConfigCache {
    state: Mutex<CacheState>,
    ttl: Duration,
}

impl ConfigCache {
    /// Creates an empty cache with the default 5-second freshness window.
    pub fn new() -> Self {
        Self::with_ttl(CONFIG_CACHE_TTL)
    }

    /// Creates an empty cache with a custom freshness window.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::Empty),
            ttl,
        }
    }

    /// Returns the cached configuration, joining or starting a fetch.
    ///
    /// Exactly one `fetch` runs per in-flight window regardless of how many
    /// callers arrive during it; they all resolve to the same outcome. The
    /// freshness window starts when the fetch settles, so a caller arriving
    /// after `ttl` has passed triggers a fresh fetch.
    pub async fn get_or_fetch<F>(&self, fetch: F) -> EngineResult<PricingConfig>
    where
        F: Future<Output = EngineResult<PricingConfig>>,
    {
        let role = {
            let mut state = self.state.lock().await;

            // Lazy expiry: a stale Fresh cell transitions to Empty on read.
            if let CacheState::Fresh { expires_at, .. } = &*state {
                if Instant::now() >= *expires_at {
                    *state = CacheState::Empty;
                }
            }

            match &*state {
                CacheState::Fresh { value, .. } => Role::Hit(value.clone()),
                CacheState::Pending(receiver) => Role::Wait(receiver.clone()),
                CacheState::Empty => {
                    let (sender, receiver) = watch::channel(None);
                    *state = CacheState::Pending(receiver);
                    Role::Lead(sender)
                }
            }
        };

        match role {
            Role::Hit(value) => Ok(value),
            Role::Wait(receiver) => Self::await_outcome(receiver).await,
            Role::Lead(sender) => {
                let outcome = fetch.await;

                {
                    let mut state = self.state.lock().await;
                    *state = match &outcome {
                        Ok(value) => CacheState::Fresh {
                            value: value.clone(),
                            expires_at: Instant::now() + self.ttl,
                        },
                        Err(_) => CacheState::Empty,
                    };
                }

                // Waiters may all have gone away; that is not an error.
                let _ = sender.send(Some(
                    outcome
                        .as_ref()
                        .map(Clone::clone)
                        .map_err(ToString::to_string),
                ));

                outcome
            }
        }
    }

    /// Explicitly transitions the cell to `Empty`.
    ///
    /// Called after a configuration save or wipe so the next read observes
    /// the new state instead of a stale value.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        *state = CacheState::Empty;
    }

    /// Awaits the leader's outcome through the shared channel.
    async fn await_outcome(
        mut receiver: watch::Receiver<Option<SharedOutcome>>,
    ) -> EngineResult<PricingConfig> {
        loop {
            let settled = receiver.borrow_and_update().clone();
            match settled {
                Some(Ok(value)) => return Ok(value),
                Some(Err(message)) => return Err(EngineError::ConfigUnavailable { message }),
                None => {
                    receiver
                        .changed()
                        .await
                        .map_err(|_| EngineError::ConfigUnavailable {
                            message: "in-flight configuration fetch was dropped".to_string(),
                        })?;
                }
            }
        }
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}
