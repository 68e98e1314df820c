//! Client-side throttle that keeps the connector under the API quota, so the
//! server rarely has to answer 429.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token bucket shared by every request of one client
#[derive(Clone)]
pub struct Throttle {
    bucket: Arc<DirectLimiter>,
    per_second: NonZeroU32,
}

impl Throttle {
    /// Allow `requests` per second with a burst of the same size.
    ///
    /// Returns `None` for 0, meaning no throttling.
    pub fn per_second(requests: u32) -> Option<Self> {
        let per_second = NonZeroU32::new(requests)?;
        Some(Self {
            bucket: Arc::new(RateLimiter::direct(Quota::per_second(per_second))),
            per_second,
        })
    }

    pub fn requests_per_second(&self) -> u32 {
        self.per_second.get()
    }

    /// Sleep until the bucket has a token for the next request
    pub async fn acquire(&self) {
        self.bucket.until_ready().await;
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("per_second", &self.requests_per_second())
            .finish()
    }
}
