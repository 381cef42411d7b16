/*
[INPUT]:  Wall-clock time at nanosecond resolution
[OUTPUT]: Strictly increasing 13-digit request nonces
[POS]:    HTTP layer - replay protection for signed requests
[UPDATE]: When the exchange changes its expected nonce width
*/

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Digit width the exchange expects for the `nonce` field
pub const NONCE_DIGITS: usize = 13;

/// Produces request nonces for one credential set.
///
/// All callers share a single atomic, so concurrent `next()` calls never
/// hand out the same value and never go backwards.
#[derive(Debug, Default)]
pub struct NonceSource {
    last: AtomicU64,
}

impl NonceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce, at least one greater than any previously issued value
    pub fn next(&self) -> u64 {
        let now = clock_nonce();
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }

    /// Next nonce rendered for the wire
    pub fn next_string(&self) -> String {
        self.next().to_string()
    }
}

/// Current epoch nanoseconds truncated to the leading `NONCE_DIGITS` digits
fn clock_nonce() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    truncate_digits(nanos, NONCE_DIGITS)
}

fn truncate_digits(value: u128, digits: usize) -> u64 {
    let mut value = value;
    let limit = 10u128.pow(digits as u32);
    while value >= limit {
        value /= 10;
    }
    value as u64
}
