/*!
 * Tests for the fixed-window rate limiter
 */

use std::sync::Arc;
use chrono::{TimeDelta, Utc};
use std::time::Duration;
use tolk::app_config::RateLimitConfig;
use tolk::translation::RateLimiter;

#[test]
fn test_allow_withinQuota_shouldAdmitExactlyMax() {
    let start = Utc::now();
    let limiter = RateLimiter::starting_at(30, Duration::from_secs(60), start);

    let admitted = (0..31)
        .filter(|i| limiter.allow_at(start + TimeDelta::milliseconds(*i)))
        .count();

    assert_eq!(admitted, 30);
}

#[test]
fn test_allow_afterWindowElapsed_shouldReset() {
    let start = Utc::now();
    let limiter = RateLimiter::starting_at(2, Duration::from_secs(60), start);

    assert!(limiter.allow_at(start));
    assert!(limiter.allow_at(start));
    assert!(!limiter.allow_at(start + TimeDelta::seconds(30)));

    // exactly one window later is still the same window
    assert!(!limiter.allow_at(start + TimeDelta::seconds(60)));

    let later = start + TimeDelta::seconds(61);
    assert!(limiter.allow_at(later));
    assert_eq!(limiter.window_state().count, 1);
    assert_eq!(limiter.window_state().window_start, later);
}

#[test]
fn test_allow_whenDenied_shouldNotMutateState() {
    let start = Utc::now();
    let limiter = RateLimiter::starting_at(1, Duration::from_secs(60), start);

    assert!(limiter.allow_at(start));
    let before = limiter.window_state();
    assert!(!limiter.allow_at(start + TimeDelta::seconds(1)));
    assert_eq!(limiter.window_state(), before);
    assert_eq!(limiter.remaining_at(start + TimeDelta::seconds(1)), 0);
}

#[test]
fn test_fromConfig_shouldUseConfiguredQuota() {
    let config = RateLimitConfig {
        max_requests: 3,
        window_secs: 10,
    };
    let limiter = RateLimiter::from_config(&config);

    assert_eq!(limiter.max_requests(), 3);
    assert_eq!(limiter.window(), Duration::from_secs(10));
    assert_eq!(limiter.remaining(), 3);
}

#[test]
fn test_allow_fromManyThreads_shouldNeverExceedQuota() {
    let limiter = Arc::new(RateLimiter::new(50, Duration::from_secs(60)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            std::thread::spawn(move || (0..20).filter(|_| limiter.allow()).count())
        })
        .collect();

    let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(admitted, 50);
}
