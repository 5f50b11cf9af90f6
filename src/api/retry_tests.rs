//! Tests for `RetryPolicy`.

use super::RetryPolicy;
use std::time::Duration;

mod retry_policy_defaults {
    use super::*;

    #[test]
    fn new_uses_sdk_defaults() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.base_backoff, Duration::from_millis(300));
        assert_eq!(policy.timeout, Duration::from_secs(30));
    }

    #[test]
    fn default_trait_matches_new() {
        assert_eq!(RetryPolicy::default(), RetryPolicy::new());
    }

    #[test]
    fn max_attempts_counts_initial_attempt() {
        assert_eq!(RetryPolicy::new().max_attempts(), 3);
        assert_eq!(RetryPolicy::new().with_max_retries(0).max_attempts(), 1);
    }

    #[test]
    fn max_attempts_saturates() {
        assert_eq!(
            RetryPolicy::new().with_max_retries(u32::MAX).max_attempts(),
            u32::MAX
        );
    }
}

mod retry_policy_builder {
    use super::*;

    #[test]
    fn builder_sets_every_field() {
        let policy = RetryPolicy::new()
            .with_max_retries(5)
            .with_base_backoff(Duration::from_millis(50))
            .with_timeout(Duration::from_secs(5));

        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.base_backoff, Duration::from_millis(50));
        assert_eq!(policy.timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_backoff_is_allowed() {
        let policy = RetryPolicy::new().with_base_backoff(Duration::ZERO);
        assert_eq!(policy.delay_for_retry(3), Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "timeout must be greater than zero")]
    fn zero_timeout_panics() {
        let _ = RetryPolicy::new().with_timeout(Duration::ZERO);
    }
}

mod delay_calculation {
    use super::*;

    #[test]
    fn delays_double_from_base_backoff() {
        let policy = RetryPolicy::new().with_base_backoff(Duration::from_millis(300));

        assert_eq!(policy.delay_for_retry(0), Duration::from_millis(300));
        assert_eq!(policy.delay_for_retry(1), Duration::from_millis(600));
        assert_eq!(policy.delay_for_retry(2), Duration::from_millis(1200));
        assert_eq!(policy.delay_for_retry(3), Duration::from_millis(2400));
    }

    #[test]
    fn huge_retry_index_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new().with_base_backoff(Duration::from_secs(1));

        assert_eq!(policy.delay_for_retry(40), Duration::from_secs(u64::from(u32::MAX)));
    }

    #[test]
    fn large_base_backoff_saturates_to_max() {
        let policy = RetryPolicy::new().with_base_backoff(Duration::MAX);
        assert_eq!(policy.delay_for_retry(1), Duration::MAX);
    }
}

mod should_retry {
    use super::*;

    #[test]
    fn allows_retries_until_budget_is_spent() {
        let policy = RetryPolicy::new().with_max_retries(2);

        assert!(policy.should_retry(0));
        assert!(policy.should_retry(1));
        assert!(!policy.should_retry(2));
    }

    #[test]
    fn zero_retries_never_retries() {
        let policy = RetryPolicy::new().with_max_retries(0);
        assert!(!policy.should_retry(0));
    }
}
