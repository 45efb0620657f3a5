//! Small cross-crate helpers

/// Current wall-clock time as Unix epoch milliseconds, the form every
/// `created_at` column stores.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_in_millisecond_range() {
        let now = now_millis();
        // Past 2023-01-01 and before year 3000, so neither seconds nor nanos.
        assert!(now > 1_672_531_200_000);
        assert!(now < 32_503_680_000_000);
    }
}
