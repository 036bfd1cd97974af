//! Time helpers
//!
//! All persistence uses `i64` Unix millis; conversions happen at the API
//! boundary.

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01 as a floor; catches accidental seconds/millis confusion
        assert!(now_millis() > 1_577_836_800_000);
    }
}
